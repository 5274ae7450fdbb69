// src/motif_file.rs
use std::io::{self, BufRead};

use thiserror::Error;

use crate::composer::MotifSpec;
use crate::error::CassetteError;

/// Streaming reader for motif list files.
///
/// Format: one `MOTIF,RULE` pair per line, whitespace around fields ignored.
/// - Blank lines and `#` comments are skipped.
/// - Motifs are uppercased; the rule is kept as text for the composer to judge.
/// - Line numbers, in errors and on each `MotifSpec`, are 1-based.
pub struct MotifReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read motif file: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] CassetteError),
}

impl<R: BufRead> MotifReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0 }
    }

    /// Reads the whole file, stopping at the first bad line.
    pub fn read_all(self) -> Result<Vec<MotifSpec>, ReadError> {
        self.collect()
    }

    fn parse_line(&self, line: &str) -> Result<MotifSpec, CassetteError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [motif, rule] if !motif.is_empty() => {
                Ok(MotifSpec::new(motif.to_ascii_uppercase(), *rule).at_line(self.line_no))
            }
            [_, _] => Err(CassetteError::MotifFile {
                line: self.line_no,
                reason: "empty motif".to_string(),
            }),
            _ => Err(CassetteError::MotifFile {
                line: self.line_no,
                reason: format!("expected 'MOTIF,RULE' but found {} field(s)", fields.len()),
            }),
        }
    }
}

impl<R: BufRead> Iterator for MotifReader<R> {
    type Item = Result<MotifSpec, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw_line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ReadError::Io(e))),
            };
            self.line_no += 1;

            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(self.parse_line(line).map_err(ReadError::Parse));
        }
    }
}
