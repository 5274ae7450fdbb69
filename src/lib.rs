// src/lib.rs
pub mod error;
pub mod iupac;
pub mod expander;
pub mod sampler;
pub mod composer;
pub mod shuffler;
pub mod assembler;
pub mod motif_file;

pub use error::{CassetteError, Result};

/// Rule 1 motifs expanding past this many variants trigger a warning.
pub const LARGE_EXPANSION_THRESHOLD: u64 = 10;

/// Iteration limits for the engine's retry loops.
///
/// Shuffling, rejection sampling and the search for distinct orderings all
/// retry until they succeed. These caps turn a hopeless search into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Restarts allowed per shuffle.
    pub shuffle_attempts: usize,
    /// Random draws allowed per unique-sampling call.
    pub sample_draws: usize,
    /// Consecutive repeated orderings tolerated before giving up.
    pub stale_orderings: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            shuffle_attempts: 10_000,
            sample_draws: 1_000_000,
            stale_orderings: 1_000,
        }
    }
}
