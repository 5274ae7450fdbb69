// src/assembler.rs
// PIPELINE: motif specs -> parts list -> distinct orders -> linked cassettes.
//
// Cassette layout: [Linker][Motif][Linker][Motif]...
// Every linker is drawn fresh, so two cassettes sharing a motif order still
// differ in their linkers.

use std::collections::HashSet;

use rand::Rng;

use crate::composer::{CassetteComposer, Composition, MotifSpec, Notice};
use crate::error::{CassetteError, Result};
use crate::expander::Expander;
use crate::shuffler::AdjacencyShuffler;
use crate::Budget;

/// Copy numbers and layout of a design run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyParams {
    /// Copies of each variant of a rule 1 motif.
    pub copy_rule1: usize,
    /// Total copies of a rule 2 motif.
    pub copy_rule2: usize,
    /// Random bases placed before every motif.
    pub linker_len: usize,
    /// Number of distinct cassettes to produce.
    pub nresults: usize,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self { copy_rule1: 10, copy_rule2: 12, linker_len: 1, nresults: 1 }
    }
}

/// One finished cassette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassetteResult {
    pub index: usize,
    /// Motif order used to build `sequence`.
    pub motifs: Vec<String>,
    pub sequence: String,
}

impl CassetteResult {
    pub fn fasta_entry(&self) -> String {
        format!(
            ">cassette_{} motifs={} length={}\n{}\n",
            self.index,
            self.motifs.len(),
            self.sequence.len(),
            self.sequence
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    pub results: Vec<CassetteResult>,
    pub notices: Vec<Notice>,
    /// Size of the parts list every cassette is built from.
    pub parts: usize,
    /// Permutations drawn across all shuffles.
    pub shuffle_attempts: usize,
    /// Shuffles run, including those that repeated an earlier order.
    pub orderings_drawn: usize,
}

pub struct CassetteAssembler;

impl CassetteAssembler {
    /// Composes the parts list for `specs` and arranges it into cassettes.
    pub fn assemble<R: Rng + ?Sized>(
        specs: &[MotifSpec],
        params: &AssemblyParams,
        budget: &Budget,
        rng: &mut R,
    ) -> Result<AssemblyReport> {
        let composition = CassetteComposer::build_multiset(
            specs,
            params.copy_rule1,
            params.copy_rule2,
            budget,
            rng,
        )?;
        Self::arrange(composition, params, budget, rng)
    }

    /// Arranges an already composed parts list into `params.nresults`
    /// distinct cassettes.
    ///
    /// Callers that must show composition notices even when no arrangement
    /// exists should compose first, report, then call this.
    pub fn arrange<R: Rng + ?Sized>(
        composition: Composition,
        params: &AssemblyParams,
        budget: &Budget,
        rng: &mut R,
    ) -> Result<AssemblyReport> {
        let parts = composition.parts;

        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut orderings: Vec<Vec<String>> = Vec::with_capacity(params.nresults);
        let mut shuffle_attempts = 0;
        let mut orderings_drawn = 0;
        let mut stale = 0;

        while orderings.len() < params.nresults {
            if stale >= budget.stale_orderings {
                return Err(CassetteError::OrderingsExhausted {
                    requested: params.nresults,
                    found: orderings.len(),
                    attempts: orderings_drawn,
                });
            }

            let outcome = AdjacencyShuffler::shuffle(&parts, budget.shuffle_attempts, rng)?;
            orderings_drawn += 1;
            shuffle_attempts += outcome.attempts;

            if seen.contains(&outcome.order) {
                stale += 1;
            } else {
                stale = 0;
                seen.insert(outcome.order.clone());
                orderings.push(outcome.order);
            }
        }

        let results = orderings
            .into_iter()
            .enumerate()
            .map(|(index, motifs)| {
                let sequence = Self::link(&motifs, params.linker_len, rng);
                CassetteResult { index, motifs, sequence }
            })
            .collect();

        Ok(AssemblyReport {
            results,
            notices: composition.notices,
            parts: parts.len(),
            shuffle_attempts,
            orderings_drawn,
        })
    }

    /// Joins `motifs` into one strand, each preceded by a fresh random linker.
    pub fn link<R: Rng + ?Sized>(motifs: &[String], linker_len: usize, rng: &mut R) -> String {
        let total = motifs.iter().map(|m| m.len() + linker_len).sum();
        let mut strand = String::with_capacity(total);
        for motif in motifs {
            strand.push_str(&Expander::random_linker(linker_len, rng));
            strand.push_str(motif);
        }
        strand
    }
}
