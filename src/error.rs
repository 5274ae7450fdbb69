// src/error.rs
// Failure modes of the cassette engine.
// Capacity and feasibility errors propagate to the caller. Invalid rules are
// absorbed per motif by the composer and only surface through `Rule::parse`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CassetteError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CassetteError {
    /// More distinct variants were requested than the motif can expand to.
    #[error("cannot find {requested} unique variants of {motif}: {available} is max")]
    Capacity {
        motif: String,
        requested: u64,
        available: u64,
    },

    /// Rule column was neither `1` nor `2`.
    #[error("rule not recognized for motif '{motif}': '{rule}' (must be 1 or 2)")]
    InvalidRule { motif: String, rule: String },

    /// Rejection sampling ran out of draws before collecting enough distinct variants.
    #[error("gave up sampling {motif} after {draws} draws: {found} of {requested} unique variants found")]
    SamplingExhausted {
        motif: String,
        requested: usize,
        found: usize,
        draws: usize,
    },

    /// No ordering without adjacent repeats was found for the motif list.
    #[error("no valid order for {items} motifs ('{most_common}' occurs {occurrences} times) after {attempts} attempts")]
    InfeasibleArrangement {
        items: usize,
        most_common: String,
        occurrences: usize,
        attempts: usize,
    },

    /// Fewer distinct orderings exist (or were found) than results requested.
    #[error("found only {found} of {requested} distinct cassette orders after {attempts} shuffles")]
    OrderingsExhausted {
        requested: usize,
        found: usize,
        attempts: usize,
    },

    /// Malformed line in a motif file.
    #[error("motif file line {line}: {reason}")]
    MotifFile { line: usize, reason: String },
}
