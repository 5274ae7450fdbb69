// src/sampler.rs
// Draws N distinct variants of a motif without building the whole expansion
// space, unless every variant is requested anyway.

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{CassetteError, Result};
use crate::expander::Expander;
use crate::iupac::Iupac;

pub struct UniqueSampler;

impl UniqueSampler {
    /// Returns exactly `n` pairwise-distinct variants of `seq`.
    ///
    /// - `n` above the variant count fails with [`CassetteError::Capacity`].
    /// - `n` equal to the variant count returns the exhaustive expansion.
    /// - Otherwise random variants are drawn until `n` distinct ones are held,
    ///   giving up with [`CassetteError::SamplingExhausted`] after `max_draws`.
    pub fn sample_unique<R: Rng + ?Sized>(
        seq: &str,
        n: usize,
        max_draws: usize,
        rng: &mut R,
    ) -> Result<BTreeSet<String>> {
        let available = Iupac::count_variants(seq);
        let requested = n as u64;

        if requested > available {
            return Err(CassetteError::Capacity {
                motif: seq.to_string(),
                requested,
                available,
            });
        }
        if requested == available {
            return Ok(Expander::all_variants(seq).into_iter().collect());
        }

        let mut picks = BTreeSet::new();
        let mut draws = 0;
        while picks.len() < n {
            if draws >= max_draws {
                return Err(CassetteError::SamplingExhausted {
                    motif: seq.to_string(),
                    requested: n,
                    found: picks.len(),
                    draws,
                });
            }
            draws += 1;
            picks.insert(Expander::random_variant(seq, rng));
        }
        Ok(picks)
    }
}
