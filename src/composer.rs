// src/composer.rs
// CASSETTE PARTS LIST
// Turns (motif, rule) pairs into a flat list of concrete motif instances.
//
// Rule 1: every variant, `copy_rule1` times each.
// Rule 2: `copy_rule2` instances in total, spread over the variants as evenly
//         as integer division allows.

use std::fmt;

use rand::Rng;

use crate::error::{CassetteError, Result};
use crate::expander::Expander;
use crate::iupac::Iupac;
use crate::sampler::UniqueSampler;
use crate::{Budget, LARGE_EXPANSION_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Rule `1`: each variant gets its own copies.
    EachVariant,
    /// Rule `2`: one copy budget shared by all variants.
    SharedTotal,
}

impl Rule {
    pub fn parse(motif: &str, raw: &str) -> Result<Self> {
        match raw.trim() {
            "1" => Ok(Rule::EachVariant),
            "2" => Ok(Rule::SharedTotal),
            other => Err(CassetteError::InvalidRule {
                motif: motif.to_string(),
                rule: other.to_string(),
            }),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Rule::EachVariant => 1,
            Rule::SharedTotal => 2,
        }
    }
}

/// One input line: a motif and its unvalidated rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSpec {
    pub motif: String,
    pub rule: String,
    /// 1-based line in the motif file, when read from one.
    pub line: Option<usize>,
}

impl MotifSpec {
    pub fn new(motif: impl Into<String>, rule: impl Into<String>) -> Self {
        Self { motif: motif.into(), rule: rule.into(), line: None }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Advisory produced while composing. Never affects the parts list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Summary { motif: String, rule: Rule, variants: u64, copies: usize },
    LargeExpansion { motif: String, variants: u64, copies: usize },
    /// `index` is the 0-based position in the spec list.
    InvalidRule { index: usize, line: Option<usize>, motif: String, rule: String },
    /// Random draws leave `N` unresolved, so these parts still carry it.
    UnresolvedParts { motif: String, parts: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Summary { motif, rule: rule @ Rule::EachVariant, variants, copies } => write!(
                f,
                "{}: rule {}: {} variants which will each be added in {} copies. {} total.",
                motif, rule.number(), variants, copies, variants.saturating_mul(*copies as u64)
            ),
            Notice::Summary { motif, rule: rule @ Rule::SharedTotal, variants, copies } => write!(
                f,
                "{}: rule {}: {} variants of which {} copies will be picked at random.",
                motif, rule.number(), variants, copies
            ),
            Notice::LargeExpansion { motif, variants, copies } => write!(
                f,
                "{} expands into {} variants with {} copies each: {} targets for a single methyltransferase.",
                motif, variants, copies, variants.saturating_mul(*copies as u64)
            ),
            Notice::InvalidRule { index, line, motif, rule } => {
                write!(f, "Rule not recognized for motif '{}' ", motif)?;
                match line {
                    Some(line) => write!(f, "on line {}", line)?,
                    None => write!(f, "at entry {}", index + 1)?,
                }
                write!(f, ": '{}'. Rule must be either 1 or 2.", rule)
            }
            Notice::UnresolvedParts { motif, parts } => write!(
                f,
                "{}: {} randomly picked variants still contain N and will reach the cassette as-is.",
                motif, parts
            ),
        }
    }
}

/// Flat parts list plus the advisories raised while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub parts: Vec<String>,
    pub notices: Vec<Notice>,
}

pub struct CassetteComposer;

impl CassetteComposer {
    /// Builds the motif multiset for all `specs`, in input order.
    ///
    /// Motifs with an unrecognized rule are skipped with a notice. Sampling
    /// failures abort the whole build.
    pub fn build_multiset<R: Rng + ?Sized>(
        specs: &[MotifSpec],
        copy_rule1: usize,
        copy_rule2: usize,
        budget: &Budget,
        rng: &mut R,
    ) -> Result<Composition> {
        let mut composition = Composition::default();

        for (index, spec) in specs.iter().enumerate() {
            let rule = match Rule::parse(&spec.motif, &spec.rule) {
                Ok(rule) => rule,
                Err(_) => {
                    composition.notices.push(Notice::InvalidRule {
                        index,
                        line: spec.line,
                        motif: spec.motif.clone(),
                        rule: spec.rule.clone(),
                    });
                    continue;
                }
            };

            let variants = Iupac::count_variants(&spec.motif);
            let copies = match rule {
                Rule::EachVariant => copy_rule1,
                Rule::SharedTotal => copy_rule2,
            };
            composition.notices.push(Notice::Summary {
                motif: spec.motif.clone(),
                rule,
                variants,
                copies,
            });

            match rule {
                Rule::EachVariant => {
                    if variants > LARGE_EXPANSION_THRESHOLD {
                        composition.notices.push(Notice::LargeExpansion {
                            motif: spec.motif.clone(),
                            variants,
                            copies,
                        });
                    }
                    composition.parts.extend(Self::each_variant(&spec.motif, copies));
                }
                Rule::SharedTotal => {
                    let parts = Self::shared_total(&spec.motif, variants, copies, budget, rng)?;
                    let unresolved = parts.iter().filter(|p| !Iupac::is_concrete(p)).count();
                    if unresolved > 0 {
                        composition.notices.push(Notice::UnresolvedParts {
                            motif: spec.motif.clone(),
                            parts: unresolved,
                        });
                    }
                    composition.parts.extend(parts);
                }
            }
        }

        Ok(composition)
    }

    fn each_variant(motif: &str, copies: usize) -> Vec<String> {
        let all = Expander::all_variants(motif);
        let mut parts = Vec::with_capacity(all.len() * copies);
        for _ in 0..copies {
            parts.extend(all.iter().cloned());
        }
        parts
    }

    // The top-up picks are distinct among themselves only; they are not
    // checked against the full copies laid down before them.
    fn shared_total<R: Rng + ?Sized>(
        motif: &str,
        variants: u64,
        total: usize,
        budget: &Budget,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if variants > total as u64 {
            let picks = UniqueSampler::sample_unique(motif, total, budget.sample_draws, rng)?;
            return Ok(picks.into_iter().collect());
        }

        let full_copies = total / variants as usize;
        let mut parts = Self::each_variant(motif, full_copies);
        let remainder = total - parts.len();
        let top_up = UniqueSampler::sample_unique(motif, remainder, budget.sample_draws, rng)?;
        parts.extend(top_up);
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn compose(specs: &[MotifSpec], r1: usize, r2: usize) -> Result<Composition> {
        let mut rng = StdRng::seed_from_u64(11);
        CassetteComposer::build_multiset(specs, r1, r2, &Budget::default(), &mut rng)
    }

    fn occurrences(parts: &[String], motif: &str) -> usize {
        parts.iter().filter(|p| p.as_str() == motif).count()
    }

    #[test]
    fn parses_rules() {
        assert_eq!(Rule::parse("A", "1").unwrap(), Rule::EachVariant);
        assert_eq!(Rule::parse("A", " 2 ").unwrap(), Rule::SharedTotal);
        assert!(matches!(Rule::parse("A", "3"), Err(CassetteError::InvalidRule { .. })));
    }

    #[test]
    fn rule_one_concrete_motif() {
        let out = compose(&[MotifSpec::new("ACGT", "1")], 3, 12).unwrap();
        assert_eq!(out.parts, vec!["ACGT"; 3]);
    }

    #[test]
    fn rule_one_copies_every_variant() {
        let out = compose(&[MotifSpec::new("GATR", "1")], 2, 12).unwrap();
        assert_eq!(out.parts.len(), 4);
        assert_eq!(occurrences(&out.parts, "GATA"), 2);
        assert_eq!(occurrences(&out.parts, "GATG"), 2);
    }

    #[test]
    fn rule_one_warns_on_large_expansion() {
        let out = compose(&[MotifSpec::new("RYSW", "1")], 1, 12).unwrap();
        assert_eq!(out.parts.len(), 16);
        assert!(out
            .notices
            .iter()
            .any(|n| matches!(n, Notice::LargeExpansion { variants: 16, .. })));

        let small = compose(&[MotifSpec::new("RYS", "1")], 1, 12).unwrap();
        assert!(!small.notices.iter().any(|n| matches!(n, Notice::LargeExpansion { .. })));
    }

    #[test]
    fn rule_two_spreads_evenly_over_few_variants() {
        // 4 variants, 10 copies: two full rounds plus 2 distinct extras.
        let out = compose(&[MotifSpec::new("RY", "2")], 10, 10).unwrap();
        assert_eq!(out.parts.len(), 10);
        let mut counts: Vec<usize> = ["AC", "AT", "GC", "GT"]
            .iter()
            .map(|v| occurrences(&out.parts, v))
            .collect();
        counts.sort();
        assert_eq!(counts, vec![2, 2, 3, 3]);
    }

    #[test]
    fn rule_two_exact_multiple_has_no_top_up() {
        let out = compose(&[MotifSpec::new("R", "2")], 10, 6).unwrap();
        assert_eq!(occurrences(&out.parts, "A"), 3);
        assert_eq!(occurrences(&out.parts, "G"), 3);
    }

    #[test]
    fn rule_two_samples_distinct_when_space_is_large() {
        let out = compose(&[MotifSpec::new("RYSWK", "2")], 10, 12).unwrap();
        assert_eq!(out.parts.len(), 12);
        let mut unique = out.parts.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn invalid_rule_is_skipped_not_fatal() {
        let specs = [
            MotifSpec::new("GATC", "3"),
            MotifSpec::new("CCGG", "1"),
        ];
        let out = compose(&specs, 2, 12).unwrap();
        assert_eq!(out.parts, vec!["CCGG", "CCGG"]);
        assert_eq!(
            out.notices[0],
            Notice::InvalidRule { index: 0, line: None, motif: "GATC".into(), rule: "3".into() }
        );
        assert_eq!(
            out.notices[0].to_string(),
            "Rule not recognized for motif 'GATC' at entry 1: '3'. Rule must be either 1 or 2."
        );
    }

    #[test]
    fn invalid_rule_reports_file_line() {
        let out = compose(&[MotifSpec::new("GATC", "x").at_line(5)], 1, 12).unwrap();
        assert_eq!(
            out.notices[0].to_string(),
            "Rule not recognized for motif 'GATC' on line 5: 'x'. Rule must be either 1 or 2."
        );
    }

    #[test]
    fn sampled_n_motif_keeps_n_and_says_so() {
        // 8 variants > 2 copies: both parts come from random draws, which leave N alone.
        let out = compose(&[MotifSpec::new("GANTCR", "2")], 10, 2).unwrap();
        let mut parts = out.parts.clone();
        parts.sort();
        assert_eq!(parts, vec!["GANTCA", "GANTCG"]);
        assert!(out
            .notices
            .contains(&Notice::UnresolvedParts { motif: "GANTCR".into(), parts: 2 }));
    }

    #[test]
    fn exhaustive_n_motif_is_fully_resolved() {
        // 4 variants <= 4 copies: exhaustive expansion resolves N.
        let out = compose(&[MotifSpec::new("GANTC", "2")], 10, 4).unwrap();
        assert!(out.parts.iter().all(|p| Iupac::is_concrete(p)));
        assert!(!out.notices.iter().any(|n| matches!(n, Notice::UnresolvedParts { .. })));
    }

    #[test]
    fn concatenates_in_input_order() {
        let specs = [MotifSpec::new("AAAA", "1"), MotifSpec::new("CCCC", "2")];
        let out = compose(&specs, 1, 2).unwrap();
        assert_eq!(out.parts, vec!["AAAA", "CCCC", "CCCC"]);
    }

    #[test]
    fn sampling_failure_propagates() {
        let mut rng = StdRng::seed_from_u64(0);
        let budget = Budget { sample_draws: 100, ..Budget::default() };
        let err = CassetteComposer::build_multiset(
            &[MotifSpec::new("GANNTC", "2")],
            10,
            12,
            &budget,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CassetteError::SamplingExhausted { requested: 12, .. }));
    }

    #[test]
    fn rule_numbers() {
        assert_eq!(Rule::EachVariant.number(), 1);
        assert_eq!(Rule::SharedTotal.number(), 2);
    }

    #[test]
    fn summary_text_matches_rule() {
        let out = compose(&[MotifSpec::new("GATR", "1")], 10, 12).unwrap();
        assert_eq!(
            out.notices[0].to_string(),
            "GATR: rule 1: 2 variants which will each be added in 10 copies. 20 total."
        );
    }
}
