use std::collections::{BTreeSet, HashMap};

use metmap::expander::Expander;
use metmap::iupac::Iupac;
use metmap::sampler::UniqueSampler;
use metmap::shuffler::{has_no_adjacent_repeats, AdjacencyShuffler};
use metmap::CassetteError;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn iupac_seq(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('A'), Just('C'), Just('G'), Just('T'),
            Just('R'), Just('Y'), Just('S'), Just('W'), Just('K'), Just('M'),
            Just('B'), Just('D'), Just('H'), Just('V'), Just('N'),
        ],
        0..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn without_n(max_len: usize) -> impl Strategy<Value = String> {
    iupac_seq(max_len).prop_map(|s| s.replace('N', "V"))
}

fn tally(items: &[u8]) -> HashMap<u8, usize> {
    let mut counts = HashMap::new();
    for &item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn expansion_size_matches_count(seq in iupac_seq(6)) {
        let variants = Expander::all_variants(&seq);
        prop_assert_eq!(variants.len() as u64, Iupac::count_variants(&seq));
        for v in &variants {
            prop_assert_eq!(v.len(), seq.len());
            prop_assert!(Iupac::is_concrete(v));
        }
    }

    #[test]
    fn random_variant_is_an_expansion(seq in without_n(6), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let all: BTreeSet<String> = Expander::all_variants(&seq).into_iter().collect();
        let v = Expander::random_variant(&seq, &mut rng);
        prop_assert!(all.contains(&v));
    }

    #[test]
    fn unique_sample_is_distinct_subset(seq in without_n(5), frac in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = Iupac::count_variants(&seq) as usize;
        let n = (count as f64 * frac).floor() as usize;
        let all: BTreeSet<String> = Expander::all_variants(&seq).into_iter().collect();
        let picks = UniqueSampler::sample_unique(&seq, n, 1_000_000, &mut rng).unwrap();
        prop_assert_eq!(picks.len(), n);
        prop_assert!(picks.is_subset(&all));
    }

    #[test]
    fn oversized_sample_is_capacity_error(seq in iupac_seq(4), extra in 1usize..5, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = Iupac::count_variants(&seq) as usize;
        let err = UniqueSampler::sample_unique(&seq, count + extra, 1_000, &mut rng).unwrap_err();
        let is_capacity = matches!(err, CassetteError::Capacity { .. });
        prop_assert!(is_capacity);
    }

    #[test]
    fn feasible_shuffles_are_valid_permutations(
        items in proptest::collection::vec(0u8..5, 0..24),
        seed in any::<u64>(),
    ) {
        prop_assume!(AdjacencyShuffler::is_feasible(&items));
        let mut rng = StdRng::seed_from_u64(seed);
        let out = AdjacencyShuffler::shuffle(&items, 100_000, &mut rng).unwrap();
        prop_assert!(has_no_adjacent_repeats(&out.order));
        prop_assert_eq!(tally(&out.order), tally(&items));
    }

    #[test]
    fn infeasible_shuffles_fail_fast(n in 2usize..12, others in 0usize..6, seed in any::<u64>()) {
        prop_assume!(n > (n + others + 1) / 2);
        let mut items = vec![0u8; n];
        items.extend((0..others).map(|i| 1 + i as u8));
        let mut rng = StdRng::seed_from_u64(seed);
        let err = AdjacencyShuffler::shuffle(&items, 10, &mut rng).unwrap_err();
        let fast = matches!(err, CassetteError::InfeasibleArrangement { attempts: 0, .. });
        prop_assert!(fast);
    }
}
