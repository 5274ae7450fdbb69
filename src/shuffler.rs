// src/shuffler.rs
// ADJACENCY SHUFFLE: random order with no two equal neighbours.
//
// Each attempt starts from a fresh random permutation. Elements sitting next
// to an equal twin are pulled out and re-inserted at the first legal gap,
// scanning left to right. An attempt that strands an element is dropped and
// a new permutation is drawn.
//
// NOTE: first-fit repair places the most frequent elements toward the left
// end of the cassette.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{CassetteError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome<T> {
    pub order: Vec<T>,
    /// Number of permutations drawn, including the successful one.
    pub attempts: usize,
}

pub struct AdjacencyShuffler;

impl AdjacencyShuffler {
    /// An arrangement without equal neighbours exists iff no value occurs
    /// more than `ceil(len / 2)` times.
    pub fn is_feasible<T: Eq + Hash>(items: &[T]) -> bool {
        match Self::most_common(items) {
            Some((_, occurrences)) => occurrences <= (items.len() + 1) / 2,
            None => true,
        }
    }

    /// Orders `items` so no two consecutive elements are equal.
    ///
    /// Fails fast when no such order exists, and after `max_attempts`
    /// permutations otherwise.
    pub fn shuffle<T, R>(items: &[T], max_attempts: usize, rng: &mut R) -> Result<ShuffleOutcome<T>>
    where
        T: Clone + Eq + Hash + Display,
        R: Rng + ?Sized,
    {
        let infeasible = |attempts: usize| {
            let (most_common, occurrences) = Self::most_common(items)
                .map(|(item, n)| (item.to_string(), n))
                .unwrap_or_default();
            CassetteError::InfeasibleArrangement {
                items: items.len(),
                most_common,
                occurrences,
                attempts,
            }
        };

        if !Self::is_feasible(items) {
            return Err(infeasible(0));
        }

        'attempts: for attempt in 1..=max_attempts {
            let mut order = items.to_vec();
            order.shuffle(rng);

            let bad_positions: Vec<usize> = order
                .windows(2)
                .enumerate()
                .filter(|(_, pair)| pair[0] == pair[1])
                .map(|(i, _)| i)
                .collect();

            if bad_positions.is_empty() {
                return Ok(ShuffleOutcome { order, attempts: attempt });
            }

            // Highest index first keeps the remaining positions valid.
            let misplaced: Vec<T> = bad_positions
                .iter()
                .rev()
                .map(|&pos| order.remove(pos))
                .collect();

            for item in misplaced {
                match Self::insertion_point(&order, &item) {
                    Some(slot) => order.insert(slot, item),
                    None => continue 'attempts,
                }
            }

            return Ok(ShuffleOutcome { order, attempts: attempt });
        }

        Err(infeasible(max_attempts))
    }

    /// First slot where `item` has no equal neighbour: the front, the back,
    /// or between positions `i - 1` and `i`.
    fn insertion_point<T: PartialEq>(order: &[T], item: &T) -> Option<usize> {
        if order.is_empty() {
            return Some(0);
        }
        let last = order.len() - 1;
        for i in 0..order.len() {
            if i == 0 {
                if order[0] != *item {
                    return Some(0);
                }
            } else if i == last {
                if order[last] != *item {
                    return Some(order.len());
                }
            } else if order[i] != *item && order[i - 1] != *item {
                return Some(i);
            }
        }
        None
    }

    // Ties go to the value seen first, so the result is stable for a given input.
    fn most_common<T: Eq + Hash>(items: &[T]) -> Option<(&T, usize)> {
        let mut counts: HashMap<&T, usize> = HashMap::new();
        let mut best: Option<(&T, usize)> = None;
        for item in items {
            let n = counts.entry(item).or_insert(0);
            *n += 1;
            if best.map_or(true, |(_, top)| *n > top) {
                best = Some((item, *n));
            }
        }
        best
    }
}

/// True when no two consecutive elements are equal.
pub fn has_no_adjacent_repeats<T: PartialEq>(order: &[T]) -> bool {
    order.windows(2).all(|pair| pair[0] != pair[1])
}
