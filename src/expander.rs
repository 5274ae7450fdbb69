// src/expander.rs
// CORE LOGIC: De-ambiguation of IUPAC motifs.
// Exhaustive expansion walks the Cartesian product of ambiguity choices.
// Random expansion draws one base per ambiguous position, independently.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::iupac::{Base, Iupac, FULLY_DEGENERATE};

pub struct Expander;

impl Expander {
    /// Draws one random variant of `seq` (uppercased).
    ///
    /// Each ambiguous position is resolved uniformly from its expansion set,
    /// except `N`, which is left as `N`. Exhaustive expansion and the variant
    /// counter both expand `N` to all four bases, so a motif containing `N`
    /// can produce fewer distinct random variants than its count suggests.
    pub fn random_variant<R: Rng + ?Sized>(seq: &str, rng: &mut R) -> String {
        seq.chars()
            .map(|c| c.to_ascii_uppercase())
            .map(|c| {
                if c == FULLY_DEGENERATE {
                    return c;
                }
                match Iupac::expansions(c).and_then(|set| set.choose(rng)) {
                    Some(base) => base.to_char(),
                    None => c,
                }
            })
            .collect()
    }

    /// Every concrete variant of `seq` (uppercased), in table order.
    ///
    /// The first ambiguous position varies slowest. The result length always
    /// equals `Iupac::count_variants(seq)`.
    pub fn all_variants(seq: &str) -> Vec<String> {
        let symbols: Vec<char> = seq.chars().map(|c| c.to_ascii_uppercase()).collect();
        let hint = usize::try_from(Iupac::count_variants(seq)).unwrap_or(0).min(1 << 16);
        let mut variants = Vec::with_capacity(hint);
        Self::expand_from(&symbols, 0, &mut variants);
        variants
    }

    fn expand_from(symbols: &[char], start: usize, out: &mut Vec<String>) {
        let next_ambiguity = symbols[start..]
            .iter()
            .enumerate()
            .find_map(|(offset, &c)| Iupac::expansions(c).map(|set| (start + offset, set)));

        match next_ambiguity {
            None => out.push(symbols.iter().collect()),
            Some((pos, set)) => {
                for base in set {
                    let mut resolved = symbols.to_vec();
                    resolved[pos] = base.to_char();
                    Self::expand_from(&resolved, pos + 1, out);
                }
            }
        }
    }

    /// Random linker of `len` bases, each uniform over A, C, G and T.
    pub fn random_linker<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
        let bases = Base::all();
        (0..len)
            .map(|_| bases[rng.gen_range(0..bases.len())].to_char())
            .collect()
    }
}
