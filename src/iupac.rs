// src/iupac.rs
// THE ALPHABET: concrete bases and the IUPAC ambiguity table.
// Every ambiguity symbol maps to a fixed, ordered subset of {A,C,G,T}.
// The order of each subset defines the order of exhaustive expansion.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A, C, G, T,
}

impl Base {
    pub fn to_char(self) -> char {
        match self {
            Base::A => 'A', Base::C => 'C', Base::G => 'G', Base::T => 'T',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A), 'C' => Some(Base::C),
            'G' => Some(Base::G), 'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn all() -> [Base; 4] {
        [Base::A, Base::C, Base::G, Base::T]
    }
}

/// The fully degenerate symbol.
pub const FULLY_DEGENERATE: char = 'N';

pub struct Iupac;

impl Iupac {
    /// Expansion set of an ambiguity symbol, or `None` for anything else
    /// (concrete bases and unknown symbols alike). Case-insensitive.
    pub fn expansions(symbol: char) -> Option<&'static [Base]> {
        use Base::*;
        let set: &'static [Base] = match symbol.to_ascii_uppercase() {
            'R' => &[A, G],
            'Y' => &[C, T],
            'S' => &[G, C],
            'W' => &[A, T],
            'K' => &[G, T],
            'M' => &[A, C],
            'B' => &[C, G, T],
            'D' => &[A, G, T],
            'H' => &[A, C, T],
            'V' => &[A, C, G],
            'N' => &[A, T, C, G],
            _ => return None,
        };
        Some(set)
    }

    pub fn is_ambiguous(symbol: char) -> bool {
        Self::expansions(symbol).is_some()
    }

    /// True when `seq` holds nothing but A, C, G and T.
    pub fn is_concrete(seq: &str) -> bool {
        seq.chars().all(|c| Base::from_char(c).is_some())
    }

    /// Size of the expansion space of `seq`: the product of the expansion set
    /// sizes of its ambiguous positions. Unknown symbols count as concrete.
    /// Saturates at `u64::MAX` for absurdly degenerate input.
    pub fn count_variants(seq: &str) -> u64 {
        seq.chars()
            .filter_map(Self::expansions)
            .fold(1u64, |acc, set| acc.saturating_mul(set.len() as u64))
    }
}
