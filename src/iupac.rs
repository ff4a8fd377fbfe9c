/*!
Static IUPAC lookup tables.
Every symbol is decomposed into a 4-bit nucleotide mask indexed in (A, T, G, C) order, and every non-empty mask maps back to exactly one IUPAC code.

# Example usage
```rust
use gapfill_con::consensus_config::AmbiguityTier;
use gapfill_con::iupac::{mask_to_symbol, nucleotide_mask, quality_tier, QualityTier};

// R is A or G
let mask = nucleotide_mask(b'R').unwrap();
assert_eq!(mask_to_symbol(mask), b'R');
assert_eq!(quality_tier(b'R', AmbiguityTier::WithGap), QualityTier::TwoWay);
```
*/

use crate::consensus_config::AmbiguityTier;

/// The alignment gap symbol
pub const GAP: u8 = b'-';
/// Full ambiguity, any of A, T, G, or C
pub const FULL_AMBIGUITY: u8 = b'N';
/// Unknown base, treated like `N`
pub const UNKNOWN: u8 = b'?';
/// Sentinel for a column with no nucleotide evidence at all
pub const ERROR_SYMBOL: u8 = b'E';

/// The nucleotide order used by every mask and vote vector
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'T', b'G', b'C'];

/// Maps a nucleotide mask (bit 0 = A, 1 = T, 2 = G, 3 = C) to its IUPAC code.
/// The empty mask has no code and maps to the error sentinel.
const MASK_TO_SYMBOL: [u8; 16] = [
    ERROR_SYMBOL, // 0000
    b'A', // 0001
    b'T', // 0010
    b'W', // 0011 - A/T
    b'G', // 0100
    b'R', // 0101 - A/G
    b'K', // 0110 - T/G
    b'D', // 0111 - A/T/G
    b'C', // 1000
    b'M', // 1001 - A/C
    b'Y', // 1010 - T/C
    b'H', // 1011 - A/T/C
    b'S', // 1100 - G/C
    b'V', // 1101 - A/G/C
    b'B', // 1110 - T/G/C
    b'N'  // 1111
];

/// Ordinal specificity of a symbol.
/// Higher is more specific, and the derived ordering is what the resolver compares.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum QualityTier {
    /// Gaps, the error sentinel, and by default `N`/`?`
    Uninformative = 0,
    /// `N`/`?` when they are ranked above gaps
    FullAmbiguity = 1,
    /// B, D, H, V
    ThreeWay = 2,
    /// R, Y, S, W, K, M
    TwoWay = 3,
    /// A, T, G, C
    Unambiguous = 4
}

impl QualityTier {
    /// Returns the numeric tier, 0 through 4
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// Returns the nucleotide mask for a symbol, or None if it is not part of the recognized alphabet.
/// Gaps, `N`, and `?` are recognized but carry an empty mask since they contribute no votes.
/// # Arguments
/// * `symbol` - the uppercase symbol to decompose
pub const fn nucleotide_mask(symbol: u8) -> Option<u8> {
    let mask = match symbol {
        b'A' => 0b0001,
        b'T' => 0b0010,
        b'G' => 0b0100,
        b'C' => 0b1000,
        b'W' => 0b0011,
        b'R' => 0b0101,
        b'K' => 0b0110,
        b'D' => 0b0111,
        b'M' => 0b1001,
        b'Y' => 0b1010,
        b'H' => 0b1011,
        b'S' => 0b1100,
        b'V' => 0b1101,
        b'B' => 0b1110,
        GAP | FULL_AMBIGUITY | UNKNOWN => 0b0000,
        _ => return None
    };
    Some(mask)
}

/// Returns true if the symbol is part of the recognized input alphabet
pub const fn is_valid_symbol(symbol: u8) -> bool {
    nucleotide_mask(symbol).is_some()
}

/// Returns true for the symbols that count as four-way ambiguity evidence (`N` and `?`)
pub const fn is_full_ambiguity(symbol: u8) -> bool {
    matches!(symbol, FULL_AMBIGUITY | UNKNOWN)
}

/// Returns the unique IUPAC code for a nucleotide mask.
/// Only the low four bits are used; the empty mask returns `ERROR_SYMBOL`.
pub const fn mask_to_symbol(mask: u8) -> u8 {
    MASK_TO_SYMBOL[(mask & 0b1111) as usize]
}

/// Returns the quality tier of a symbol.
/// Unrecognized symbols, including the error sentinel, are uninformative.
/// # Arguments
/// * `symbol` - the symbol to rank
/// * `ambiguity_tier` - where `N` and `?` are placed relative to gaps
pub fn quality_tier(symbol: u8, ambiguity_tier: AmbiguityTier) -> QualityTier {
    if is_full_ambiguity(symbol) {
        return match ambiguity_tier {
            AmbiguityTier::WithGap => QualityTier::Uninformative,
            AmbiguityTier::AboveGap => QualityTier::FullAmbiguity
        };
    }

    match nucleotide_mask(symbol).map(|m| m.count_ones()) {
        Some(1) => QualityTier::Unambiguous,
        Some(2) => QualityTier::TwoWay,
        Some(3) => QualityTier::ThreeWay,
        _ => QualityTier::Uninformative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bijection() {
        // every non-empty mask must round trip through its symbol
        for mask in 1..16u8 {
            let symbol = mask_to_symbol(mask);
            assert_ne!(symbol, ERROR_SYMBOL);
            if symbol == FULL_AMBIGUITY {
                // N carries no votes, so it is the one code that does not decompose back
                assert_eq!(mask, 0b1111);
            } else {
                assert_eq!(nucleotide_mask(symbol), Some(mask));
            }
        }

        // and no two masks share a code
        let mut codes: Vec<u8> = (0..16u8).map(mask_to_symbol).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn test_empty_mask_is_error() {
        assert_eq!(mask_to_symbol(0), ERROR_SYMBOL);
    }

    #[test]
    fn test_alphabet() {
        for &s in b"ATGCRYSWKMBDHVN-?".iter() {
            assert!(is_valid_symbol(s), "{}", s as char);
        }
        for &s in b"EXacgt*.".iter() {
            assert!(!is_valid_symbol(s), "{}", s as char);
        }
    }

    #[test]
    fn test_quality_tiers() {
        let policy = AmbiguityTier::WithGap;
        for &s in b"ATGC".iter() {
            assert_eq!(quality_tier(s, policy), QualityTier::Unambiguous);
        }
        for &s in b"RYSWKM".iter() {
            assert_eq!(quality_tier(s, policy), QualityTier::TwoWay);
        }
        for &s in b"BDHV".iter() {
            assert_eq!(quality_tier(s, policy), QualityTier::ThreeWay);
        }
        for &s in b"N-?E".iter() {
            assert_eq!(quality_tier(s, policy), QualityTier::Uninformative);
        }
        assert_eq!(QualityTier::Unambiguous.value(), 4);
        assert_eq!(QualityTier::Uninformative.value(), 0);
    }

    #[test]
    fn test_quality_above_gap() {
        let policy = AmbiguityTier::AboveGap;
        assert_eq!(quality_tier(b'N', policy), QualityTier::FullAmbiguity);
        assert_eq!(quality_tier(b'?', policy), QualityTier::FullAmbiguity);
        assert_eq!(quality_tier(b'-', policy), QualityTier::Uninformative);
        assert!(quality_tier(b'N', policy) > quality_tier(b'-', policy));
        assert!(quality_tier(b'N', policy) < quality_tier(b'B', policy));
    }
}
