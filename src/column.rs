/*!
Resolves a single alignment column into at most one consensus symbol.
The primary's own call is kept unless the combined vote across all sequences is strictly more specific.

# Example usage
```rust
use gapfill_con::column::ColumnVotes;
use gapfill_con::consensus_config::ConsensusConfig;

let config = ConsensusConfig::default();

// primary has a gap, two secondaries agree on A
let votes = ColumnVotes::from_column(b'-', b"AA".iter().cloned());
assert_eq!(votes.resolve(&config), Some(b'A'));

// primary is confident, so it wins over the mixed secondaries
let votes = ColumnVotes::from_column(b'C', b"TT".iter().cloned());
assert_eq!(votes.resolve(&config), Some(b'C'));
```
*/

use log::trace;

use crate::consensus_config::ConsensusConfig;
use crate::iupac::{is_full_ambiguity, mask_to_symbol, nucleotide_mask, quality_tier, QualityTier, NUCLEOTIDES, FULL_AMBIGUITY};

/// Vote counts in (A, T, G, C) order
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoteVector {
    counts: [usize; 4]
}

impl VoteVector {
    /// Adds one vote for every nucleotide the symbol is compatible with.
    /// Gaps, full ambiguity, and unrecognized symbols add nothing.
    pub fn add(&mut self, symbol: u8) {
        let mask = nucleotide_mask(symbol).unwrap_or(0);
        for (i, count) in self.counts.iter_mut().enumerate() {
            if mask & (1 << i) != 0 {
                *count += 1;
            }
        }
    }

    /// Returns the mask of all nucleotides tied for the maximum vote.
    /// A vector with no votes returns the empty mask.
    pub fn max_mask(&self) -> u8 {
        let max_count = self.counts.iter().cloned().max().unwrap_or(0);
        if max_count == 0 {
            return 0;
        }

        self.counts.iter()
            .enumerate()
            .filter(|&(_i, &c)| c == max_count)
            .fold(0, |mask, (i, _c)| mask | (1 << i))
    }

    /// Returns the IUPAC code for the nucleotides tied for the maximum vote, or the error sentinel if there are no votes.
    pub fn max_symbol(&self) -> u8 {
        mask_to_symbol(self.max_mask())
    }

    /// Returns the vote count for a nucleotide, or 0 if it is not one of A, T, G, C
    pub fn count(&self, nucleotide: u8) -> usize {
        NUCLEOTIDES.iter()
            .position(|&n| n == nucleotide)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    pub fn counts(&self) -> &[usize; 4] {
        &self.counts
    }
}

/// All the evidence gathered for a single column
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnVotes {
    /// The primary's own symbol at this column
    primary_symbol: u8,
    /// Votes from every sequence, primary included
    total: VoteVector,
    /// Votes from the secondary sequences only
    secondary: VoteVector,
    /// 1 if the primary holds `N` or `?`
    primary_ambiguous: usize,
    /// The number of secondaries holding `N` or `?`
    secondary_ambiguous: usize
}

impl ColumnVotes {
    /// Gathers the votes for a column.
    /// # Arguments
    /// * `primary_symbol` - the primary's symbol at this column
    /// * `secondary_symbols` - the symbols of each secondary sequence at this column
    pub fn from_column(primary_symbol: u8, secondary_symbols: impl IntoIterator<Item = u8>) -> ColumnVotes {
        let mut votes = ColumnVotes {
            primary_symbol,
            primary_ambiguous: is_full_ambiguity(primary_symbol) as usize,
            ..Default::default()
        };
        votes.total.add(primary_symbol);

        for symbol in secondary_symbols {
            votes.total.add(symbol);
            votes.secondary.add(symbol);
            if is_full_ambiguity(symbol) {
                votes.secondary_ambiguous += 1;
            }
        }
        votes
    }

    /// The symbol implied by the combined vote
    pub fn total_symbol(&self) -> u8 {
        self.total.max_symbol()
    }

    /// Combined `N`/`?` count across the primary and secondaries
    pub fn ambiguous_count(&self) -> usize {
        self.primary_ambiguous + self.secondary_ambiguous
    }

    /// Resolves the column to a single symbol, or None if the column should be dropped.
    /// # Arguments
    /// * `config` - provides the `N` support requirement and the ambiguity tier placement
    pub fn resolve(&self, config: &ConsensusConfig) -> Option<u8> {
        let total_symbol = self.total_symbol();
        let total_quality = quality_tier(total_symbol, config.ambiguity_tier);
        let primary_quality = quality_tier(self.primary_symbol, config.ambiguity_tier);

        let call = if total_quality == QualityTier::Uninformative && primary_quality == QualityTier::Uninformative {
            // nothing informative anywhere, only commit to N with enough corroborating no-calls
            if self.ambiguous_count() >= config.min_ambiguous_support {
                Some(FULL_AMBIGUITY)
            } else {
                None
            }
        } else if total_quality > primary_quality {
            Some(total_symbol)
        } else {
            Some(self.primary_symbol)
        };

        trace!(
            "Column primary={} ({:?}), total={} ({:?}), ambiguous={} => {:?}",
            self.primary_symbol as char, primary_quality, total_symbol as char, total_quality,
            self.ambiguous_count(), call.map(|c| c as char)
        );
        call
    }

    // Getters
    pub fn primary_symbol(&self) -> u8 {
        self.primary_symbol
    }

    pub fn total(&self) -> &VoteVector {
        &self.total
    }

    pub fn secondary(&self) -> &VoteVector {
        &self.secondary
    }
}
