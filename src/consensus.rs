/*!
This module provides access to the ConsensusResolver, which merges a primary sequence with its aligned secondary sequences.
The primary is trimmed to its first and last non-gap columns, short internal gap runs are skipped, and every remaining column is resolved by IUPAC voting.

# Example usage
```rust
use gapfill_con::alignment_block::AlignmentBlock;
use gapfill_con::consensus::resolve;

let block = AlignmentBlock::new(
    "assembly", b"---AC-CTT---".to_vec(),
    vec![("reference_1".to_string(), b"GTTACGCTTGGG".to_vec())]
).unwrap();

// the single-column gap is skipped, everything else matches the primary
let result = resolve(&block, 1);
assert_eq!(result.sequence(), b"ACCTT");
assert_eq!(result.statistics().consensus_length, 5);
assert_eq!(result.statistics().excluded_columns, 1);
```
*/

use log::{debug, warn};

use crate::alignment_block::AlignmentBlock;
use crate::boundary::find_boundaries;
use crate::column::ColumnVotes;
use crate::consensus_config::{ConsensusConfig, ConsensusConfigBuilder};
use crate::gap_runs::classify_gap_runs;
use crate::iupac::{is_full_ambiguity, nucleotide_mask, ERROR_SYMBOL, GAP};

/// Counts of each symbol class in a sequence
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SymbolCounts {
    /// A, T, G, C
    pub unambiguous: usize,
    /// R, Y, S, W, K, M
    pub two_way: usize,
    /// B, D, H, V
    pub three_way: usize,
    /// N and ?
    pub four_way: usize,
    /// The error sentinel and anything else that is not a base call
    pub errors: usize
}

impl SymbolCounts {
    /// Tallies every symbol of a sequence into its class
    /// # Arguments
    /// * `sequence` - the sequence to count
    pub fn from_sequence(sequence: &[u8]) -> SymbolCounts {
        let mut counts = SymbolCounts::default();
        for &symbol in sequence.iter() {
            counts.add(symbol);
        }
        counts
    }

    /// Adds a single symbol to the counts
    pub fn add(&mut self, symbol: u8) {
        if is_full_ambiguity(symbol) {
            self.four_way += 1;
            return;
        }

        match nucleotide_mask(symbol).map(|m| m.count_ones()) {
            Some(1) => self.unambiguous += 1,
            Some(2) => self.two_way += 1,
            Some(3) => self.three_way += 1,
            _ => self.errors += 1
        };
    }

    /// Total number of symbols counted
    pub fn total(&self) -> usize {
        self.unambiguous + self.two_way + self.three_way + self.four_way + self.errors
    }
}

/// Summary of a single consensus run
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConsensusStatistics {
    /// Declared reference length, if the input carried one
    pub reference_length: Option<usize>,
    /// Length of the output sequence
    pub consensus_length: usize,
    /// Symbol class breakdown of the output sequence
    pub symbol_counts: SymbolCounts,
    /// Number of columns between the primary boundaries, inclusive
    pub scanned_columns: usize,
    /// Columns skipped because they were part of a short gap run
    pub excluded_columns: usize,
    /// Columns that were resolved but had no evidence to emit
    pub dropped_columns: usize,
    /// Primary gap columns that were filled from secondary evidence
    pub filled_columns: usize
}

/// Contains a final consensus result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConsensusResult {
    /// The primary sequence name this consensus was built for
    name: String,
    /// The generated consensus
    sequence: Vec<u8>,
    /// Summary statistics for this run
    statistics: ConsensusStatistics
}

impl ConsensusResult {
    /// Constructor
    pub fn new(name: String, sequence: Vec<u8>, statistics: ConsensusStatistics) -> ConsensusResult {
        ConsensusResult {
            name,
            sequence,
            statistics
        }
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn statistics(&self) -> &ConsensusStatistics {
        &self.statistics
    }
}

/// Core utility that merges a primary sequence with its secondary evidence.
/// It holds no state besides the config, so a single instance can be shared across any number of blocks.
#[derive(Clone, Debug, Default)]
pub struct ConsensusResolver {
    /// The config for this consensus run
    config: ConsensusConfig
}

impl ConsensusResolver {
    /// Creates a new instance of ConsensusResolver.
    /// # Arguments
    /// * `config` - the gap threshold and column resolution parameters
    pub fn with_config(config: ConsensusConfig) -> ConsensusResolver {
        ConsensusResolver {
            config
        }
    }

    /// Runs the full consensus over a block.
    /// Columns are visited strictly left to right, and columns in short primary gap runs contribute nothing.
    /// # Arguments
    /// * `block` - the validated alignment block, primary first
    pub fn resolve(&self, block: &AlignmentBlock) -> ConsensusResult {
        let primary = block.primary();
        let primary_seq = primary.sequence();
        let mut statistics = ConsensusStatistics {
            reference_length: block.reference_length(),
            ..Default::default()
        };

        let (start, end) = match find_boundaries(primary_seq) {
            Some(bounds) => bounds,
            None => {
                debug!("Primary \"{}\" is entirely gaps, consensus is empty", primary.name());
                return ConsensusResult::new(primary.name().to_string(), vec![], statistics);
            }
        };

        let gap_classification = classify_gap_runs(primary_seq, start, end, self.config.gap_threshold);
        debug!(
            "Primary \"{}\": boundaries {}..={}, {} gap runs, {} excluded columns",
            primary.name(), start, end, gap_classification.runs().len(), gap_classification.excluded_count()
        );

        statistics.scanned_columns = end - start + 1;
        statistics.excluded_columns = gap_classification.excluded_count();

        let mut sequence = Vec::with_capacity(statistics.scanned_columns - statistics.excluded_columns);
        for column in start..=end {
            if gap_classification.is_excluded(column) {
                continue;
            }

            let primary_symbol = primary_seq[column];
            let secondary_symbols = block.secondaries().iter().map(|s| s.sequence()[column]);
            let votes = ColumnVotes::from_column(primary_symbol, secondary_symbols);

            match votes.resolve(&self.config) {
                Some(symbol) => {
                    if symbol == ERROR_SYMBOL {
                        warn!("Primary \"{}\" column {} resolved to the error sentinel", primary.name(), column);
                    }
                    if primary_symbol == GAP {
                        statistics.filled_columns += 1;
                    }
                    sequence.push(symbol);
                },
                None => {
                    statistics.dropped_columns += 1;
                }
            };
        }

        statistics.consensus_length = sequence.len();
        statistics.symbol_counts = SymbolCounts::from_sequence(&sequence);
        debug!("Primary \"{}\": {:?}", primary.name(), statistics);

        ConsensusResult::new(primary.name().to_string(), sequence, statistics)
    }

    // Getters
    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }
}

/// Runs the consensus with default settings and the given gap threshold.
/// # Arguments
/// * `block` - the validated alignment block, primary first
/// * `gap_threshold` - internal primary gap runs with length <= this are skipped
pub fn resolve(block: &AlignmentBlock, gap_threshold: usize) -> ConsensusResult {
    let config = ConsensusConfigBuilder::default()
        .gap_threshold(gap_threshold)
        .build()
        // every field has a default, so the builder cannot fail
        .unwrap_or_default();
    ConsensusResolver::with_config(config).resolve(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::consensus_config::AmbiguityTier;
    use crate::example_gen::generate_block;

    fn block_from(primary: &[u8], secondaries: &[&[u8]]) -> AlignmentBlock {
        AlignmentBlock::new(
            "primary", primary.to_vec(),
            secondaries.iter()
                .enumerate()
                .map(|(i, s)| (format!("secondary_{}", i + 1), s.to_vec()))
                .collect()
        ).unwrap()
    }

    #[test]
    fn test_symbol_counts() {
        let counts = SymbolCounts::from_sequence(b"ACGTRYBDN?E-");
        assert_eq!(counts, SymbolCounts {
            unambiguous: 4,
            two_way: 2,
            three_way: 2,
            four_way: 2,
            errors: 2
        });
        assert_eq!(counts.total(), 12);
    }

    #[test]
    fn test_scenario_short_gap() {
        let block = block_from(b"---AC-CTT---", &[b"GTTACGCTTGGG"]);
        let result = resolve(&block, 1);
        assert_eq!(result.name(), "primary");
        assert_eq!(result.sequence(), b"ACCTT");
        assert_eq!(result.statistics(), &ConsensusStatistics {
            reference_length: None,
            consensus_length: 5,
            symbol_counts: SymbolCounts { unambiguous: 5, ..Default::default() },
            scanned_columns: 6,
            excluded_columns: 1,
            dropped_columns: 0,
            filled_columns: 0
        });
    }

    #[test]
    fn test_scenario_long_gap_filled() {
        // same block, but now the single gap is longer than the threshold and gets filled
        let block = block_from(b"---AC-CTT---", &[b"GTTACGCTTGGG"]);
        let result = resolve(&block, 0);
        assert_eq!(result.sequence(), b"ACGCTT");
        assert_eq!(result.statistics().excluded_columns, 0);
        assert_eq!(result.statistics().filled_columns, 1);
    }

    #[test]
    fn test_all_gap_primary() {
        let block = block_from(b"------", &[b"ACGTAC", b"ACGTAC"]);
        let result = resolve(&block, 150);
        assert!(result.sequence().is_empty());
        assert_eq!(result.statistics(), &ConsensusStatistics::default());
    }

    #[test]
    fn test_threshold_sensitivity() {
        let primary = b"AC---GT";
        let secondary = b"ACTTTGT";
        let block = block_from(primary, &[secondary]);

        // exactly threshold => excluded
        let result = resolve(&block, 3);
        assert_eq!(result.sequence(), b"ACGT");

        // threshold + 1 => filled
        let result = resolve(&block, 2);
        assert_eq!(result.sequence(), b"ACTTTGT");
        assert_eq!(result.statistics().filled_columns, 3);
    }

    #[test]
    fn test_flanks_trimmed_regardless_of_threshold() {
        // flanking runs are far longer than the threshold, but they are never scanned
        let block = block_from(b"-----ACGT-----", &[b"TTTTTACGTTTTTT"]);
        let result = resolve(&block, 0);
        assert_eq!(result.sequence(), b"ACGT");
        assert_eq!(result.statistics().scanned_columns, 4);
    }

    #[test]
    fn test_dropped_columns() {
        // the long run has a column where nobody has evidence, so it gets dropped
        let block = block_from(b"A---T", &[b"AG-CT"]);
        let result = resolve(&block, 1);
        assert_eq!(result.sequence(), b"AGCT");
        assert_eq!(result.statistics().dropped_columns, 1);
        assert_eq!(result.statistics().filled_columns, 2);
        assert!(result.sequence().len() < result.statistics().scanned_columns);
    }

    #[test]
    fn test_all_n_column() {
        let block = block_from(b"ANT", &[b"ANT", b"ANT"]);
        let result = resolve(&block, 150);
        assert_eq!(result.sequence(), b"ANT");
        assert_eq!(result.statistics().symbol_counts.four_way, 1);
    }

    #[test]
    fn test_single_n_column_dropped() {
        let block = block_from(b"ANT", &[b"A-T"]);
        let result = resolve(&block, 150);
        assert_eq!(result.sequence(), b"AT");
        assert_eq!(result.statistics().dropped_columns, 1);
    }

    #[test]
    fn test_ambiguity_resolution() {
        // secondaries sharpen the ambiguity codes, primary calls are kept otherwise
        let block = block_from(b"ARYNC", &[b"AGCAT", b"AGCAT"]);
        let result = resolve(&block, 150);
        assert_eq!(result.sequence(), b"AGCAC");
        assert_eq!(result.statistics().symbol_counts.unambiguous, 5);
    }

    #[test]
    fn test_ambiguous_output_counted() {
        let block = block_from(b"A-----T", &[b"AAGTT-T", b"ATCGA-T"]);
        let result = resolve(&block, 2);
        // W, S, K, W filled, last gap column has no evidence
        assert_eq!(result.sequence(), b"AWSKWT");
        assert_eq!(result.statistics().symbol_counts, SymbolCounts {
            unambiguous: 2,
            two_way: 4,
            ..Default::default()
        });
        assert_eq!(result.statistics().dropped_columns, 1);
    }

    #[test]
    fn test_primary_only() {
        let block = block_from(b"-AC-GT-", &[]);
        let result = resolve(&block, 150);
        assert_eq!(result.sequence(), b"ACGT");

        // gap is too long to skip, but with no evidence it is dropped anyway
        let result = resolve(&block, 0);
        assert_eq!(result.sequence(), b"ACGT");
        assert_eq!(result.statistics().dropped_columns, 1);
    }

    #[test]
    fn test_reference_length_passthrough() {
        let block = block_from(b"ACGT", &[]).with_reference_length(Some(1500));
        let result = resolve(&block, 150);
        assert_eq!(result.statistics().reference_length, Some(1500));
    }

    #[test]
    fn test_ambiguity_above_gap_config() {
        let block = block_from(b"ANT", &[b"A-T"]);
        let resolver = ConsensusResolver::with_config(
            ConsensusConfigBuilder::default()
                .ambiguity_tier(AmbiguityTier::AboveGap)
                .build().unwrap()
        );
        assert_eq!(resolver.config().ambiguity_tier, AmbiguityTier::AboveGap);
        let result = resolver.resolve(&block);
        assert_eq!(result.sequence(), b"ANT");
    }

    #[test_log::test]
    fn test_idempotent() {
        let block = generate_block(500, 5, 0.05, 0.02);
        let resolver = ConsensusResolver::default();
        let first = resolver.resolve(&block);
        let second = resolver.resolve(&block);
        assert_eq!(first, second);
        assert!(first.sequence().len() <= first.statistics().scanned_columns);
        assert_eq!(
            first.statistics().scanned_columns,
            first.statistics().consensus_length + first.statistics().excluded_columns + first.statistics().dropped_columns
        );
        assert_eq!(first.statistics().symbol_counts.total(), first.statistics().consensus_length);
    }
}
