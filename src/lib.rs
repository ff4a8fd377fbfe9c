/*!
# gapfill_con
This library merges a primary assembled sequence with aligned secondary sequences (references or supporting reads) into a single consensus.

Key behaviors:
* Each column is resolved by IUPAC voting, and the primary's own call is kept unless the combined vote is strictly more specific
* Leading and trailing gaps of the primary are trimmed
* Short internal gap runs in the primary are skipped entirely, while long runs are filled from the secondary sequences
* Columns with no informative evidence emit `N` only when enough `N`/`?` symbols support it, otherwise they are dropped

Notes:
* Input sequences must already be aligned to the same length; this library does not perform alignment
* Each block is processed independently, so many blocks can be resolved in parallel by the caller

# Example usage
```rust
use gapfill_con::alignment_block::AlignmentBlock;
use gapfill_con::consensus::resolve;

let block = AlignmentBlock::new(
    "assembly", b"AC----GTNA".to_vec(),
    vec![
        ("read_1".to_string(), b"ACTTAAGTNA".to_vec()),
        ("read_2".to_string(), b"ACTTAAGCNA".to_vec())
    ]
).unwrap();

// the 4-column gap is longer than the threshold, so it gets filled
let result = resolve(&block, 2);
assert_eq!(result.sequence(), b"ACTTAAGTNA");
assert_eq!(result.statistics().filled_columns, 4);
assert_eq!(result.statistics().symbol_counts.four_way, 1);
```
*/

/// The AlignmentBlock input type
pub mod alignment_block;
/// Locates the first and last non-gap columns of the primary
pub mod boundary;
/// Single-column vote resolution
pub mod column;
/// Main functionality for the consensus component
pub mod consensus;
/// Configuration for ConsensusResolver
pub mod consensus_config;
/// Utility for generating examples
pub mod example_gen;
/// Aligned FASTA loading and reference length parsing
pub mod fasta;
/// Primary gap run detection and classification
pub mod gap_runs;
/// Static IUPAC symbol tables
pub mod iupac;
