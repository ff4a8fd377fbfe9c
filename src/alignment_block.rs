/*!
This module provides the AlignmentBlock, the immutable input to the consensus.
The first sequence is always the primary (the sequence being repaired), and all others are secondary evidence.

# Example usage
```rust
use gapfill_con::alignment_block::AlignmentBlock;

let block = AlignmentBlock::new(
    "assembly", b"AC-GT".to_vec(),
    vec![("read".to_string(), b"ACAGT".to_vec())]
).unwrap();
assert_eq!(block.len(), 2);
assert_eq!(block.alignment_length(), 5);
assert_eq!(block.primary().name(), "assembly");
```
*/

use simple_error::bail;

use crate::iupac::is_valid_symbol;

/// A single named row of an alignment
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedSequence {
    /// The unique name of this row
    name: String,
    /// The aligned symbols, including gaps
    sequence: Vec<u8>
}

impl AlignedSequence {
    /// Constructor
    pub fn new(name: String, sequence: Vec<u8>) -> AlignedSequence {
        AlignedSequence {
            name,
            sequence
        }
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
}

/// An ordered, equal-length collection of aligned sequences.
/// Index 0 is the primary, everything after it is secondary.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentBlock {
    /// All rows, primary first
    sequences: Vec<AlignedSequence>,
    /// Optional declared reference length, carried through to the statistics
    reference_length: Option<usize>
}

impl AlignmentBlock {
    /// Creates a new block from a primary and its secondary sequences, performing all sanity checks.
    /// # Arguments
    /// * `primary_name` - the name of the primary sequence
    /// * `primary` - the aligned primary sequence
    /// * `secondaries` - the (name, sequence) pairs of secondary evidence, in order
    /// # Errors
    /// * if any sequence length differs from the primary
    /// * if any sequence contains a symbol outside the recognized alphabet
    pub fn new(primary_name: &str, primary: Vec<u8>, secondaries: Vec<(String, Vec<u8>)>) -> Result<AlignmentBlock, Box<dyn std::error::Error>> {
        let mut sequences = Vec::with_capacity(secondaries.len() + 1);
        sequences.push(AlignedSequence::new(primary_name.to_string(), primary));
        sequences.extend(secondaries.into_iter().map(|(name, seq)| AlignedSequence::new(name, seq)));
        Self::from_sequences(sequences)
    }

    /// Creates a new block from an ordered list of sequences, the first of which is the primary.
    /// # Arguments
    /// * `sequences` - all rows, primary first
    /// # Errors
    /// * if `sequences` is empty
    /// * if any sequence length differs from the primary
    /// * if any sequence contains a symbol outside the recognized alphabet
    pub fn from_sequences(sequences: Vec<AlignedSequence>) -> Result<AlignmentBlock, Box<dyn std::error::Error>> {
        if sequences.is_empty() {
            bail!("Alignment block must contain at least one sequence.");
        }

        let expected_length = sequences[0].sequence().len();
        for aligned in sequences.iter() {
            if aligned.sequence().len() != expected_length {
                bail!(
                    "Sequence \"{}\" has length {}, expected {} to match the primary.",
                    aligned.name(), aligned.sequence().len(), expected_length
                );
            }

            if let Some((column, &symbol)) = aligned.sequence().iter().enumerate().find(|(_i, &s)| !is_valid_symbol(s)) {
                bail!(
                    "Sequence \"{}\" has unrecognized symbol {:?} at column {}.",
                    aligned.name(), symbol as char, column
                );
            }
        }

        Ok(AlignmentBlock {
            sequences,
            reference_length: None
        })
    }

    /// Attaches a declared reference length to this block
    pub fn with_reference_length(mut self, reference_length: Option<usize>) -> AlignmentBlock {
        self.reference_length = reference_length;
        self
    }

    /// Returns the symbols of every sequence at a single column, primary first.
    /// Panics if `column` is outside the alignment.
    pub fn column(&self, column: usize) -> impl Iterator<Item = u8> + '_ {
        self.sequences.iter().map(move |s| s.sequence()[column])
    }

    // Getters
    pub fn primary(&self) -> &AlignedSequence {
        &self.sequences[0]
    }

    pub fn secondaries(&self) -> &[AlignedSequence] {
        &self.sequences[1..]
    }

    pub fn sequences(&self) -> &[AlignedSequence] {
        &self.sequences
    }

    pub fn reference_length(&self) -> Option<usize> {
        self.reference_length
    }

    /// The number of sequences in the block, including the primary
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Always false for a constructed block, present for API symmetry with `len()`
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The shared length of every sequence
    pub fn alignment_length(&self) -> usize {
        self.sequences[0].sequence().len()
    }
}
