/*!
Loads aligned FASTA text into an AlignmentBlock.
The first record is the primary, and every later record is renamed `<header>_<ordinal>` since aligners often repeat the same header for many reads.
A primary header may declare a reference length with a `reflen` token, e.g. `>plasmid_7_reflen_1500_final`.

# Example usage
```rust
use gapfill_con::fasta::parse_alignment;

let text = ">plasmid_reflen_8\nAC--\nGT\n>read\nACTTGT\n>read\nACTT\nGT\n";
let block = parse_alignment(text).unwrap();
assert_eq!(block.primary().name(), "plasmid");
assert_eq!(block.primary().sequence(), b"AC--GT");
assert_eq!(block.reference_length(), Some(8));
assert_eq!(block.secondaries()[0].name(), "read_1");
assert_eq!(block.secondaries()[1].name(), "read_2");
```
*/

use log::{debug, warn};
use simple_error::bail;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::alignment_block::{AlignedSequence, AlignmentBlock};

/// The header token that marks the following token as a reference length
pub const REFLEN_MARKER: &str = "reflen";

/// Splits a `reflen` declaration out of a header.
/// Returns the name (the tokens before the marker) and the declared length, if any.
/// If there is no marker, the full header is the name.
/// # Arguments
/// * `header` - the header text, without the leading `>`
/// # Examples
/// ```rust
/// use gapfill_con::fasta::parse_reference_length;
/// assert_eq!(parse_reference_length("contig_3_reflen_1500_x"), ("contig_3".to_string(), Some(1500)));
/// assert_eq!(parse_reference_length("contig_3"), ("contig_3".to_string(), None));
/// ```
pub fn parse_reference_length(header: &str) -> (String, Option<usize>) {
    let tokens: Vec<&str> = header.split('_').collect();
    let marker_index = match tokens.iter().position(|&t| t == REFLEN_MARKER) {
        Some(i) => i,
        None => return (header.to_string(), None)
    };

    let name = if marker_index == 0 {
        // nothing before the marker to use as a name
        header.to_string()
    } else {
        tokens[..marker_index].join("_")
    };

    let reference_length = match tokens.get(marker_index + 1).map(|t| t.parse::<usize>()) {
        Some(Ok(length)) => Some(length),
        Some(Err(e)) => {
            warn!("Header \"{header}\" has an unparseable reference length: {e}");
            None
        },
        None => {
            warn!("Header \"{}\" has a {} marker with no value", header, REFLEN_MARKER);
            None
        }
    };

    (name, reference_length)
}

/// Reads aligned FASTA records into an AlignmentBlock.
/// Wrapped sequence lines are joined, blank lines are ignored, and symbols are uppercased.
/// # Arguments
/// * `reader` - the source of the FASTA text
/// # Errors
/// * if reading fails
/// * if there are no records, sequence text appears before the first header, or a record has no sequence
/// * if the records do not form a valid AlignmentBlock
pub fn read_alignment<R: BufRead>(reader: R) -> Result<AlignmentBlock, Box<dyn std::error::Error>> {
    let mut records: Vec<(String, Vec<u8>)> = vec![];
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            records.push((header.trim().to_string(), vec![]));
        } else {
            match records.last_mut() {
                Some((_header, sequence)) => sequence.extend(line.bytes().map(|b| b.to_ascii_uppercase())),
                None => bail!("Sequence data found before the first header.")
            };
        }
    }

    if records.is_empty() {
        bail!("No FASTA records found.");
    }
    if let Some((header, _sequence)) = records.iter().find(|(_h, s)| s.is_empty()) {
        bail!("Record \"{}\" has no sequence.", header);
    }

    let mut sequences = Vec::with_capacity(records.len());
    let mut reference_length = None;
    for (ordinal, (header, sequence)) in records.into_iter().enumerate() {
        let name = if ordinal == 0 {
            let (name, declared) = parse_reference_length(&header);
            reference_length = declared;
            name
        } else {
            format!("{header}_{ordinal}")
        };
        sequences.push(AlignedSequence::new(name, sequence));
    }

    let block = AlignmentBlock::from_sequences(sequences)?
        .with_reference_length(reference_length);
    debug!(
        "Loaded \"{}\" with {} secondaries over {} columns",
        block.primary().name(), block.secondaries().len(), block.alignment_length()
    );
    Ok(block)
}

/// Parses aligned FASTA text into an AlignmentBlock, see `read_alignment(...)`
pub fn parse_alignment(text: &str) -> Result<AlignmentBlock, Box<dyn std::error::Error>> {
    read_alignment(text.as_bytes())
}

/// Loads an aligned FASTA file into an AlignmentBlock, see `read_alignment(...)`
/// # Errors
/// * if the file cannot be opened, or any error from `read_alignment(...)`
pub fn load_alignment(filename: &Path) -> Result<AlignmentBlock, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    read_alignment(BufReader::new(file))
}
