use crate::iupac::GAP;

/// Returns the inclusive (start, end) column range between the first and last non-gap symbols of the primary.
/// Returns None if the primary is empty or entirely gaps, in which case there is nothing to scan.
/// # Arguments
/// * `primary` - the aligned primary sequence
/// # Examples
/// ```rust
/// use gapfill_con::boundary::find_boundaries;
/// assert_eq!(find_boundaries(b"---AC-CTT---"), Some((3, 8)));
/// assert_eq!(find_boundaries(b"A"), Some((0, 0)));
/// assert_eq!(find_boundaries(b"----"), None);
/// ```
pub fn find_boundaries(primary: &[u8]) -> Option<(usize, usize)> {
    let start = primary.iter().position(|&c| c != GAP)?;
    // if there is a first non-gap, there is a last one
    let end = primary.iter().rposition(|&c| c != GAP)?;
    Some((start, end))
}
