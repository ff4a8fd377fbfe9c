/*!
Identifies the gap runs inside the primary sequence and decides which ones get excluded.
Short runs are treated as local assembly artifacts and skipped entirely, while long runs are left for secondary sequences to fill.

# Example usage
```rust
use gapfill_con::gap_runs::{classify_gap_runs, GapRun};

let primary = b"AC-GT---A";
let classification = classify_gap_runs(primary, 0, 8, 1);
assert_eq!(classification.runs(), &[GapRun::new(2, 2), GapRun::new(5, 7)]);
assert!(classification.is_excluded(2));
assert!(!classification.is_excluded(6));
```
*/

use itertools::Itertools;
use log::trace;
use rustc_hash::FxHashSet as HashSet;

use crate::iupac::GAP;

/// A maximal run of gap symbols in the primary, inclusive on both ends
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GapRun {
    /// First gap column
    start: usize,
    /// Last gap column
    end: usize
}

impl GapRun {
    /// Constructor, `end` must be >= `start`
    pub fn new(start: usize, end: usize) -> GapRun {
        assert!(end >= start);
        GapRun {
            start,
            end
        }
    }

    /// The number of columns in the run
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A run always covers at least one column
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if this run is short enough to be excluded from the consensus
    /// # Arguments
    /// * `gap_threshold` - runs with length <= this are ignorable
    pub fn is_ignorable(&self, gap_threshold: usize) -> bool {
        self.len() <= gap_threshold
    }

    /// All columns covered by the run
    pub fn columns(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    // Getters
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// Returns every maximal gap run of the primary that lies within `[start, end]`, in column order.
/// # Arguments
/// * `primary` - the aligned primary sequence
/// * `start` - first column to scan
/// * `end` - last column to scan, inclusive; must be < `primary.len()`
pub fn find_gap_runs(primary: &[u8], start: usize, end: usize) -> Vec<GapRun> {
    if start > end {
        return vec![];
    }

    let groups = primary[start..=end].iter()
        .enumerate()
        .group_by(|&(_i, &c)| c == GAP);

    let mut runs = vec![];
    for (is_gap, group) in &groups {
        if !is_gap {
            continue;
        }

        let mut columns = group.map(|(i, _c)| start + i);
        // groups are never empty
        if let Some(run_start) = columns.next() {
            let run_end = columns.last().unwrap_or(run_start);
            runs.push(GapRun::new(run_start, run_end));
        }
    }
    runs
}

/// The outcome of classifying the primary's gap runs against a threshold
#[derive(Clone, Debug, Default)]
pub struct GapClassification {
    /// Every gap run found, in column order
    runs: Vec<GapRun>,
    /// The threshold used to classify the runs
    gap_threshold: usize,
    /// All columns that belong to an ignorable run
    excluded: HashSet<usize>
}

impl GapClassification {
    /// Returns true if the column belongs to a short gap run and should be skipped
    pub fn is_excluded(&self, column: usize) -> bool {
        self.excluded.contains(&column)
    }

    /// The number of excluded columns
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    /// Runs that are excluded from the consensus
    pub fn excluded_runs(&self) -> impl Iterator<Item = &GapRun> + '_ {
        self.runs.iter().filter(|r| r.is_ignorable(self.gap_threshold))
    }

    /// Runs that are long enough to be filled from secondary evidence
    pub fn fillable_runs(&self) -> impl Iterator<Item = &GapRun> + '_ {
        self.runs.iter().filter(|r| !r.is_ignorable(self.gap_threshold))
    }

    // Getters
    pub fn runs(&self) -> &[GapRun] {
        &self.runs
    }

    pub fn gap_threshold(&self) -> usize {
        self.gap_threshold
    }
}

/// Finds the gap runs of the primary within `[start, end]` and marks the columns of every ignorable run as excluded.
/// # Arguments
/// * `primary` - the aligned primary sequence
/// * `start` - first column to scan
/// * `end` - last column to scan, inclusive
/// * `gap_threshold` - runs with length <= this are excluded
pub fn classify_gap_runs(primary: &[u8], start: usize, end: usize, gap_threshold: usize) -> GapClassification {
    let runs = find_gap_runs(primary, start, end);
    let mut excluded: HashSet<usize> = Default::default();
    for run in runs.iter() {
        let ignorable = run.is_ignorable(gap_threshold);
        trace!("Gap run {}..={} (len {}): ignorable={}", run.start(), run.end(), run.len(), ignorable);
        if ignorable {
            excluded.extend(run.columns());
        }
    }

    GapClassification {
        runs,
        gap_threshold,
        excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_run_len() {
        let run = GapRun::new(4, 4);
        assert_eq!(run.len(), 1);
        assert!(run.is_ignorable(1));
        assert!(!run.is_ignorable(0));

        let run = GapRun::new(4, 9);
        assert_eq!(run.len(), 6);
        assert_eq!(run.columns().collect::<Vec<usize>>(), vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_find_runs() {
        let primary = b"A-CG--T---A";
        assert_eq!(find_gap_runs(primary, 0, 10), vec![
            GapRun::new(1, 1),
            GapRun::new(4, 5),
            GapRun::new(7, 9)
        ]);
    }

    #[test]
    fn test_find_runs_no_gaps() {
        assert!(find_gap_runs(b"ACGT", 0, 3).is_empty());
    }

    #[test]
    fn test_find_runs_restricted_range() {
        // the leading and trailing gaps are outside the scanned range
        let primary = b"--A-C--";
        assert_eq!(find_gap_runs(primary, 2, 4), vec![GapRun::new(3, 3)]);
    }

    #[test]
    fn test_threshold_boundary() {
        // run of exactly 3 is excluded at threshold 3, but not at threshold 2
        let primary = b"AC---GT";
        let classification = classify_gap_runs(primary, 0, 6, 3);
        assert_eq!(classification.excluded_count(), 3);
        assert!((2..=4).all(|c| classification.is_excluded(c)));
        assert_eq!(classification.excluded_runs().count(), 1);
        assert_eq!(classification.fillable_runs().count(), 0);

        let classification = classify_gap_runs(primary, 0, 6, 2);
        assert_eq!(classification.excluded_count(), 0);
        assert_eq!(classification.fillable_runs().collect::<Vec<&GapRun>>(), vec![&GapRun::new(2, 4)]);
    }

    #[test]
    fn test_mixed_runs() {
        let primary = b"A-C-----G--T";
        let classification = classify_gap_runs(primary, 0, 11, 2);
        assert_eq!(classification.runs().len(), 3);
        assert_eq!(classification.gap_threshold(), 2);
        // 1 + 2 columns excluded, the 5-run is left for filling
        assert_eq!(classification.excluded_count(), 3);
        assert!(classification.is_excluded(1));
        assert!(!classification.is_excluded(5));
        assert!(classification.is_excluded(9));
        assert!(classification.is_excluded(10));
        assert!(!classification.is_excluded(11));
    }
}
