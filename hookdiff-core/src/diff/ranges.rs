//! Changed line ranges on the new side of a diff.

use serde::{Deserialize, Serialize};

use super::DiffFile;

/// Policy for turning a hunk's added lines into ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeMode {
    /// One range per hunk from its first to its last added line. Unchanged
    /// lines sitting between two additions count as touched.
    #[default]
    HunkSpan,
    /// One single-line range per added line.
    AddedLines,
}

/// Closed interval of new-file line numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedRange {
    pub start: u32,
    pub end: u32,
}

impl ChangedRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

/// Changed ranges of a file, in hunk order.
///
/// Hunks without added lines contribute nothing. Ranges are never merged,
/// even when adjacent or overlapping.
pub fn changed_ranges(file: &DiffFile, mode: RangeMode) -> Vec<ChangedRange> {
    match mode {
        RangeMode::HunkSpan => file
            .hunks
            .iter()
            .filter_map(|hunk| {
                let (min, max) = hunk
                    .added_line_numbers()
                    .fold(None, |acc: Option<(u32, u32)>, n| match acc {
                        Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
                        None => Some((n, n)),
                    })?;
                Some(ChangedRange::new(min, max))
            })
            .collect(),
        RangeMode::AddedLines => file
            .hunks
            .iter()
            .flat_map(|hunk| hunk.added_line_numbers())
            .map(|n| ChangedRange::new(n, n))
            .collect(),
    }
}

/// Whether any range contains `line`.
pub fn ranges_contain(ranges: &[ChangedRange], line: u32) -> bool {
    ranges.iter().any(|r| r.contains(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffHunk, DiffLine};

    fn file_with(hunks: Vec<DiffHunk>) -> DiffFile {
        DiffFile {
            filename: "f.tsx".to_string(),
            raw: String::new(),
            hunks,
        }
    }

    fn hunk(lines: Vec<DiffLine>) -> DiffHunk {
        let mut h = DiffHunk::new(1, 1, 1, 1);
        h.lines = lines;
        h
    }

    #[test]
    fn test_one_range_per_hunk_with_additions() {
        let file = file_with(vec![
            hunk(vec![DiffLine::added("a", 3), DiffLine::added("b", 4)]),
            hunk(vec![DiffLine::removed("c", 9), DiffLine::context("d", 10, 10)]),
            hunk(vec![DiffLine::added("e", 20)]),
        ]);

        let ranges = changed_ranges(&file, RangeMode::HunkSpan);
        assert_eq!(ranges, vec![ChangedRange::new(3, 4), ChangedRange::new(20, 20)]);
    }

    #[test]
    fn test_span_widens_over_gap() {
        let file = file_with(vec![hunk(vec![
            DiffLine::added("a", 5),
            DiffLine::context("b", 5, 6),
            DiffLine::context("c", 6, 7),
            DiffLine::added("d", 8),
        ])]);

        let ranges = changed_ranges(&file, RangeMode::HunkSpan);
        assert_eq!(ranges, vec![ChangedRange::new(5, 8)]);
        assert!(ranges_contain(&ranges, 6));
    }

    #[test]
    fn test_added_lines_mode_is_precise() {
        let file = file_with(vec![hunk(vec![
            DiffLine::added("a", 5),
            DiffLine::context("b", 5, 6),
            DiffLine::added("d", 7),
        ])]);

        let ranges = changed_ranges(&file, RangeMode::AddedLines);
        assert_eq!(ranges, vec![ChangedRange::new(5, 5), ChangedRange::new(7, 7)]);
        assert!(!ranges_contain(&ranges, 6));
    }

    #[test]
    fn test_overlapping_ranges_kept_separate() {
        let file = file_with(vec![
            hunk(vec![DiffLine::added("a", 1), DiffLine::added("b", 4)]),
            hunk(vec![DiffLine::added("c", 4), DiffLine::added("d", 6)]),
        ]);

        let ranges = changed_ranges(&file, RangeMode::HunkSpan);
        assert_eq!(ranges.len(), 2);
        assert!(ranges_contain(&ranges, 5));
        assert!(!ranges_contain(&ranges, 7));
    }

    #[test]
    fn test_no_hunks() {
        let file = file_with(vec![]);
        assert!(changed_ranges(&file, RangeMode::HunkSpan).is_empty());
        assert!(!ranges_contain(&[], 1));
    }
}
