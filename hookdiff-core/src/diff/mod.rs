//! Unified diff model and the indices derived from it.
//!
//! Diff text is parsed once into immutable [`DiffFile`] records. Two views
//! are derived from a file:
//!
//! - **Changed ranges**: new-file line intervals considered touched
//! - **Removed-value index**: per-tag FIFO queues of attribute values that
//!   appeared on removed lines, used to pair renamed attributes

use serde::{Deserialize, Serialize};

pub mod parser;
pub mod ranges;
pub mod removed;

pub use parser::parse_diff;
pub use ranges::{changed_ranges, ranges_contain, ChangedRange, RangeMode};
pub use removed::RemovedValueIndex;

/// Kind of a line inside a hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Added,
    Removed,
    Context,
}

impl DiffLineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffLineKind::Added => "added",
            DiffLineKind::Removed => "removed",
            DiffLineKind::Context => "context",
        }
    }
}

/// A single line of a hunk.
///
/// Added lines have no old-file number, removed lines no new-file number,
/// context lines have both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// Line text without the leading marker.
    pub content: String,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
}

impl DiffLine {
    pub fn added(content: &str, new_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Added,
            content: content.to_string(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(content: &str, old_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Removed,
            content: content.to_string(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn context(content: &str, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Context,
            content: content.to_string(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }
}

/// One `@@ … @@` block of a file diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    pub old_start: u32,
    /// Declared old-side line count (1 when the header omits it).
    pub old_count: u32,
    pub new_start: u32,
    /// Declared new-side line count (1 when the header omits it).
    pub new_count: u32,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// New-file line numbers of the added lines, in diff order.
    pub fn added_line_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines
            .iter()
            .filter(|l| l.kind == DiffLineKind::Added)
            .filter_map(|l| l.new_line)
    }
}

/// The diff of one file: its new path, raw section text and hunks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffFile {
    pub filename: String,
    pub raw: String,
    pub hunks: Vec<DiffHunk>,
}

impl DiffFile {
    /// All added lines across hunks, in diff order.
    pub fn added_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines_of(DiffLineKind::Added)
    }

    /// All removed lines across hunks, in diff order.
    pub fn removed_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines_of(DiffLineKind::Removed)
    }

    fn lines_of(&self, kind: DiffLineKind) -> impl Iterator<Item = &DiffLine> {
        self.hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .filter(move |l| l.kind == kind)
    }
}
