//! hookdiff core - correlates unified diffs with fresh syntax trees.
//!
//! Given the diff of one source file and that file's new content, this
//! crate reports which UI components, plain functions and markup
//! attributes the diff touched, pairing renamed attribute values and
//! collecting the values of a designated test-id attribute.
//!
//! # Features
//!
//! - **Diff model**: typed files, hunks and lines from raw unified diff text
//! - **Changed ranges**: new-file line intervals per hunk
//! - **Rename pairing**: per-tag FIFO index of removed attribute values
//! - **Tree correlation**: tree-sitter walk over TSX/TypeScript/JavaScript
//! - **Summary**: one-line human-readable digest
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookdiff_core::{analyze, parse_diff, AnalysisConfig};
//!
//! let config = AnalysisConfig::default();
//! for file in parse_diff(&diff_text) {
//!     let source = read_new_source(&file.filename);
//!     let result = analyze(&file, &source, &config);
//!     println!("{}: {}", result.filename, result.summary);
//! }
//! ```
//!
//! The crate performs no I/O and installs no logging subscriber; it emits
//! `tracing` events for the host application to collect.

pub mod config;
pub mod correlator;
pub mod diff;
pub mod error;
pub mod exporter;
pub mod summary;
pub mod types;

pub use config::{AnalysisConfig, HookdiffConfig, DEFAULT_TEST_ID_ATTRIBUTE};
pub use correlator::{analyze, analyze_diff};
pub use diff::{
    changed_ranges, parse_diff, ChangedRange, DiffFile, DiffHunk, DiffLine, DiffLineKind,
    RangeMode, RemovedValueIndex,
};
pub use error::{HookdiffError, Result};
pub use summary::render_summary;
pub use types::{AnalysisResult, AttributeChange, NameSet};

/// Get the version of hookdiff-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
