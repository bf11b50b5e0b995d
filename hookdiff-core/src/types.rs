//! Result types produced by the correlator.
//!
//! These are handed to an external reporting layer, so they serialize to
//! camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::diff::DiffHunk;

/// Insertion-ordered set of names.
///
/// Collections here stay small (a handful of components per file), so a
/// linear scan on insert is cheaper than hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSet(Vec<String>);

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` unless already present. Returns true if inserted.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A markup attribute met inside a changed range, paired with the value
/// it most likely replaced.
///
/// The pairing is positional per element tag, not a verified identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeChange {
    /// Tag of the owning element, e.g. `button` or `Modal.Header`.
    pub element: String,
    pub attribute: String,
    pub added_value: Option<String>,
    /// Value popped from the removed-value index, if any was left.
    pub removed_value: Option<String>,
}

impl AttributeChange {
    pub fn new(
        element: &str,
        attribute: &str,
        added_value: Option<String>,
        removed_value: Option<String>,
    ) -> Self {
        Self {
            element: element.to_string(),
            attribute: attribute.to_string(),
            added_value,
            removed_value,
        }
    }

    /// True when an old value was paired, i.e. the attribute was renamed
    /// rather than introduced.
    pub fn is_rename(&self) -> bool {
        self.removed_value.is_some()
    }
}

/// Everything the correlator learned about one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub filename: String,
    pub raw_diff: String,
    pub hunks: Vec<DiffHunk>,
    pub components: NameSet,
    pub functions: NameSet,
    /// Attribute changes in traversal order.
    pub jsx_changes: Vec<AttributeChange>,
    pub test_ids: NameSet,
    pub summary: String,
}

impl AnalysisResult {
    /// True if nothing was attributed to the diff.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
            && self.functions.is_empty()
            && self.jsx_changes.is_empty()
            && self.test_ids.is_empty()
    }

    /// Changes whose attribute is `attribute`.
    pub fn changes_for<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a AttributeChange> + 'a {
        self.jsx_changes
            .iter()
            .filter(move |c| c.attribute == attribute)
    }
}
