//! Per-tag FIFO index of attribute values taken from removed lines.
//!
//! Pairing an added attribute with a removed one is positional: the k-th
//! element of a tag met inside a changed range gets the k-th removed value
//! of that tag, in diff order. Reordered same-tag elements can mispair.

use std::collections::{HashMap, VecDeque};

use once_cell::sync::Lazy;
use regex::Regex;

use super::DiffFile;

static OPENING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([A-Za-z][\w.:-]*)").unwrap());

/// Removed values of one attribute, queued per element tag.
#[derive(Clone, Debug, Default)]
pub struct RemovedValueIndex {
    attribute: String,
    queues: HashMap<String, VecDeque<String>>,
}

impl RemovedValueIndex {
    /// Scan the removed lines of `file` for `attribute="value"`.
    ///
    /// Each match is attributed to the nearest `<tag` before it on the same
    /// line; matches without one are skipped.
    pub fn build(file: &DiffFile, attribute: &str) -> Self {
        let mut index = Self {
            attribute: attribute.to_string(),
            queues: HashMap::new(),
        };

        let Some(pattern) = attribute_pattern(attribute) else {
            return index;
        };

        for line in file.removed_lines() {
            let text = line.content.as_str();
            for caps in pattern.captures_iter(text) {
                let (Some(name), Some(value)) = (caps.name("name"), caps.get(2).or(caps.get(3)))
                else {
                    continue;
                };
                let Some(tag) = nearest_tag(&text[..name.start()]) else {
                    continue;
                };
                index
                    .queues
                    .entry(tag.to_string())
                    .or_default()
                    .push_back(value.as_str().to_string());
            }
        }

        tracing::trace!(
            attribute,
            tags = index.queues.len(),
            "built removed-value index"
        );
        index
    }

    /// Attribute this index was built for.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Pop the earliest remaining value for `tag`.
    ///
    /// `None` once the tag is exhausted (or never seen): the element is a
    /// pure addition rather than a rename.
    pub fn take(&mut self, tag: &str) -> Option<String> {
        self.queues.get_mut(tag)?.pop_front()
    }

    /// Number of values still queued for `tag`.
    pub fn remaining(&self, tag: &str) -> usize {
        self.queues.get(tag).map_or(0, VecDeque::len)
    }

    /// Whether every queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }
}

fn attribute_pattern(attribute: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?:^|[^\w-])(?P<name>{})\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attribute)
    ))
    .ok()
}

fn nearest_tag(prefix: &str) -> Option<&str> {
    OPENING_TAG
        .captures_iter(prefix)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
