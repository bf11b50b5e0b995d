//! Diff-to-syntax-tree correlation.
//!
//! The new-file source is parsed with tree-sitter and walked depth-first.
//! Nodes whose start line falls inside a changed range are classified:
//!
//! - `jsx_attribute` nodes become [`AttributeChange`] records, paired with
//!   a removed value from the per-attribute [`RemovedValueIndex`], and
//!   credit their enclosing component and function
//! - top-level function declarations and function-bound variables are
//!   credited directly by name
//!
//! All mutable state, including the lazily built indices, is owned by a
//! single `analyze` call and dropped when it returns.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::config::AnalysisConfig;
use crate::diff::{
    changed_ranges, parse_diff, ranges_contain, ChangedRange, DiffFile, RemovedValueIndex,
};
use crate::summary::render_summary;
use crate::types::{AnalysisResult, AttributeChange, NameSet};

pub mod ancestry;
pub mod helpers;
pub mod language;

use ancestry::{
    component_name, declared_function_name, function_name, is_top_level, nearest_ancestor,
};
use helpers::{field_text, get_node_text, get_start_line, is_capitalized, unquote};
use language::Dialect;

/// Tag used when an attribute's owning element cannot be resolved.
const UNKNOWN_ELEMENT: &str = "unknown";

/// Correlate one file diff with the file's new source text.
///
/// Never fails. A source that does not parse, or hunks that point past the
/// end of the source, produce empty collections.
pub fn analyze(file: &DiffFile, source: &str, config: &AnalysisConfig) -> AnalysisResult {
    let span = tracing::debug_span!("analyze", file = %file.filename);
    let _enter = span.enter();

    let ranges = changed_ranges(file, config.range_mode);
    let mut result = AnalysisResult {
        filename: file.filename.clone(),
        raw_diff: file.raw.clone(),
        hunks: file.hunks.clone(),
        ..Default::default()
    };

    if ranges.is_empty() {
        tracing::debug!("no added lines, nothing to correlate");
        return result;
    }

    let dialect = Dialect::from_filename(&file.filename);
    let tree = match dialect.parse(source) {
        Ok(Some(tree)) => tree,
        Ok(None) => {
            tracing::warn!(dialect = dialect.as_str(), "parser produced no tree");
            return result;
        }
        Err(e) => {
            tracing::warn!(dialect = dialect.as_str(), error = %e, "grammar unavailable");
            return result;
        }
    };

    let mut correlator = Correlator::new(file, source, &ranges, config);
    correlator.walk(tree.root_node());
    correlator.finish(&mut result);
    result.summary = render_summary(&result);

    tracing::debug!(
        ranges = ranges.len(),
        components = result.components.len(),
        functions = result.functions.len(),
        changes = result.jsx_changes.len(),
        "correlated"
    );
    result
}

/// Parse `diff_text` and analyze the section for `filename`.
///
/// Returns `None` when the diff has no well-formed section for that file.
pub fn analyze_diff(
    diff_text: &str,
    filename: &str,
    source: &str,
    config: &AnalysisConfig,
) -> Option<AnalysisResult> {
    let file = parse_diff(diff_text)
        .into_iter()
        .find(|f| f.filename == filename)?;
    Some(analyze(&file, source, config))
}

/// Per-call walk state.
struct Correlator<'a> {
    file: &'a DiffFile,
    source: &'a str,
    ranges: &'a [ChangedRange],
    config: &'a AnalysisConfig,
    /// Built lazily, once per attribute name.
    indices: HashMap<String, RemovedValueIndex>,
    components: NameSet,
    functions: NameSet,
    changes: Vec<AttributeChange>,
    test_ids: NameSet,
}

impl<'a> Correlator<'a> {
    fn new(
        file: &'a DiffFile,
        source: &'a str,
        ranges: &'a [ChangedRange],
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            file,
            source,
            ranges,
            config,
            indices: HashMap::new(),
            components: NameSet::new(),
            functions: NameSet::new(),
            changes: Vec::new(),
            test_ids: NameSet::new(),
        }
    }

    /// Pre-order walk over every node. Out-of-range ancestors never stop
    /// the descent into in-range children.
    fn walk(&mut self, root: Node) {
        let mut cursor = root.walk();
        'walk: loop {
            self.visit(cursor.node());

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
    }

    fn visit(&mut self, node: Node) {
        if !ranges_contain(self.ranges, get_start_line(&node)) {
            return;
        }

        match node.kind() {
            "jsx_attribute" => self.record_attribute(node),
            "function_declaration" | "variable_declarator" if is_top_level(&node) => {
                if let Some(name) = declared_function_name(&node, self.source) {
                    tracing::trace!(name, line = get_start_line(&node), "declaration in range");
                    self.classify(name);
                }
            }
            _ => {}
        }
    }

    fn record_attribute(&mut self, node: Node) {
        let source = self.source;
        let Some(name_node) = node.named_child(0) else {
            return;
        };
        let attribute = get_node_text(&name_node, source);
        if attribute.is_empty() {
            return;
        }

        let element = owning_element(&node, source).unwrap_or(UNKNOWN_ELEMENT);
        let added_value = attribute_value(&node, source);

        let file = self.file;
        let removed_value = self
            .indices
            .entry(attribute.to_string())
            .or_insert_with(|| RemovedValueIndex::build(file, attribute))
            .take(element);

        if attribute == self.config.test_id_attribute {
            if let Some(value) = &added_value {
                self.test_ids.insert(value);
            }
        }

        tracing::trace!(
            element,
            attribute,
            line = get_start_line(&node),
            paired = removed_value.is_some(),
            "attribute in range"
        );
        self.changes.push(AttributeChange::new(
            element,
            attribute,
            added_value,
            removed_value,
        ));

        let component = nearest_ancestor(node, source, component_name);
        if let Some(name) = component {
            self.components.insert(name);
        }
        if let Some(name) = nearest_ancestor(node, source, function_name) {
            if Some(name) != component {
                self.functions.insert(name);
            }
        }
    }

    fn classify(&mut self, name: &str) {
        if is_capitalized(name) {
            self.components.insert(name);
        } else {
            self.functions.insert(name);
        }
    }

    fn finish(self, result: &mut AnalysisResult) {
        result.components = self.components;
        result.functions = self.functions;
        result.jsx_changes = self.changes;
        result.test_ids = self.test_ids;
    }
}

/// Tag name of the element an attribute belongs to.
fn owning_element<'s>(attr: &Node, source: &'s str) -> Option<&'s str> {
    let element = attr.parent()?;
    match element.kind() {
        "jsx_opening_element" | "jsx_self_closing_element" => {
            field_text(&element, "name", source)
        }
        _ => None,
    }
}

/// New value of an attribute: string literal contents, or the source text
/// of the embedded expression. `None` for value-less attributes.
fn attribute_value(attr: &Node, source: &str) -> Option<String> {
    let value = attr.named_child(1)?;
    match value.kind() {
        "string" => Some(unquote(get_node_text(&value, source)).to_string()),
        "jsx_expression" => {
            let mut cursor = value.walk();
            let expr = value
                .named_children(&mut cursor)
                .find(|c| c.kind() != "comment")?;
            Some(get_node_text(&expr, source).to_string())
        }
        _ => Some(get_node_text(&value, source).to_string()),
    }
}
