//! One-line human-readable summary of an analysis.

use crate::types::{AnalysisResult, AttributeChange, NameSet};

/// Separator between summary clauses.
pub const CLAUSE_SEPARATOR: &str = "; ";

/// Render the summary of `result`.
///
/// Clause order: components, functions, one clause per attribute change,
/// test ids. Empty categories are omitted; an empty result renders as an
/// empty string.
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(clause) = list_clause("components", &result.components) {
        clauses.push(clause);
    }
    if let Some(clause) = list_clause("functions", &result.functions) {
        clauses.push(clause);
    }
    clauses.extend(result.jsx_changes.iter().map(change_clause));
    if let Some(clause) = list_clause("test ids", &result.test_ids) {
        clauses.push(clause);
    }

    clauses.join(CLAUSE_SEPARATOR)
}

fn list_clause(label: &str, names: &NameSet) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let joined: Vec<&str> = names.iter().collect();
    Some(format!("{}: {}", label, joined.join(", ")))
}

/// `<tag> attr="old" → "new"` for a paired rename, `<tag> attr` otherwise.
fn change_clause(change: &AttributeChange) -> String {
    match (&change.removed_value, &change.added_value) {
        (Some(old), Some(new)) => format!(
            "<{}> {}=\"{}\" → \"{}\"",
            change.element, change.attribute, old, new
        ),
        _ => format!("<{}> {}", change.element, change.attribute),
    }
}
