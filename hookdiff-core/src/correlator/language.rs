//! Grammar selection from the file name.

use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::Result;

/// Source dialect, picked by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// TypeScript with embedded markup (`.tsx`, and the fallback).
    Tsx,
    /// Plain TypeScript; angle brackets are type assertions, not markup.
    TypeScript,
    /// JavaScript; the grammar accepts markup natively.
    JavaScript,
}

impl Dialect {
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "ts" | "mts" | "cts" => Dialect::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Dialect::JavaScript,
            _ => Dialect::Tsx,
        }
    }

    /// Whether markup elements and attributes can appear in the tree.
    pub fn has_markup(&self) -> bool {
        !matches!(self, Dialect::TypeScript)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Tsx => "tsx",
            Dialect::TypeScript => "typescript",
            Dialect::JavaScript => "javascript",
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Parse `source` with this dialect's grammar.
    ///
    /// Syntax errors do not fail: tree-sitter recovers and marks them with
    /// `ERROR` nodes. `Ok(None)` means the parser produced no tree at all.
    pub fn parse(self, source: &str) -> Result<Option<Tree>> {
        let mut parser = Parser::new();
        parser.set_language(&self.language())?;
        Ok(parser.parse(source, None))
    }
}
