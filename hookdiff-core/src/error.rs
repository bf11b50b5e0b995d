//! Error types for hookdiff-core.
//!
//! The analysis itself never fails: malformed diffs and sources degrade to
//! empty results. These errors cover the ancillary surfaces around it.

use thiserror::Error;

/// Result type alias for hookdiff-core operations.
pub type Result<T> = std::result::Result<T, HookdiffError>;

/// Errors that can occur outside the analysis path.
#[derive(Error, Debug)]
pub enum HookdiffError {
    /// Configuration text could not be parsed.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// A configuration value was syntactically valid but unusable.
    #[error("Invalid configuration value for `{key}`: {message}")]
    InvalidValue {
        /// Key of the rejected value.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// The tree-sitter grammar could not be loaded.
    #[error("Failed to load grammar: {message}")]
    LanguageError {
        /// Description of the grammar error.
        message: String,
    },

    /// JSON serialization error during export.
    #[error("JSON export error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<tree_sitter::LanguageError> for HookdiffError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        HookdiffError::LanguageError {
            message: err.to_string(),
        }
    }
}
