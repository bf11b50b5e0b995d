//! Analysis configuration.
//!
//! Configuration is optional; every field has a default that matches the
//! behavior of a bare [`AnalysisConfig::default()`]. The caller owns file
//! access, so only TOML text is accepted here.
//!
//! # Example Configuration
//!
//! ```toml
//! [analysis]
//! test_id_attribute = "data-testid"
//! range_mode = "added-lines"
//! ```

use serde::{Deserialize, Serialize};

use crate::diff::RangeMode;
use crate::error::{HookdiffError, Result};

/// Attribute tracked in `AnalysisResult::test_ids` unless configured otherwise.
pub const DEFAULT_TEST_ID_ATTRIBUTE: &str = "data-test-id";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HookdiffConfig {
    /// Settings for the diff/tree correlation.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl HookdiffConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: HookdiffConfig = toml::from_str(text)?;
        config.analysis.validate()?;
        Ok(config)
    }
}

/// Settings consumed by [`crate::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Markup attribute whose new values are collected as test ids.
    #[serde(default = "default_test_id_attribute")]
    pub test_id_attribute: String,

    /// How hunks are turned into changed line ranges.
    ///
    /// `hunk-span` (default) treats everything between the first and last
    /// added line of a hunk as touched; `added-lines` only the added lines.
    #[serde(default)]
    pub range_mode: RangeMode,
}

fn default_test_id_attribute() -> String {
    DEFAULT_TEST_ID_ATTRIBUTE.to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            test_id_attribute: default_test_id_attribute(),
            range_mode: RangeMode::default(),
        }
    }
}

impl AnalysisConfig {
    /// Config tracking a different test-id attribute.
    pub fn with_test_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.test_id_attribute = attribute.into();
        self
    }

    /// Config using a different range mode.
    pub fn with_range_mode(mut self, mode: RangeMode) -> Self {
        self.range_mode = mode;
        self
    }

    /// Reject values the correlator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let attr = self.test_id_attribute.trim();
        if attr.is_empty() {
            return Err(HookdiffError::InvalidValue {
                key: "test_id_attribute",
                message: "must not be empty".to_string(),
            });
        }
        if attr.chars().any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>')) {
            return Err(HookdiffError::InvalidValue {
                key: "test_id_attribute",
                message: format!("`{}` is not a markup attribute name", attr),
            });
        }
        Ok(())
    }
}
