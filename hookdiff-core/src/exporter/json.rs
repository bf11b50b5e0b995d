//! JSON format exporter.

use crate::error::Result;
use crate::types::AnalysisResult;

/// Export analysis results to JSON.
pub fn export(results: &[AnalysisResult], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    Ok(json)
}
