//! Serialization of analysis results for reporting layers.

pub mod json;
