//! Stitch Schema - The pattern data contract
//!
//! This crate defines the canonical shape of a crochet pattern and is the
//! admission gate for candidates coming from a generator: `parse` either
//! returns a fully typed `Pattern` or a `StructuralError` listing every field
//! that broke the contract.

mod contract;
mod descriptor;
mod types;
mod validation;

pub use contract::pattern_schema;
pub use descriptor::{FieldSchema, FieldType, ObjectSchema};
pub use types::{
    Abbreviation, Calibration, Category, Fiber, FiberKind, Gauge, Materials, Mode, Pattern,
    Section, Step, StepAction, Weight, WeightKind, Worked, Yarn, BRAND,
};
pub use stitch_core::StructuralError;
pub use validation::validate_value;

use serde::Deserialize;
use serde_json::Value;
use stitch_core::{FieldIssue, IssueKind};

/// Admit a candidate value as a `Pattern`
///
/// Deterministic: the same candidate always yields the same pattern or the
/// same ordered issue list.
pub fn parse(candidate: &Value) -> Result<Pattern, StructuralError> {
    let issues = validate_value(pattern_schema(), candidate);
    if !issues.is_empty() {
        tracing::debug!(issues = issues.len(), "candidate rejected by schema");
        return Err(StructuralError::new(issues));
    }

    Pattern::deserialize(candidate).map_err(|e| undecodable(e.to_string()))
}

/// Decode JSON text and admit it as a `Pattern`
pub fn parse_str(text: &str) -> Result<Pattern, StructuralError> {
    let value: Value = serde_json::from_str(text).map_err(|e| undecodable(e.to_string()))?;
    parse(&value)
}

/// Encode a pattern to its external JSON form; `parse` is the inverse
pub fn encode(pattern: &Pattern) -> stitch_core::Result<Value> {
    Ok(serde_json::to_value(pattern)?)
}

fn undecodable(detail: String) -> StructuralError {
    StructuralError::new(vec![FieldIssue::new("$", IssueKind::Undecodable { detail })])
}
