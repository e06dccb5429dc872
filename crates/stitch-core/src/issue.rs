//! Structural issues reported by the schema gate
//!
//! A `StructuralError` means the candidate is not shaped like a pattern at
//! all. It always carries every issue found, in document order.

use serde::Serialize;
use std::fmt;

/// What went wrong at a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    MissingRequiredField,
    InvalidFieldType { expected: String, got: String },
    InvalidEnumValue { value: String, allowed: Vec<String> },
    ValueOutOfRange { min: f64, max: f64, value: f64 },
    NotAnInteger { value: f64 },
    InvalidLength { expected: usize, got: usize },
    LiteralMismatch { expected: String, got: String },
    Undecodable { detail: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::MissingRequiredField => write!(f, "missing required field"),
            IssueKind::InvalidFieldType { expected, got } => {
                write!(f, "invalid type: expected {}, got {}", expected, got)
            }
            IssueKind::InvalidEnumValue { value, allowed } => {
                write!(f, "invalid value '{}', expected one of {:?}", value, allowed)
            }
            IssueKind::ValueOutOfRange { min, max, value } => {
                write!(f, "value {} out of range {}..={}", value, min, max)
            }
            IssueKind::NotAnInteger { value } => {
                write!(f, "expected a whole number, got {} (fractional part)", value)
            }
            IssueKind::InvalidLength { expected, got } => {
                write!(f, "expected {} elements, got {}", expected, got)
            }
            IssueKind::LiteralMismatch { expected, got } => {
                write!(f, "expected literal '{}', got '{}'", expected, got)
            }
            IssueKind::Undecodable { detail } => write!(f, "cannot decode: {}", detail),
        }
    }
}

/// A single field that violated the pattern contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Location in the candidate, e.g. `parts[0].instructions[2].stitch_count`
    pub path: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The candidate is not a pattern. Terminal for the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralError {
    pub issues: Vec<FieldIssue>,
}

impl StructuralError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Number of offending fields
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Paths of every offending field, in report order
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Not a valid pattern ({} issue(s))", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for StructuralError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_issue() {
        let err = StructuralError::new(vec![
            FieldIssue::new(
                "mode",
                IssueKind::InvalidEnumValue {
                    value: "fast".to_string(),
                    allowed: vec!["instant".to_string(), "exact".to_string()],
                },
            ),
            FieldIssue::new(
                "confidence",
                IssueKind::ValueOutOfRange {
                    min: 0.0,
                    max: 100.0,
                    value: 140.0,
                },
            ),
        ]);

        let text = err.to_string();
        assert!(text.starts_with("Not a valid pattern (2 issue(s))"));
        assert!(text.contains("mode: invalid value 'fast'"));
        assert!(text.contains("confidence: value 140 out of range 0..=100"));
        assert_eq!(err.paths(), vec!["mode", "confidence"]);
    }

    #[test]
    fn test_issue_serializes_flat() {
        let issue = FieldIssue::new("title", IssueKind::MissingRequiredField);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["path"], "title");
        assert_eq!(json["kind"], "missing_required_field");
    }
}
