//! Validation report types

use crate::types::{Diagnostic, RuleId, Severity};
use serde::{Deserialize, Serialize};

/// The two-list view handed to callers that only want strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// A complete report, diagnostics in the order the rules fired
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            rule = %diagnostic.rule,
            section = diagnostic.section.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Check if the pattern is usable (no errors)
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Diagnostics produced by one rule
    pub fn by_rule(&self, rule: RuleId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.rule == rule).collect()
    }

    /// Diagnostics attached to one section
    pub fn for_section(&self, section: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.section.as_deref() == Some(section))
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Flatten into `{valid, errors, warnings}`
    pub fn to_result(&self) -> ValidationResult {
        ValidationResult {
            valid: self.is_valid(),
            errors: self.errors(),
            warnings: self.warnings(),
        }
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let total = self.diagnostics.len();
        if total == 0 {
            return "No problems found.".to_string();
        }

        format!(
            "{} diagnostic(s): {} error(s), {} warning(s)",
            total,
            self.error_count(),
            self.warning_count(),
        )
    }
}

impl From<&ValidationReport> for ValidationResult {
    fn from(report: &ValidationReport) -> Self {
        report.to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.push(Diagnostic::warning(RuleId::BaselineCount, "Head", 1, "first"));
        report.push(Diagnostic::warning(RuleId::PlausibleJump, "Body", 4, "second"));
        report.push(Diagnostic::warning(RuleId::PlausibleJump, "Head", 3, "third"));
        report
    }

    #[test]
    fn test_warnings_keep_order() {
        let result = sample_report().to_result();
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filters() {
        let report = sample_report();
        assert_eq!(report.by_rule(RuleId::PlausibleJump).len(), 2);
        assert_eq!(report.for_section("Head").len(), 2);
        assert_eq!(report.for_section("Arm").len(), 0);
    }

    #[test]
    fn test_error_makes_invalid() {
        let mut report = ValidationReport::new();
        report.push(Diagnostic::error(RuleId::NoParts, "Pattern has no parts."));
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.summary(), "1 diagnostic(s): 1 error(s), 0 warning(s)");
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(ValidationReport::new().summary(), "No problems found.");
    }
}
