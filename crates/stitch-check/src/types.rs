//! Diagnostic type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The rule that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// The pattern has no sections at all
    NoParts,
    /// The first step of a section has no stitch count
    BaselineCount,
    /// The stitch count moved by more than the configured multiple
    PlausibleJump,
    /// An increase step whose count did not rise
    ActionAgreement,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::NoParts => "no_parts",
            RuleId::BaselineCount => "baseline_count",
            RuleId::PlausibleJump => "plausible_jump",
            RuleId::ActionAgreement => "action_agreement",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, tagged with where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule: RuleId,
    /// Section name, absent for pattern-level findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Step number as written in the pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule,
            section: None,
            step: None,
            message: message.into(),
        }
    }

    pub fn warning(rule: RuleId, section: &str, step: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule,
            section: Some(section.to_string()),
            step: Some(step),
            message: message.into(),
        }
    }
}
