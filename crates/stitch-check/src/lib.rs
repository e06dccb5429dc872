//! Stitch Check - Consistency rules for admitted patterns
//!
//! This crate inspects the steps of each section for problems a schema
//! cannot express: missing baseline counts, implausible count jumps and
//! increase steps whose count does not rise. Findings are advisory; only a
//! pattern with no sections is reported as invalid.

mod action;
mod config;
mod evaluator;
mod report;
mod types;

pub use action::{ActionVocabulary, Classification, VocabularyKind};
pub use config::{CheckConfig, CheckSettings, DEFAULT_JUMP_MULTIPLIER};
pub use evaluator::{ConsistencyChecker, NO_PARTS_MESSAGE};
pub use report::{ValidationReport, ValidationResult};
pub use types::{Diagnostic, RuleId, Severity};

use stitch_schema::Pattern;

/// Check a pattern with the default configuration
pub fn check(pattern: &Pattern) -> ValidationResult {
    ConsistencyChecker::default().check(pattern).to_result()
}
