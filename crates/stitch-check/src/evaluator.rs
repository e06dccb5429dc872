//! Consistency rule engine
//!
//! Runs over an already admitted `Pattern`. Only an empty section list is an
//! error; everything else is advisory and lands as a warning.

use crate::config::CheckConfig;
use crate::report::ValidationReport;
use crate::types::{Diagnostic, RuleId};
use stitch_schema::{Pattern, Section, Step, StepAction};

pub const NO_PARTS_MESSAGE: &str = "Pattern has no parts.";

/// Evaluates the consistency rules against patterns
#[derive(Debug, Clone, Default)]
pub struct ConsistencyChecker {
    config: CheckConfig,
}

impl ConsistencyChecker {
    /// Create a new checker
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run all rules and return a report
    pub fn check(&self, pattern: &Pattern) -> ValidationReport {
        let mut report = ValidationReport::new();

        if pattern.parts.is_empty() {
            report.push(Diagnostic::error(RuleId::NoParts, NO_PARTS_MESSAGE));
            return report;
        }

        for section in &pattern.parts {
            self.check_section(section, &mut report);
        }

        report
    }

    fn check_section(&self, section: &Section, report: &mut ValidationReport) {
        let mut last_known_count: u32 = 0;
        let mut previous: Option<&Step> = None;

        for step in &section.instructions {
            if previous.is_none() {
                self.check_baseline_count(section, step, report);
            }

            if let Some(count) = step.stitch_count {
                self.check_plausible_jump(section, step, last_known_count, count, report);
                last_known_count = count;
            }

            if let Some(prev) = previous {
                self.check_action_agreement(section, prev, step, report);
            }

            previous = Some(step);
        }
    }

    fn check_baseline_count(&self, section: &Section, first: &Step, report: &mut ValidationReport) {
        if first.stitch_count.is_none() {
            report.push(Diagnostic::warning(
                RuleId::BaselineCount,
                &section.name,
                first.step,
                format!(
                    "{} - Step {}: First row/round usually needs a stitch count.",
                    section.name, first.step
                ),
            ));
        }
    }

    fn check_plausible_jump(
        &self,
        section: &Section,
        step: &Step,
        last: u32,
        count: u32,
        report: &mut ValidationReport,
    ) {
        if last == 0 {
            return;
        }

        let diff = (i64::from(count) - i64::from(last)).abs() as f64;
        if diff > f64::from(last) * self.config.jump_multiplier {
            report.push(Diagnostic::warning(
                RuleId::PlausibleJump,
                &section.name,
                step.step,
                format!(
                    "{} - Step {}: Stitch count changed drastically from {} to {}. Correct?",
                    section.name, step.step, last, count
                ),
            ));
        }
    }

    /// Compares against the immediately preceding step, not the last known
    /// count: a null count in between disables the rule for this step.
    fn check_action_agreement(
        &self,
        section: &Section,
        prev: &Step,
        step: &Step,
        report: &mut ValidationReport,
    ) {
        let (Some(prev_count), Some(count)) = (prev.stitch_count, step.stitch_count) else {
            return;
        };

        let classification = self.config.vocabulary.classify(step);
        if classification.action != StepAction::Increase || count > prev_count {
            return;
        }

        let claim = match classification.marker {
            Some(marker) => format!("Instructions mention '{}'", marker),
            None => "Step is tagged as an increase".to_string(),
        };
        report.push(Diagnostic::warning(
            RuleId::ActionAgreement,
            &section.name,
            step.step,
            format!(
                "{} - Step {}: {} but stitch count did not increase (prev: {}, curr: {}).",
                section.name, step.step, claim, prev_count, count
            ),
        ));
    }
}
