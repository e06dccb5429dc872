//! Generation pipeline
//!
//! One job runs the provider, strips fences from its answer, admits the
//! result through the schema and checks it for consistency.

use crate::extract::extract_json;
use crate::provider::{GenerateRequest, PatternProvider};
use serde::Serialize;
use stitch_check::{ConsistencyChecker, Diagnostic, ValidationResult};
use stitch_core::Result;
use stitch_schema::Pattern;

/// Everything produced by a successful generation job
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub job_id: String,
    pub provider: String,
    pub pattern: Pattern,
    pub validation: ValidationResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run a single generation job end to end
///
/// A provider failure or a candidate that is not a valid pattern aborts the
/// job. Consistency findings never do; they travel in the outcome.
pub fn run_job(
    provider: &dyn PatternProvider,
    request: &GenerateRequest,
    checker: &ConsistencyChecker,
) -> Result<JobOutcome> {
    let job_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("job", id = %job_id, provider = provider.name());
    let _guard = span.enter();

    tracing::info!(mode = %request.mode, "generating");
    let raw = provider.generate(request)?;

    let payload = extract_json(&raw);
    tracing::debug!(bytes = payload.len(), "extracted candidate");

    let pattern = stitch_schema::parse_str(&payload).inspect_err(|e| {
        tracing::warn!(issues = e.len(), "candidate rejected by schema");
    })?;

    let report = checker.check(&pattern);
    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "checked \"{}\"",
        pattern.title
    );

    Ok(JobOutcome {
        job_id,
        provider: provider.name().to_string(),
        validation: report.to_result(),
        diagnostics: report.diagnostics,
        pattern,
    })
}
