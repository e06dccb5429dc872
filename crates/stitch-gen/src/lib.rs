//! Stitch Gen - Pattern generation pipeline
//!
//! Turns a photo of finished work into an admitted, checked pattern. A
//! pluggable provider produces the candidate text; the pipeline extracts
//! the JSON, gates it through the schema and runs the consistency rules.

pub mod config;
pub mod extract;
mod http;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use config::StitchConfig;
pub use extract::extract_json;
pub use pipeline::{run_job, JobOutcome};
pub use prompt::pattern_prompt;
pub use provider::{GenerateRequest, PatternProvider, ProviderStatus};
pub use providers::{available_providers, create_provider};
