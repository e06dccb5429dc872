//! Shared HTTP plumbing for network-backed providers and image fetches

use std::io::Read;
use std::time::Duration;
use stitch_core::{Result, StitchError};

const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

pub(crate) fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

pub(crate) fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}

/// POST a JSON body and decode the JSON answer, retrying transient failures
pub(crate) fn post_json_with_retry(
    url: &str,
    headers: &[(&str, &str)],
    payload: &serde_json::Value,
) -> Result<serde_json::Value> {
    for attempt in 0..MAX_RETRIES {
        let agent = build_agent();
        let mut request = agent.post(url).header("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        match request.send_json(payload) {
            Ok(mut ok) => {
                return ok.body_mut().read_json().map_err(|e| {
                    StitchError::GenerationError(format!("Failed to parse model response: {}", e))
                });
            }
            Err(e) => {
                if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                    tracing::warn!(attempt, error = %e, "retrying model request");
                    sleep_backoff(attempt);
                    continue;
                }
                return Err(StitchError::GenerationError(format!(
                    "Model request failed: {}",
                    e
                )));
            }
        }
    }

    Err(StitchError::GenerationError(
        "Model request failed after retries".to_string(),
    ))
}

/// GET a URL and return the raw body, retrying transient failures
pub(crate) fn download_bytes_with_retry(url: &str) -> Result<Vec<u8>> {
    for attempt in 0..MAX_RETRIES {
        let agent = build_agent();

        match agent.get(url).call() {
            Ok(ok) => {
                let mut reader = ok.into_body().into_reader();
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).map_err(|e| {
                    StitchError::InvalidRequest(format!("Failed to read image data: {}", e))
                })?;
                return Ok(bytes);
            }
            Err(e) => {
                if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                    tracing::warn!(attempt, error = %e, "retrying image download");
                    sleep_backoff(attempt);
                    continue;
                }
                return Err(StitchError::InvalidRequest(format!(
                    "Failed to fetch image from URL: {}",
                    e
                )));
            }
        }
    }

    Err(StitchError::InvalidRequest(
        "Image download failed after retries".to_string(),
    ))
}
