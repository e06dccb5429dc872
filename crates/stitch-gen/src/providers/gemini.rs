//! Gemini pattern provider
//!
//! Sends the photo and a mode-specific prompt to the Gemini
//! `generateContent` endpoint and returns the model's text answer.

use crate::config::StitchConfig;
use crate::http::post_json_with_retry;
use crate::prompt::pattern_prompt;
use crate::provider::{GenerateRequest, PatternProvider, ProviderStatus};
use serde_json::{json, Value};
use stitch_core::{Result, StitchError};

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Keys shorter than this are placeholders, not credentials
const MIN_KEY_LEN: usize = 6;

pub struct GeminiProvider {
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new GeminiProvider from config
    pub fn from_config(config: &StitchConfig) -> Result<Self> {
        let api_key = config
            .api_key("gemini")
            .filter(|key| has_usable_key(key))
            .ok_or_else(|| {
                StitchError::ConfigError(
                    "Gemini API key not configured. Set STITCH_GEMINI_API_KEY or add to .stitch/config.toml"
                        .to_string(),
                )
            })?
            .to_string();

        let settings = config.provider("gemini");
        let api_url = settings
            .and_then(|p| p.api_url.as_deref())
            .unwrap_or(DEFAULT_GEMINI_URL)
            .trim_end_matches('/')
            .to_string();
        let model = settings
            .and_then(|p| p.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }
}

/// Whether a configured key looks like a real credential
pub fn has_usable_key(key: &str) -> bool {
    key.trim().len() >= MIN_KEY_LEN
}

/// The `generateContent` body: prompt text plus the inline photo
fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "text": pattern_prompt(request.mode) },
                { "inline_data": { "mime_type": "image/jpeg", "data": request.image_base64 } }
            ]
        }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

/// Concatenate the text parts of the first candidate
fn response_text(response: &Value) -> Result<String> {
    if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
        return Err(StitchError::GenerationError(format!(
            "Gemini refused the request: {}",
            reason
        )));
    }

    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            StitchError::GenerationError("Gemini response has no candidate content".to_string())
        })?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(StitchError::GenerationError(
            "Gemini returned an empty answer".to_string(),
        ));
    }
    Ok(text)
}

impl PatternProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if !has_usable_key(&self.api_key) {
            return Ok(ProviderStatus::Unavailable("no API key".to_string()));
        }
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        tracing::info!(model = %self.model, mode = %request.mode, "calling Gemini");
        let response = post_json_with_retry(
            &self.endpoint(),
            &[("x-goog-api-key", self.api_key.as_str())],
            &request_body(request),
        )?;
        response_text(&response)
    }
}
