//! Generation provider trait and request types

use base64::Engine;
use serde::{Deserialize, Serialize};
use stitch_core::{Result, StitchError};
use stitch_schema::Mode;

/// A request to generate a pattern from a photo of finished work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Bare base64 image data, without any `data:` URL prefix
    pub image_base64: String,
    pub mode: Mode,
}

impl GenerateRequest {
    /// Build a request from an uploaded payload
    ///
    /// Accepts either bare base64 or a `data:image/<type>;base64,` URL.
    pub fn from_payload(image: &str, mode: Mode) -> Result<Self> {
        let data = strip_data_url(image.trim());
        if data.is_empty() {
            return Err(StitchError::InvalidRequest("No image provided".to_string()));
        }
        Ok(Self {
            image_base64: data.to_string(),
            mode,
        })
    }

    /// Build a request from raw image bytes
    pub fn from_bytes(bytes: &[u8], mode: Mode) -> Result<Self> {
        if bytes.is_empty() {
            return Err(StitchError::InvalidRequest("No image provided".to_string()));
        }
        Ok(Self {
            image_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            mode,
        })
    }

    /// Build a request by downloading the image at `url`
    pub fn from_url(url: &str, mode: Mode) -> Result<Self> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StitchError::InvalidRequest(format!(
                "Image URL must be http or https: {}",
                url
            )));
        }
        tracing::info!(url, "fetching image");
        let bytes = crate::http::download_bytes_with_retry(url)?;
        Self::from_bytes(&bytes, mode)
    }
}

fn strip_data_url(image: &str) -> &str {
    let Some(rest) = image.strip_prefix("data:image/") else {
        return image;
    };
    match rest.split_once(";base64,") {
        Some((subtype, data)) if is_word(subtype) => data,
        _ => image,
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
}

/// Trait implemented by each generation provider
///
/// Providers return the raw text the model produced. Extracting JSON from it
/// and admitting it through the schema is the pipeline's job.
pub trait PatternProvider: Send + Sync {
    /// Provider name (e.g. "mock", "command")
    fn name(&self) -> &str;

    /// Check if the provider can currently serve requests
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Generate a pattern candidate synchronously
    fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix_stripped() {
        let request =
            GenerateRequest::from_payload("data:image/jpeg;base64,QUJD", Mode::Exact).unwrap();
        assert_eq!(request.image_base64, "QUJD");
        assert_eq!(request.mode, Mode::Exact);
    }

    #[test]
    fn test_bare_base64_kept() {
        let request = GenerateRequest::from_payload("  QUJD\n", Mode::Instant).unwrap();
        assert_eq!(request.image_base64, "QUJD");
    }

    #[test]
    fn test_non_image_data_url_untouched() {
        let payload = "data:text/plain;base64,QUJD";
        let request = GenerateRequest::from_payload(payload, Mode::Instant).unwrap();
        assert_eq!(request.image_base64, payload);
    }

    #[test]
    fn test_from_bytes_encodes() {
        let request = GenerateRequest::from_bytes(b"ABC", Mode::Exact).unwrap();
        assert_eq!(request.image_base64, "QUJD");
        assert!(GenerateRequest::from_bytes(b"", Mode::Exact).is_err());
    }

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let result = GenerateRequest::from_url("file:///tmp/osito.jpg", Mode::Instant);
        assert!(matches!(result, Err(StitchError::InvalidRequest(_))));
    }

    #[test]
    fn test_from_url_unreachable_host() {
        let result = GenerateRequest::from_url("http://127.0.0.1:9/osito.jpg", Mode::Instant);
        assert!(matches!(result, Err(StitchError::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            GenerateRequest::from_payload("", Mode::Instant),
            Err(StitchError::InvalidRequest(_))
        ));
        assert!(GenerateRequest::from_payload("data:image/png;base64,", Mode::Instant).is_err());
    }
}
