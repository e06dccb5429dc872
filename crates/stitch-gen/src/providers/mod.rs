//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod command;
pub mod gemini;
pub mod mock;

use crate::config::StitchConfig;
use crate::provider::PatternProvider;
use stitch_core::{Result, StitchError};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &StitchConfig) -> Result<Box<dyn PatternProvider>> {
    if !config.is_enabled(name) {
        return Err(StitchError::ConfigError(format!(
            "Provider '{}' is disabled in config",
            name
        )));
    }

    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new())),
        "gemini" => {
            let has_key = config.api_key("gemini").is_some_and(gemini::has_usable_key);
            if has_key {
                Ok(Box::new(gemini::GeminiProvider::from_config(config)?))
            } else {
                tracing::warn!("no Gemini API key found, using the mock provider");
                Ok(Box::new(mock::MockProvider::new()))
            }
        }
        "command" => Ok(Box::new(command::CommandProvider::from_config(config)?)),
        _ => Err(StitchError::GenerationError(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["gemini", "mock", "command"]
}
