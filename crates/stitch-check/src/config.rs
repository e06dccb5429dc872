//! Checker configuration
//!
//! Thresholds and the action vocabulary live here rather than in the rules,
//! so they can be tuned from TOML without touching rule logic.

use crate::action::{ActionVocabulary, VocabularyKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stitch_core::{Result, StitchError};

/// Default multiple of the previous count a step may move by.
///
/// Rounds normally grow or shrink by a small multiple per pass; anything
/// beyond doubling is almost always a generation slip.
pub const DEFAULT_JUMP_MULTIPLIER: f64 = 2.0;

/// Raw `[check]` settings as they appear in TOML files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSettings {
    #[serde(default)]
    pub jump_multiplier: Option<f64>,
    #[serde(default)]
    pub vocabulary: Option<VocabularyKind>,
    #[serde(default)]
    pub increase_markers: Option<Vec<String>>,
    #[serde(default)]
    pub decrease_markers: Option<Vec<String>>,
}

impl CheckSettings {
    /// Overlay `other` on top of `self`; set values in `other` win
    pub fn merge(&mut self, other: CheckSettings) {
        if other.jump_multiplier.is_some() {
            self.jump_multiplier = other.jump_multiplier;
        }
        if other.vocabulary.is_some() {
            self.vocabulary = other.vocabulary;
        }
        if other.increase_markers.is_some() {
            self.increase_markers = other.increase_markers;
        }
        if other.decrease_markers.is_some() {
            self.decrease_markers = other.decrease_markers;
        }
    }
}

/// Resolved, validated checker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub jump_multiplier: f64,
    pub vocabulary: ActionVocabulary,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            jump_multiplier: DEFAULT_JUMP_MULTIPLIER,
            vocabulary: ActionVocabulary::default(),
        }
    }
}

impl CheckConfig {
    /// Resolve raw settings, rejecting values the rules cannot work with
    pub fn from_settings(settings: &CheckSettings) -> Result<Self> {
        let jump_multiplier = settings
            .jump_multiplier
            .unwrap_or(DEFAULT_JUMP_MULTIPLIER);
        if !jump_multiplier.is_finite() || jump_multiplier <= 0.0 {
            return Err(StitchError::ConfigError(format!(
                "jump_multiplier must be a positive number, got {}",
                jump_multiplier
            )));
        }

        let kind = settings.vocabulary.unwrap_or_default();
        // A custom vocabulary inherits nothing: absent decrease_markers means none
        if kind == VocabularyKind::Custom && settings.increase_markers.is_none() {
            return Err(StitchError::ConfigError(
                "custom vocabulary needs increase_markers".to_string(),
            ));
        }

        let mut vocabulary = ActionVocabulary::preset(kind);
        if let Some(markers) = &settings.increase_markers {
            vocabulary = vocabulary.with_increase(markers);
        }
        if let Some(markers) = &settings.decrease_markers {
            vocabulary = vocabulary.with_decrease(markers);
        }
        if vocabulary.increase_markers().is_empty() {
            return Err(StitchError::ConfigError(
                "increase_markers must contain at least one marker".to_string(),
            ));
        }

        Ok(Self {
            jump_multiplier,
            vocabulary,
        })
    }

    /// Load configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_string(&content)
    }

    /// Load configuration from a TOML string of bare `[check]` keys
    pub fn load_string(content: &str) -> Result<Self> {
        let settings: CheckSettings = toml::from_str(content).map_err(|e| {
            StitchError::ConfigError(format!("Failed to parse check config TOML: {}", e))
        })?;
        Self::from_settings(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::load_string("").unwrap();
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.jump_multiplier, 2.0);
        assert_eq!(config.vocabulary, ActionVocabulary::english());
    }

    #[test]
    fn test_spanish_preset() {
        let config = CheckConfig::load_string(
            r#"
jump_multiplier = 3.0
vocabulary = "spanish"
"#,
        )
        .unwrap();
        assert_eq!(config.jump_multiplier, 3.0);
        assert_eq!(config.vocabulary, ActionVocabulary::spanish());
    }

    #[test]
    fn test_custom_markers() {
        let config = CheckConfig::load_string(
            r#"
vocabulary = "custom"
increase_markers = ["inc", "aum"]
decrease_markers = ["dec", "dism"]
"#,
        )
        .unwrap();
        assert_eq!(config.vocabulary.increase_markers().len(), 2);
        assert_eq!(config.vocabulary.decrease_markers()[1], "dism");
    }

    #[test]
    fn test_custom_increase_only_has_no_decrease_markers() {
        let config = CheckConfig::load_string(
            r#"
vocabulary = "custom"
increase_markers = ["aum"]
"#,
        )
        .unwrap();
        assert_eq!(config.vocabulary.increase_markers(), ["aum".to_string()]);
        assert!(config.vocabulary.decrease_markers().is_empty());
        assert_eq!(
            config.vocabulary.classify_text("aum, luego dec").action,
            stitch_schema::StepAction::Increase
        );
    }

    #[test]
    fn test_custom_without_markers_rejected() {
        let result = CheckConfig::load_string("vocabulary = \"custom\"");
        assert!(matches!(result, Err(StitchError::ConfigError(_))));
    }

    #[test]
    fn test_bad_multiplier_rejected() {
        assert!(CheckConfig::load_string("jump_multiplier = 0.0").is_err());
        assert!(CheckConfig::load_string("jump_multiplier = -1.5").is_err());
        assert!(CheckConfig::load_string("jump_multiplier = \"big\"").is_err());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base = CheckSettings {
            jump_multiplier: Some(3.0),
            vocabulary: Some(VocabularyKind::Spanish),
            ..Default::default()
        };
        base.merge(CheckSettings {
            jump_multiplier: Some(4.0),
            ..Default::default()
        });
        assert_eq!(base.jump_multiplier, Some(4.0));
        assert_eq!(base.vocabulary, Some(VocabularyKind::Spanish));
    }
}
