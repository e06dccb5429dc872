//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `STITCH_PROVIDER`, `STITCH_GEMINI_API_KEY`,
//!    `STITCH_COMMAND`, `STITCH_JUMP_MULTIPLIER`, `STITCH_VOCABULARY`
//! 2. Project-local: `.stitch/config.toml`
//! 3. Global: `~/.stitch/config.toml`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stitch_check::{CheckConfig, CheckSettings, VocabularyKind};
use stitch_core::{Result, StitchError};

/// Provider-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    /// Model name (gemini provider)
    #[serde(default)]
    pub model: Option<String>,
    /// Program to run (command provider)
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            model: None,
            program: None,
            args: Vec::new(),
            timeout_secs: None,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub default_provider: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StitchConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub check: CheckSettings,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct StitchConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
    pub check: CheckSettings,
}

impl StitchConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = StitchConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".stitch/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

        Ok(config.into())
    }

    /// Load config from a specific file path, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config.into())
    }

    /// Get a provider's settings, if configured
    pub fn provider(&self, provider_name: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_name)
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Name of the provider used when none is requested
    pub fn default_provider(&self) -> &str {
        &self.generation.default_provider
    }

    /// Resolve the `[check]` section into a validated checker config
    pub fn check_config(&self) -> Result<CheckConfig> {
        CheckConfig::from_settings(&self.check)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stitch").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<StitchConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: StitchConfigFile = toml::from_str(&content).map_err(|e| {
            StitchError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut StitchConfigFile, overlay: StitchConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.model.is_some() {
                entry.model = provider.model;
            }
            if provider.program.is_some() {
                entry.program = provider.program;
            }
            if !provider.args.is_empty() {
                entry.args = provider.args;
            }
            if provider.timeout_secs.is_some() {
                entry.timeout_secs = provider.timeout_secs;
            }
            entry.enabled = provider.enabled;
        }

        if overlay.generation.default_provider != default_provider() {
            base.generation.default_provider = overlay.generation.default_provider;
        }

        base.check.merge(overlay.check);
    }

    fn apply_env_overrides<F>(config: &mut StitchConfigFile, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("STITCH_PROVIDER") {
            config.generation.default_provider = provider;
        }

        if let Some(key) = lookup("STITCH_GEMINI_API_KEY") {
            let entry = config.providers.entry("gemini".to_string()).or_default();
            entry.api_key = Some(key);
        }

        if let Some(program) = lookup("STITCH_COMMAND") {
            let entry = config.providers.entry("command".to_string()).or_default();
            entry.program = Some(program);
        }

        if let Some(raw) = lookup("STITCH_JUMP_MULTIPLIER") {
            let multiplier = raw.trim().parse::<f64>().map_err(|_| {
                StitchError::ConfigError(format!("STITCH_JUMP_MULTIPLIER is not a number: {}", raw))
            })?;
            config.check.jump_multiplier = Some(multiplier);
        }

        if let Some(raw) = lookup("STITCH_VOCABULARY") {
            let kind = match raw.trim().to_lowercase().as_str() {
                "english" => VocabularyKind::English,
                "spanish" => VocabularyKind::Spanish,
                "custom" => VocabularyKind::Custom,
                other => {
                    return Err(StitchError::ConfigError(format!(
                        "STITCH_VOCABULARY must be english, spanish or custom, got {}",
                        other
                    )))
                }
            };
            config.check.vocabulary = Some(kind);
        }

        Ok(())
    }
}

impl From<StitchConfigFile> for StitchConfig {
    fn from(file: StitchConfigFile) -> Self {
        Self {
            providers: file.providers,
            generation: file.generation,
            check: file.check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stitch_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let config_str = r#"
[providers.gemini]
api_key = "file-key-123"
model = "gemini-2.0-flash"

[providers.command]
program = "python3"
args = ["gen.py", "--json"]
timeout_secs = 90

[providers.mock]
enabled = false

[generation]
default_provider = "command"

[check]
jump_multiplier = 2.5
vocabulary = "spanish"
"#;
        let path = temp_config(config_str);
        let file = StitchConfig::load_file(&path).unwrap();
        let config: StitchConfig = file.into();

        assert_eq!(config.default_provider(), "command");
        assert!(!config.is_enabled("mock"));
        assert_eq!(config.api_key("gemini"), Some("file-key-123"));
        assert_eq!(
            config.provider("gemini").unwrap().model.as_deref(),
            Some("gemini-2.0-flash")
        );
        let command = config.provider("command").unwrap();
        assert_eq!(command.program.as_deref(), Some("python3"));
        assert_eq!(command.args, vec!["gen.py", "--json"]);
        assert_eq!(command.timeout_secs, Some(90));

        let check = config.check_config().unwrap();
        assert_eq!(check.jump_multiplier, 2.5);
        assert_eq!(check.vocabulary, stitch_check::ActionVocabulary::spanish());

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_overrides() {
        let mut file: StitchConfigFile = toml::from_str(
            r#"
[generation]
default_provider = "mock"

[check]
jump_multiplier = 3.0
"#,
        )
        .unwrap();

        StitchConfig::apply_env_overrides(
            &mut file,
            env(&[
                ("STITCH_PROVIDER", "command"),
                ("STITCH_GEMINI_API_KEY", "env-key-override"),
                ("STITCH_COMMAND", "/usr/local/bin/gen"),
                ("STITCH_JUMP_MULTIPLIER", "4"),
                ("STITCH_VOCABULARY", "Spanish"),
            ]),
        )
        .unwrap();
        let config: StitchConfig = file.into();

        assert_eq!(config.default_provider(), "command");
        assert_eq!(
            config.provider("command").unwrap().program.as_deref(),
            Some("/usr/local/bin/gen")
        );
        assert_eq!(config.check.jump_multiplier, Some(4.0));
        assert_eq!(config.check.vocabulary, Some(VocabularyKind::Spanish));
        assert_eq!(config.api_key("gemini"), Some("env-key-override"));
    }

    #[test]
    fn test_bad_env_values() {
        let mut file = StitchConfigFile::default();
        let result = StitchConfig::apply_env_overrides(
            &mut file,
            env(&[("STITCH_JUMP_MULTIPLIER", "lots")]),
        );
        assert!(matches!(result, Err(StitchError::ConfigError(_))));

        let result =
            StitchConfig::apply_env_overrides(&mut file, env(&[("STITCH_VOCABULARY", "klingon")]));
        assert!(matches!(result, Err(StitchError::ConfigError(_))));
    }

    #[test]
    fn test_merge_project_over_global() {
        let mut base: StitchConfigFile = toml::from_str(
            r#"
[providers.command]
program = "global-gen"
timeout_secs = 30

[check]
vocabulary = "spanish"
"#,
        )
        .unwrap();
        let overlay: StitchConfigFile = toml::from_str(
            r#"
[providers.command]
args = ["--fast"]

[check]
jump_multiplier = 5.0
"#,
        )
        .unwrap();

        StitchConfig::merge_into(&mut base, overlay);
        let command = &base.providers["command"];
        assert_eq!(command.program.as_deref(), Some("global-gen"));
        assert_eq!(command.args, vec!["--fast"]);
        assert_eq!(command.timeout_secs, Some(30));
        assert_eq!(base.check.vocabulary, Some(VocabularyKind::Spanish));
        assert_eq!(base.check.jump_multiplier, Some(5.0));
    }

    #[test]
    fn test_defaults() {
        let config = StitchConfig::default();
        assert_eq!(config.default_provider(), "gemini");
        assert!(config.provider("nonexistent").is_none());
        assert_eq!(config.api_key("gemini"), None);
        assert!(config.is_enabled("nonexistent"));
        assert_eq!(config.check_config().unwrap(), CheckConfig::default());
    }
}
