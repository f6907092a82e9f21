// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::CoachError;
use crate::infra::paths;

/// Topic used whenever the topic field is blank at the moment a question is fetched.
pub const DEFAULT_TOPIC: &str = "Kotlin & Jetpack Compose";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub interview: InterviewConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    /// Literal key; takes precedence over `api_key_env` when set.
    #[serde(default)]
    pub api_key: Option<String>,
    pub temperature: f32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: "groq".into(),
            name: "Groq".into(),
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "llama-3.3-70b-versatile".into(),
            api_key_env: "GROQ_API_KEY".into(),
            api_key: None,
            temperature: 0.7,
            connect_timeout_secs: 30,
            request_timeout_secs: 60,
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from the literal setting or the configured env var.
    pub fn resolve_api_key(&self) -> Result<String, CoachError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CoachError::Config(format!(
                "No API key for '{}'. Set {} or provider.api_key in {}.",
                self.id,
                self.api_key_env,
                paths::config_file_path().display()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub default_topic: String,
    pub question_max_tokens: u32,
    pub score_max_tokens: u32,
    pub history_limit: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            default_topic: DEFAULT_TOPIC.into(),
            question_max_tokens: 300,
            score_max_tokens: 600,
            history_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Program that records once and prints the recognized text on stdout.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
