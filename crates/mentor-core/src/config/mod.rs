use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{defaults, endpoints, models, paths};
use crate::error::MentorError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// How many past messages are forwarded to the completion API.
    pub history_window: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Emulate thinking time on the local reply path.
    pub latency: bool,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            api_key_env: defaults::API_KEY_ENV.to_string(),
            base_url: None,
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
            history_window: defaults::HISTORY_WINDOW,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self { latency: true }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or does not parse.
    pub fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring invalid config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Could not read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), MentorError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), MentorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MentorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding the persisted chat records.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(paths::DATA_DIR)
        })
    }

    pub fn base_url(&self) -> &str {
        self.llm
            .base_url
            .as_deref()
            .unwrap_or(endpoints::OPENAI_BASE_URL)
    }

    /// Get the API key from the environment variable specified in settings.
    pub fn api_key(&self) -> Option<String> {
        if self.llm.api_key_env.is_empty() {
            return None;
        }
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
