use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LlmConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Tool settings, lowest to highest precedence: built-in defaults,
/// `casegen.toml`, `CASEGEN_*` environment variables, and the bare
/// `GEMINI_API_KEY` variable the original tool reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub stories_dir: PathBuf,
    pub output: PathBuf,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            stories_dir: PathBuf::from("HUs"),
            output: PathBuf::from("casos_prueba_total.csv"),
            port: 3001,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("casegen.toml"))
            .merge(Env::prefixed("CASEGEN_"))
            .merge(Env::raw().only(&["GEMINI_API_KEY"]).map(|_| "api_key".into()))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }

    /// A blank `GEMINI_API_KEY` counts as no key at all.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty())
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            temperature: Some(self.temperature),
            ..LlmConfig::default()
        }
    }
}
