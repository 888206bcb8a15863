//! Assistant settings.
//!
//! Settings are read from `settings.json` in the user's config directory (or
//! XDG equivalent). The API key is never persisted; it always comes from the
//! `ANTHROPIC_API_KEY` environment variable or an explicit builder call.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::providers::ai::{ANTHROPIC_API_URL, ANTHROPIC_VERSION};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Model used for every request.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const SETTINGS_FILE: &str = "settings.json";

/// Configuration for the prompt client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// API credential; absence surfaces when a request is made.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Messages endpoint URL.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_version: ANTHROPIC_VERSION.to_string(),
        }
    }
}

impl AssistantSettings {
    /// Default settings with the API key taken from the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_key()
    }

    /// Loads settings from a JSON file, then takes the API key from the
    /// environment.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        Ok(settings.with_env_key())
    }

    /// Loads settings from the default location, falling back to
    /// [`AssistantSettings::from_env`] when no file exists there.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::from_env()),
        }
    }

    /// `settings.json` inside the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mailmind").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn with_env_key(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        self
    }
}
