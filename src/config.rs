//! Application configuration.
//!
//! Values come from, in increasing priority: built-in defaults, a TOML
//! file, environment variables (a `.env` file is honoured by the binary),
//! and command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the authentication backend URL.
pub const API_URL_ENV: &str = "RAPIDREAD_API_URL";

/// Environment variable overriding the text-processing backend URL.
pub const TEXT_API_URL_ENV: &str = "RAPIDREAD_TEXT_API_URL";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the authentication backend.
    #[serde(default = "default_api_url")]
    api_url: String,

    /// Base URL of the text-processing backend; falls back to `api_url`.
    #[serde(default)]
    text_api_url: Option<String>,

    /// Pause before the CPU answers in tic-tac-toe.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Pause while the next number is revealed in higher/lower.
    #[serde(default = "default_reveal_delay_ms")]
    reveal_delay_ms: u64,

    /// How many recent tic-tac-toe results the history strip shows.
    #[serde(default = "default_history_window")]
    history_window: usize,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_opponent_delay_ms() -> u64 {
    500
}

fn default_reveal_delay_ms() -> u64 {
    1000
}

fn default_history_window() -> usize {
    3
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            text_api_url: None,
            opponent_delay_ms: default_opponent_delay_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            history_window: default_history_window(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(api_url = %config.api_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise defaults, then applies the environment.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    fn load_with(
        path: impl AsRef<Path>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_vars(var);
        config.validate()?;
        Ok(config)
    }

    /// Applies `RAPIDREAD_API_URL` / `RAPIDREAD_TEXT_API_URL` when set.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(API_URL_ENV) {
            debug!(url = %url, "API URL from environment");
            self.api_url = url;
        }
        if let Some(url) = var(TEXT_API_URL_ENV) {
            debug!(url = %url, "Text API URL from environment");
            self.text_api_url = Some(url);
        }
    }

    /// Replaces the authentication backend URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// URL of the text-processing backend.
    pub fn text_api_base(&self) -> &str {
        self.text_api_url.as_deref().unwrap_or(&self.api_url)
    }

    /// CPU reply delay.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Reveal delay.
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::new("api_url must not be empty"));
        }
        if self.history_window == 0 {
            return Err(ConfigError::new("history_window must be at least 1"));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
