use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sentiment::DEFAULT_MAX_CHARS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config: {0}")]
    Write(std::io::Error),

    #[error("config {0} already exists (use --force to overwrite)")]
    Exists(PathBuf),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; any origin when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
    /// Directory of a built frontend to serve at `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_root: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
            cors_origin: None,
            web_root: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.x.ai/v1".to_string(),
            model: "grok-2-latest".to_string(),
            max_tokens: 300,
            temperature: 0.8,
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub max_chars: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    pub analyze_delay_ms: u64,
    pub topics_delay_ms: u64,
    /// Fixed random seed; every call returns the same mock numbers when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            analyze_delay_ms: 500,
            topics_delay_ms: 300,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub sentiment: SentimentConfig,
    pub trends: TrendsConfig,
}

impl ServiceConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::read(path)?,
            _ => ServiceConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the config as TOML, refusing to replace an existing file
    /// unless `overwrite` is set.
    pub fn write(&self, path: &Path, overwrite: bool) -> Result<(), ConfigError> {
        if path.exists() && !overwrite {
            return Err(ConfigError::Exists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(ConfigError::Write)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides from `lookup`; blank or unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = lookup("TRENDLENS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TRENDLENS_PORT").and_then(|value| value.parse().ok()) {
            self.server.port = port;
        }
        if let Some(origin) = lookup("FRONTEND_URL") {
            self.server.cors_origin = Some(origin);
        }
        if let Some(web_root) = lookup("TRENDLENS_WEB_ROOT") {
            self.server.web_root = Some(web_root);
        }
        if let Some(api_base) = lookup("LLM_API_BASE") {
            self.provider.api_base = api_base;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.provider.model = model;
        }
        if let Some(timeout) = lookup("LLM_TIMEOUT_MS").and_then(|value| value.parse().ok()) {
            self.provider.timeout_ms = timeout;
        }
        if let Some(delay) = lookup("TRENDS_DELAY_MS").and_then(|value| value.parse().ok()) {
            self.trends.analyze_delay_ms = delay;
            self.trends.topics_delay_ms = delay;
        }
        if let Some(seed) = lookup("TRENDS_SEED").and_then(|value| value.parse().ok()) {
            self.trends.seed = Some(seed);
        }
    }
}

pub fn api_key_from_env() -> Option<String> {
    env::var("LLM_API_KEY")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn default_config_path() -> Option<PathBuf> {
    env::var("TRENDLENS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/trendlens.toml")))
}
