//! Harness settings: base URL, request timeout and optional bearer key.
//!
//! Layered as defaults, then an optional `appsettings.json`-style file, then
//! environment variables. The process-wide copy is loaded once by
//! [`HarnessConfig::global`] and never mutated afterwards.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "API_TIMEOUT_SECONDS";
pub const ENV_API_KEY: &str = "API_KEY";

const MIN_TIMEOUT_REASON: &str = "timeout must be at least one second";

static GLOBAL: OnceLock<HarnessConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

/// On-disk shape: `{"ApiSettings": {"BaseUrl": ..., "TimeoutSeconds": ..., "ApiKey": ...}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    api_settings: ApiSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    api_key: Option<String>,
}

impl HarnessConfig {
    /// Settings for a specific base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults, then `appsettings.json` in the working directory if
    /// present, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let path = Path::new(DEFAULT_SETTINGS_FILE);
        if path.exists() {
            config.merge_file(path)?;
        }
        config.merge_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// The process-wide settings, loaded on first use.
    pub fn global() -> Result<&'static HarnessConfig, ConfigError> {
        if let Some(config) = GLOBAL.get() {
            return Ok(config);
        }
        let loaded = Self::load()?;
        Ok(GLOBAL.get_or_init(|| loaded))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let origin = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        self.merge_json(&raw, &origin)
    }

    fn merge_json(&mut self, raw: &str, origin: &str) -> Result<(), ConfigError> {
        let file: SettingsFile = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        let settings = file.api_settings;
        if settings.timeout_seconds == Some(0) {
            return Err(ConfigError::InvalidFile {
                path: origin.to_string(),
                key: "TimeoutSeconds",
                reason: MIN_TIMEOUT_REASON.to_string(),
            });
        }
        if let Some(base_url) = settings.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout) = settings.timeout_seconds {
            self.timeout_secs = timeout;
        }
        if settings.api_key.is_some() {
            self.api_key = settings.api_key.filter(|key| !key.is_empty());
        }
        Ok(())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_timeout(&raw)?;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key).filter(|k| !k.is_empty());
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnv {
        name: ENV_TIMEOUT_SECS,
        value: raw.to_string(),
        reason,
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(MIN_TIMEOUT_REASON.to_string())),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(e.to_string())),
    }
}
