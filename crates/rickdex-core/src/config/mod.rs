//! Client configuration.
//!
//! Resolves the catalog API endpoint, HTTP timeout and favorites store path
//! from explicit overrides, environment variables, an optional JSON config
//! file and built-in defaults, in that order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};


/// Public catalog API used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

pub const ENV_API_URL: &str = "RICKDEX_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "RICKDEX_HTTP_TIMEOUT_SECS";
pub const ENV_DB_PATH: &str = "RICKDEX_DB_PATH";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "rickdex";
const DB_FILE_NAME: &str = "rickdex.db";

/// On-disk configuration file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Load the config file at the default location, or an empty one if absent.
    pub fn load() -> Result<Self, String> {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))
    }
}

/// Values supplied explicitly by the caller (e.g. command-line flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub db_path: Option<PathBuf>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Catalog API base URL, without a trailing slash
    pub api_base_url: String,
    /// Timeout applied to every catalog request
    pub request_timeout: Duration,
    /// Favorites store location
    pub db_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            db_path: default_db_path(),
        }
    }
}

impl ClientConfig {
    /// Resolve from overrides, the process environment and the default config file.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, String> {
        let file = ConfigFile::load()?;
        Self::resolve(overrides, |key| std::env::var(key).ok(), file)
    }

    /// Resolve with an explicit environment lookup and config file.
    ///
    /// Public for testability; callers can exercise resolution without
    /// touching the process environment.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> Result<Self, String> {
        let api_base_url = non_blank(overrides.api_base_url)
            .or_else(|| non_blank(env(ENV_API_URL)))
            .or_else(|| non_blank(file.api_base_url))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)?;

        let env_timeout = non_blank(env(ENV_HTTP_TIMEOUT_SECS))
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| format!("{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds"))
            })
            .transpose()?;
        let timeout_secs = overrides
            .request_timeout_secs
            .or(env_timeout)
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err("request timeout must be greater than zero".to_string());
        }

        let db_path = overrides
            .db_path
            .or_else(|| non_blank(env(ENV_DB_PATH)).map(PathBuf::from))
            .or(file.db_path)
            .unwrap_or_else(default_db_path);

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            db_path,
        })
    }
}

/// Default config file location, `None` when the platform has no config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Default favorites store location.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

/// Trimmed value, or `None` when missing or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(format!(
            "API base URL '{value}' must include http:// or https://"
        )),
    }
}
