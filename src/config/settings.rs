use crate::provider::credentials::{Credentials, API_ENDPOINT, API_KEY};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Environment variable read for the `api_key` credential outside a host
pub const API_KEY_ENV: &str = "LEGAL_API_KEY";
/// Environment variable read for the `api_endpoint` credential outside a host
pub const API_ENDPOINT_ENV: &str = "LEGAL_API_ENDPOINT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound on the single outbound analysis call
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load `config/{CONFIG_ENV}` (optional) and `LCR__*` overrides
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir(Path::new("config"))
    }

    /// Load `{dir}/{CONFIG_ENV}` when present, `CONFIG_ENV` defaulting to `default`
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());
        let name = dir.join(config_env);

        Config::builder()
            .add_source(File::with_name(&name.to_string_lossy()).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load an explicit settings file; `LCR__*` variables still take precedence
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Credentials for running outside a host, unset variables left out
    pub fn credentials_from_env() -> Credentials {
        [(API_KEY, API_KEY_ENV), (API_ENDPOINT, API_ENDPOINT_ENV)]
            .into_iter()
            .filter_map(|(key, var)| env::var(var).ok().map(|value| (key, value)))
            .collect()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LCR")
        .separator("__")
        .try_parsing(true)
}
