//! Configuration loaded from the environment (and `.env`, when present).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://clubplaya-backend.azurewebsites.net";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("CLUBPLAYA_MODE must be `remote` or `local`, got `{0}`")]
    Mode(String),
    #[error("invalid value for {var}: `{value}`")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_workers: usize,
}

/// Where reservation state lives.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Remote {
        base_url: String,
        /// `None` keeps requests open until the backend answers.
        timeout: Option<Duration>,
    },
    Local {
        map_file: PathBuf,
        db_path: PathBuf,
    },
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            var: "CLUBPLAYA_HOST",
            value: raw,
        })
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: get("CLUBPLAYA_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&get, "CLUBPLAYA_PORT")?.unwrap_or(3000),
            max_workers: parsed(&get, "CLUBPLAYA_MAX_WORKERS")?.unwrap_or(8),
        };

        let mode = get("CLUBPLAYA_MODE").unwrap_or_else(|| "remote".to_string());
        let backend = match mode.trim().to_lowercase().as_str() {
            "remote" => BackendConfig::Remote {
                base_url: get("CLUBPLAYA_BACKEND_URL")
                    .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
                timeout: parsed::<u64, _>(&get, "CLUBPLAYA_HTTP_TIMEOUT_SECS")?
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
            },
            "local" => BackendConfig::Local {
                map_file: get("CLUBPLAYA_MAP_FILE")
                    .unwrap_or_else(|| "data/mapa.geojson".to_string())
                    .into(),
                db_path: get("CLUBPLAYA_DB")
                    .unwrap_or_else(|| "clubplaya.sqlite3".to_string())
                    .into(),
            },
            _ => return Err(ConfigError::Mode(mode)),
        };

        Ok(Self { server, backend })
    }
}

fn parsed<T, F>(get: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
