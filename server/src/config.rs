//! Server configuration, read once at startup from `RP_*` environment variables.

use recipebank_core::ai::{AiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9876;
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        pool_size: u32,
        timeout: Duration,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    /// `None` when AI extraction is disabled.
    pub ai: Option<AiConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("RP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(get("RP_PORT"), "RP_PORT", DEFAULT_PORT)?;

        let storage = match get("RP_STORAGE").as_deref() {
            None | Some("postgres") => StorageConfig::Postgres {
                database_url: get("RP_DATABASE_URL").ok_or(ConfigError::Missing("RP_DATABASE_URL"))?,
                pool_size: parse_positive(get("RP_DB_POOL_SIZE"), "RP_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?,
                timeout: Duration::from_secs(parse_positive(
                    get("RP_DB_TIMEOUT_SECS"),
                    "RP_DB_TIMEOUT_SECS",
                    DEFAULT_DB_TIMEOUT_SECS,
                )?),
            },
            Some("memory") => StorageConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "RP_STORAGE",
                    value: other.to_string(),
                })
            }
        };

        let ai = match get("RP_AI_PROVIDER").map(|p| p.to_lowercase()).as_deref() {
            None => None,
            Some("openai") => Some(AiConfig {
                api_key: get("RP_AI_API_KEY").ok_or(ConfigError::Missing("RP_AI_API_KEY"))?,
                model: get("RP_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("RP_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(parse_positive(
                    get("RP_AI_TIMEOUT_SECS"),
                    "RP_AI_TIMEOUT_SECS",
                    DEFAULT_AI_TIMEOUT_SECS,
                )?),
            }),
            Some(other) => {
                tracing::warn!(provider = other, "Unknown AI provider, AI features disabled");
                None
            }
        };

        Ok(Self {
            host,
            port,
            storage,
            ai,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

/// Like [`parse_or`], but zero is rejected. Used for pool sizes and timeouts.
fn parse_positive<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
{
    let parsed = parse_or(value.clone(), key, default)?;
    if parsed == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
        });
    }
    Ok(parsed)
}
