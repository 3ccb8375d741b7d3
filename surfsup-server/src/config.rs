//! Configuration loading - TOML file plus environment overrides
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables, then whatever the caller sets on the resulting [`ServerConfig`].
//!
//! Environment variables:
//! - `SURFSUP_BIND`: listen address, e.g. `0.0.0.0:5000`
//! - `SURFSUP_DB_PATH`: path to the SQLite file

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates::DATE_FORMAT;
use crate::server::ServerConfig;

pub const ENV_BIND: &str = "SURFSUP_BIND";
pub const ENV_DB_PATH: &str = "SURFSUP_DB_PATH";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid anchor date '{value}': {source}")]
    InvalidAnchorDate {
        value: String,
        source: chrono::ParseError,
    },
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfsupConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub dataset: DatasetSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetSection {
    /// Last date of the dataset snapshot (YYYY-MM-DD)
    pub anchor_date: Option<String>,
}

impl SurfsupConfig {
    /// Default config location: ~/.surfsup/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".surfsup")
            .join("config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    tracing::debug!(path = %default.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `SURFSUP_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = Some(bind);
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database.path = Some(PathBuf::from(path));
        }
        self
    }

    /// Resolve against defaults into a runnable server configuration.
    pub fn into_server_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::default();

        if let Some(bind) = self.server.bind {
            config.bind_addr = bind
                .parse()
                .map_err(|source| ConfigError::InvalidBind { value: bind, source })?;
        }
        if let Some(secs) = self.server.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(permissive) = self.server.cors_permissive {
            config.cors_permissive = permissive;
        }
        if let Some(path) = self.database.path {
            config.db_path = path;
        }
        if let Some(anchor) = self.dataset.anchor_date {
            config.anchor_date = parse_anchor_date(&anchor)?;
        }

        Ok(config)
    }
}

/// Parse an anchor date given in configuration or on the command line.
pub fn parse_anchor_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ConfigError::InvalidAnchorDate {
        value: value.to_owned(),
        source,
    })
}

/// Parse a listen address given on the command line.
pub fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidBind {
        value: value.to_owned(),
        source,
    })
}
