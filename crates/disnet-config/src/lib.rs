//! Configuration loading for disnet.
//! Reads disnet.toml (or a YAML file) from the current directory or the path in
//! the DISNET_CONFIG env var, then applies DISNET_* env overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "DISNET_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "disnet.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow any origin (the visualization frontend is served separately).
    #[serde(default = "bool_true")]
    pub cors_permissive: bool,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16    { 8000 }
fn bool_true()    -> bool   { true }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: bool_true(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Data source ──────────────────────────────────────────────────────────────

/// Where the graph snapshot is built from at startup and on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Build from the raw disease-pair CSV.
    Csv,
    /// Load a previously persisted JSON snapshot.
    Snapshot,
}

impl std::str::FromStr for DataSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(DataSource::Csv),
            "snapshot" | "json" => Ok(DataSource::Snapshot),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_source")]
    pub source: DataSource,
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

fn default_source()        -> DataSource { DataSource::Snapshot }
fn default_csv_path()      -> PathBuf { PathBuf::from("data/pathway_network_result_with_gpt4o_evaluation.csv") }
fn default_snapshot_path() -> PathBuf { PathBuf::from("data/processed_network.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            csv_path: default_csv_path(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

// ── Logging ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; RUST_LOG takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "disnet=debug,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

// ── Query limits ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Largest `limit` accepted by the network endpoint.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_max_limit() -> usize { 100_000 }

impl Default for QueryConfig {
    fn default() -> Self {
        Self { max_limit: default_max_limit() }
    }
}

impl Config {
    /// Load configuration.
    /// Checks DISNET_CONFIG env var first, then disnet.toml in the current
    /// directory. A missing default file yields built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        let path = explicit
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            if explicit.is_some() {
                tracing::warn!("Config file {} not found, using defaults", path);
            }
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file; `.yaml`/`.yml` as YAML, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|source| {
                ConfigError::Yaml { path: path.to_path_buf(), source }
            }),
            _ => toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply DISNET_* overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DISNET_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DISNET_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
                key: "DISNET_PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(source) = lookup("DISNET_DATA_SOURCE") {
            self.data.source = source.parse().map_err(|_| ConfigError::InvalidOverride {
                key: "DISNET_DATA_SOURCE".to_string(),
                value: source.clone(),
            })?;
        }
        if let Some(path) = lookup("DISNET_CSV_PATH") {
            self.data.csv_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("DISNET_SNAPSHOT_PATH") {
            self.data.snapshot_path = PathBuf::from(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
