//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Where the governance map is kept between runs
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// `None` keeps the map in memory only
    pub data_file: Option<PathBuf>,
    /// Load the built-in sample map when nothing else was loaded
    pub seed_sample: bool,
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server = ServerConfig {
            host: match var("HOST") {
                Some(h) => h
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("HOST '{}' is not an IPv4 address", h)))?,
                None => ServerConfig::default().host,
            },
            port: match var("PORT") {
                Some(p) => p
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("PORT '{}' is not a port number", p)))?,
                None => ServerConfig::default().port,
            },
        };

        let cors = CorsConfig {
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let storage = StorageConfig {
            data_file: var("GOVMAP_DATA_FILE").map(PathBuf::from),
            seed_sample: match var("GOVMAP_SEED_SAMPLE") {
                Some(flag) => parse_flag(&flag).ok_or_else(|| {
                    ConfigError::InvalidValue(format!(
                        "GOVMAP_SEED_SAMPLE '{}' is not true or false",
                        flag
                    ))
                })?,
                None => false,
            },
        };

        Ok(Self {
            server,
            cors,
            storage,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
