use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Runtime configuration for the SIMS server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Origin allowed to call the API from a browser (the trunk dev server).
    pub frontend_origin: String,
    /// Directory with the built frontend, served for non-API paths.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `PORT`: listen port (default 3000)
    /// - `SIMS_BIND_ADDR`: listen address (default 127.0.0.1)
    /// - `SIMS_FRONTEND_ORIGIN`: CORS origin (default http://localhost:8080)
    /// - `SIMS_STATIC_DIR`: frontend build directory (default ../frontend/dist)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Unset or blank
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT".into(), value))?,
            None => defaults.bind_addr.port(),
        };

        let ip = match get("SIMS_BIND_ADDR") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidValue("SIMS_BIND_ADDR".into(), value))?,
            None => defaults.bind_addr.ip(),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            frontend_origin: get("SIMS_FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin),
            static_dir: get("SIMS_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }
}
