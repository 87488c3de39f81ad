use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub remote_url: String,
    pub remote_key: Option<String>,
    pub listen_addr: SocketAddr,
    pub cache_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let remote_url = std::env::var("RINGSIDE_REMOTE_URL")
            .map_err(|_| ConfigError::Missing("RINGSIDE_REMOTE_URL"))?;

        let remote_key = std::env::var("RINGSIDE_REMOTE_KEY").ok().filter(|k| !k.is_empty());

        let listen_addr = std::env::var("RINGSIDE_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("RINGSIDE_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let cache_path = std::env::var("RINGSIDE_CACHE_PATH")
            .unwrap_or_else(|_| "./ringside.redb".to_string())
            .into();

        Ok(Config {
            remote_url,
            remote_key,
            listen_addr,
            cache_path,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => {
                write!(f, "Missing required environment variable: {}", var)
            }
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
