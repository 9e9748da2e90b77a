// ABOUTME: Configuration loading and validation for the inkstone server.
// ABOUTME: Reads environment variables and enforces the remote-access security constraint.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("INKSTONE_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("INKSTONE_ALLOW_REMOTE is true but INKSTONE_AUTH_TOKEN is not set; refusing to start without authentication")]
    RemoteWithoutToken,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct InkstoneConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
    pub allow_remote: bool,
    pub auth_token: Option<String>,
}

impl InkstoneConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - INKSTONE_HOME: data directory (default: ~/.inkstone)
    /// - INKSTONE_BIND: socket address to bind (default: 127.0.0.1:7420)
    /// - INKSTONE_ALLOW_REMOTE: allow non-loopback connections (default: false)
    /// - INKSTONE_AUTH_TOKEN: token required for authoring routes (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = std::env::var("INKSTONE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/tmp"))
                    .join(".inkstone")
            });

        let bind_str =
            std::env::var("INKSTONE_BIND").unwrap_or_else(|_| "127.0.0.1:7420".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let allow_remote = std::env::var("INKSTONE_ALLOW_REMOTE")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);

        let auth_token = std::env::var("INKSTONE_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        // Security validation: if allowing remote access, require a token
        if allow_remote && auth_token.is_none() {
            return Err(ConfigError::RemoteWithoutToken);
        }

        Ok(Self {
            home,
            bind,
            allow_remote,
            auth_token,
        })
    }
}
