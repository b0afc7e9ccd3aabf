//! Host server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_CHAT_UPSTREAM_URL: &str = "http://127.0.0.1:5000/api/chat";
pub const DEFAULT_CHAT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CHAT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid BIND_ADDR: {0}")]
    InvalidBindAddr(String),

    #[error("invalid CHAT_UPSTREAM_URL: {0} (expected http:// or https://)")]
    InvalidUpstreamUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUpstreamConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub chat: ChatUpstreamConfig,
    pub cors_allow_any: bool,
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `CHAT_UPSTREAM_URL`: QA backend chat endpoint
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 300
    /// - `CORS_ALLOW_ANY`: default true
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is present but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .trim()
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr(e.to_string()))?;

        let url = lookup("CHAT_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_CHAT_UPSTREAM_URL.to_owned());
        let url = url.trim().to_owned();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUpstreamUrl(url));
        }
        let chat = ChatUpstreamConfig {
            url,
            connect_timeout_secs: parse_u64(lookup("CHAT_CONNECT_TIMEOUT_SECS"), DEFAULT_CHAT_CONNECT_TIMEOUT_SECS),
            request_timeout_secs: parse_u64(lookup("CHAT_REQUEST_TIMEOUT_SECS"), DEFAULT_CHAT_REQUEST_TIMEOUT_SECS),
        };
        let cors_allow_any = lookup("CORS_ALLOW_ANY").as_deref().and_then(env_bool).unwrap_or(true);

        Ok(Self { port, bind_addr, chat, cors_allow_any })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Parse a boolean environment value; unrecognized values yield `None`.
pub(crate) fn env_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}
