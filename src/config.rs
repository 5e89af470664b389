//! Server settings read from `MARKET_*` environment variables.

use crate::error::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
/// Default item document.
pub const DEFAULT_DATA_PATH: &str = "simple_todos_v4.json";
/// Default request body limit in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;

/// Everything the binary needs to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the listener binds.
    pub bind: SocketAddr,
    /// JSON document holding the items.
    pub data_path: PathBuf,
    /// Indent the document when writing it.
    pub pretty_json: bool,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            pretty_json: true,
            log_json: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read `MARKET_BIND`, `MARKET_DATA_PATH`, `MARKET_PRETTY_JSON`,
    /// `MARKET_LOG_JSON` and `MARKET_MAX_BODY_BYTES`, falling back to
    /// defaults for anything unset or unparsable. Only a malformed bind
    /// address is an error.
    pub fn from_env() -> Result<Self> {
        let raw_bind = env::var("MARKET_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = raw_bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("invalid MARKET_BIND {raw_bind:?}: {e}")))?;
        let data_path = env::var("MARKET_DATA_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        Ok(Self {
            bind,
            data_path,
            pretty_json: env_bool("MARKET_PRETTY_JSON", true),
            log_json: env_bool("MARKET_LOG_JSON", false),
            max_body_bytes: env_usize("MARKET_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        })
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
