//! Server configuration from the environment

use std::env;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "measura";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: &'static str,
    pub version: &'static str,
    pub protocol_version: &'static str,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let log_filter = env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        ServerConfig {
            name: SERVER_NAME,
            version: SERVER_VERSION,
            protocol_version: PROTOCOL_VERSION,
            log_filter,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            name: SERVER_NAME,
            version: SERVER_VERSION,
            protocol_version: PROTOCOL_VERSION,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
