// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Handler reference taken from the command line
    #[serde(default)]
    pub handler: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub invocation: InvocationConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Invocation behaviour
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct InvocationConfig {
    /// Status sent when an invocation fails.
    ///
    /// Unset by default: the connection is closed without a response.
    #[serde(default)]
    pub failure_status: Option<u16>,
}
