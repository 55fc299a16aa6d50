//! Error types for alb-local
//!
//! Startup errors (`CliError`, `ConfigError`) are fatal. Everything that can
//! go wrong while serving one request is an `InvocationError`, which the
//! connection service logs and swallows.

use thiserror::Error;

/// Boxed error returned by handlers and body streams
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Command-line usage errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CliError {
    /// No handler reference was given
    #[error("Please pass in a handler path (e.g. `alb-local src/index.handler`)")]
    MissingHandler,

    /// `--port`/`-p` was not an integer port number
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("Invalid address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to initialise logger: {0}")]
    Logger(String),
}

/// Failure to turn a handler reference into a registered handler
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference has no `.export` suffix
    #[error("Handler reference `{0}` has no export name (expected `path/to/module.export`)")]
    MissingExport(String),

    /// Nothing is registered under the module/export pair
    #[error("No handler `{export}` registered for module `{module}`")]
    NotRegistered { module: String, export: String },
}

/// Per-request failures, one variant per failure kind
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Handler resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Request body stream failed: {0}")]
    Transport(#[source] BoxError),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("Handler panicked: {0}")]
    Panicked(String),

    #[error("Malformed handler output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("Handler returned invalid status code {0}")]
    InvalidStatus(u16),

    #[error("Handler returned invalid header `{name}`")]
    InvalidHeader { name: String },

    #[error("Handler returned invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl InvocationError {
    /// Short label used in log lines
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolution",
            Self::Transport(_) | Self::InvalidUrl(_) => "transport",
            Self::Handler(_) | Self::Panicked(_) => "execution",
            Self::MalformedOutput(_)
            | Self::InvalidStatus(_)
            | Self::InvalidHeader { .. }
            | Self::InvalidBase64(_) => "output",
        }
    }
}
