//! Logger module
//!
//! Logging helpers for the adapter:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Per-request invocation failures
//!
//! Everything goes through `tracing`; [`init`] installs the fmt subscriber.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};
use crate::error::{ConfigError, InvocationError, ResolveError};

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once
/// at application startup.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Logger(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(with_ready_line(filter)?)
        .with_target(false)
        .try_init()
        .map_err(|e| ConfigError::Logger(e.to_string()))
}

/// Target of the startup line, kept visible whatever the configured level
const READY_TARGET: &str = "alb_local::ready";

fn with_ready_line(filter: EnvFilter) -> Result<EnvFilter, ConfigError> {
    let directive = format!("{READY_TARGET}=info")
        .parse::<Directive>()
        .map_err(|e| ConfigError::Logger(e.to_string()))?;
    Ok(filter.add_directive(directive))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        target: READY_TARGET,
        handler = %config.handler,
        bind = %addr,
        access_log = config.logging.access_log,
        "> Ready on {}",
        config.public_url(addr)
    );
}

pub fn log_handler_resolved(reference: &str, location: &std::path::Path) {
    tracing::info!(location = %location.display(), "[Handler] Loaded {reference}");
}

pub fn log_handler_unresolved(err: &ResolveError, available: &[String]) {
    tracing::warn!(
        available = ?available,
        "[Handler] {err}; every request will fail until the reference is fixed"
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &hyper::Error) {
    // A failed invocation surfaces here a second time as a user error
    if err.is_user() {
        tracing::debug!("[Connection] Closed after failed invocation: {err}");
    } else {
        tracing::error!("[Connection] Failed to serve connection: {err}");
    }
}

pub fn log_accept_error(err: &std::io::Error) {
    tracing::error!("Failed to accept connection: {err}");
}

pub fn log_invocation_error(method: &str, path: &str, err: &InvocationError) {
    tracing::error!(kind = err.kind(), "[Invocation] {method} {path} failed: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!("{}", entry.format(format));
}

pub fn log_shutdown() {
    tracing::info!("Shutting down, no longer accepting connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_line_survives_quiet_levels() {
        for level in ["warn", "error", "off"] {
            let filter = with_ready_line(EnvFilter::new(level)).unwrap();
            let directives = filter.to_string();
            assert!(directives.contains("alb_local::ready=info"), "{level}: {directives}");
        }
    }

    #[test]
    fn test_ready_line_keeps_configured_directives() {
        let filter = with_ready_line(EnvFilter::new("alb_local=debug")).unwrap();
        let directives = filter.to_string();
        assert!(directives.contains("alb_local=debug"));
        assert!(directives.contains("alb_local::ready=info"));
    }
}
