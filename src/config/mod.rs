// Configuration module entry point
// Layers defaults, an optional config file, environment variables and CLI flags

mod cli;
mod types;

use std::net::SocketAddr;

use hyper::StatusCode;

pub use cli::CliArgs;
pub use types::{Config, InvocationConfig, LoggingConfig, ServerConfig};

use crate::error::ConfigError;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "alb-local";

/// Prefix of environment overrides, e.g. `ALB_LOCAL_SERVER__PORT=4000`
pub const ENV_PREFIX: &str = "ALB_LOCAL";

impl Config {
    /// Build the configuration for a parsed command line.
    ///
    /// Later sources win: defaults, config file, environment, CLI flags.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let config_path = args.config_path().unwrap_or(DEFAULT_CONFIG_FILE);
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .add_source(config::File::with_name(config_path).required(args.config_path().is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("handler", args.handler.as_str())?
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option("server.host", args.host())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }

    /// URL printed once the listener is ready
    pub fn public_url(&self, addr: &SocketAddr) -> String {
        if addr.ip().is_unspecified() || addr.ip().is_loopback() {
            format!("http://localhost:{}", addr.port())
        } else {
            format!("http://{addr}")
        }
    }

    /// Status used for failed invocations, when configured and valid
    pub fn failure_status(&self) -> Option<StatusCode> {
        self.invocation
            .failure_status
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}
