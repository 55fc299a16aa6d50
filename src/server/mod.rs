// Server module entry point
// Listener, accept loop and per-connection serving

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::bind_listener;
pub use server_loop::{ctrl_c, start_server_loop};

use crate::config::Config;
use crate::handler::{HandlerRef, HandlerRegistry};
use crate::invoke::ResolvedHandler;
use crate::logger;

/// State shared by every connection of one process run
pub struct ServerState {
    pub config: Config,
    /// Resolved once; a failure is reported again on every request
    pub handler: ResolvedHandler,
}

impl ServerState {
    /// Resolve `config.handler` against `registry`
    pub fn new(config: Config, registry: &HandlerRegistry) -> Self {
        let reference = HandlerRef::parse(&config.handler);
        let handler = registry.resolve(&reference);

        match &handler {
            Ok(_) => {
                let cwd = std::env::current_dir().unwrap_or_default();
                logger::log_handler_resolved(
                    &reference.to_string(),
                    &reference.module_location(&cwd),
                );
            }
            Err(err) => logger::log_handler_unresolved(err, &registry.references()),
        }

        Self { config, handler }
    }
}
