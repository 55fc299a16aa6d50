//! Run a load-balancer (ALB) triggered function locally, behind a real HTTP socket.
//!
//! Each HTTP request is translated into the event an ALB target group would
//! deliver, handed to a registered [`Handler`](handler::Handler) with an
//! empty [`Context`](event::Context), and the handler's response is written
//! back as the HTTP response.
//!
//! ```rust,no_run
//! use alb_local::event::AlbResponse;
//! use alb_local::handler::{handler_fn, HandlerRegistry};
//!
//! fn main() -> std::process::ExitCode {
//!     let mut registry = HandlerRegistry::new();
//!     registry
//!         .register(
//!             "src/index.handler",
//!             handler_fn(|event, _ctx| async move {
//!                 Ok::<_, std::io::Error>(AlbResponse::new(200).with_body(event.path))
//!             }),
//!         )
//!         .expect("valid reference");
//!     alb_local::run(registry)
//! }
//! ```
//!
//! Then `my-dev-server src/index.handler --port=4000`.
//!
//! Limitations: no timeouts, no limit on in-flight requests, and a failed
//! invocation closes the connection without a response unless
//! `invocation.failure_status` is configured.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod invoke;
pub mod logger;
pub mod server;
pub mod translate;

use std::process::ExitCode;
use std::rc::Rc;

use crate::config::{CliArgs, Config};
use crate::handler::HandlerRegistry;
use crate::server::ServerState;

/// Parse the process arguments, then serve the referenced handler until Ctrl+C.
///
/// Exit code 2 on usage errors, 1 on any other startup failure.
pub fn run(registry: HandlerRegistry) -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Usage: alb-local <module/path.export> [--port=<n>|-p=<n>] [--host=<addr>] [--config=<file>]");
            return ExitCode::from(2);
        }
    };

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logger::init(&config.logging) {
        eprintln!("[ERROR] {err}");
        return ExitCode::FAILURE;
    }

    match serve(config, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Serve on a single-threaded runtime until Ctrl+C
pub fn serve(config: Config, registry: &HandlerRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Connections run as local tasks, so handlers need not be `Send`
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, async move {
        let addr = config.get_socket_addr()?;
        let listener = server::bind_listener(addr)?;
        let state = Rc::new(ServerState::new(config, registry));

        logger::log_server_start(&listener.local_addr()?, &state.config);
        server::start_server_loop(listener, state, server::ctrl_c()).await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
