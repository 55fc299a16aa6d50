// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::rc::Rc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::ServerState;
use crate::logger;

/// Accept connections and hand each one to its own local task.
///
/// Must run inside a [`tokio::task::LocalSet`]. Connections already being
/// served keep running after `shutdown` resolves.
pub async fn start_server_loop<S>(
    listener: TcpListener,
    state: Rc<ServerState>,
    shutdown: S,
) -> std::io::Result<()>
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_accept_error(&e),
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}

/// Resolves on Ctrl+C; never resolves if the signal cannot be registered
pub async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
