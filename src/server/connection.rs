// Connection handling module
// Serves one TCP connection and runs every request on it through the handler

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::rc::Rc;
use std::time::Instant;

use super::ServerState;
use crate::error::InvocationError;
use crate::invoke::invoke;
use crate::logger::{self, AccessLogEntry};
use crate::translate::build_failure_response;

/// Accept a connection and serve it in a local task
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Rc<ServerState>,
) {
    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Rc::clone(state));
}

/// Serve HTTP/1.1 on the connection until the client goes away.
///
/// No read/write timeout is applied: a handler that never resolves keeps
/// the connection open.
fn handle_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Rc<ServerState>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Rc::clone(&state);
                async move { handle_request(req, peer_addr, &state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Invoke the handler for one request.
///
/// A failed invocation is logged here. Without a configured failure status
/// the error is handed back to hyper, which drops the connection without
/// writing a response.
async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: &ServerState,
) -> Result<Response<Full<Bytes>>, InvocationError> {
    let started = Instant::now();
    let mut entry = AccessLogEntry::from_request(&peer_addr, &req);

    match invoke(req, &state.handler).await {
        Ok(response) => {
            if state.config.logging.access_log {
                entry.status = response.status().as_u16();
                entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
                entry.duration = started.elapsed();
                logger::log_access(&entry, &state.config.logging.access_log_format);
            }
            Ok(response)
        }
        Err(err) => {
            logger::log_invocation_error(&entry.method, &entry.path, &err);
            match state.config.failure_status() {
                Some(status) => Ok(build_failure_response(status)),
                None => Err(err),
            }
        }
    }
}
