//! Handler contract
//!
//! A handler receives the [`AlbEvent`] for one request and an empty
//! [`Context`], and eventually produces a value shaped like an
//! [`AlbResponse`](crate::event::AlbResponse). The value stays untyped until
//! the translator reads it, so a handler returning the wrong shape is
//! reported as malformed output rather than rejected at compile time.
//!
//! Handlers run on a single-threaded runtime and need not be `Send`.

pub mod registry;

use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use crate::error::BoxError;
use crate::event::{AlbEvent, Context};

pub use registry::{HandlerRef, HandlerRegistry};

/// Future returned by [`Handler::call`]
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, BoxError>>>>;

/// An asynchronous function from event to response
pub trait Handler {
    fn call(&self, event: AlbEvent, context: Context) -> HandlerFuture;
}

/// Returns a [`HandlerFn`] wrapping the given closure.
///
/// ```rust
/// use alb_local::event::AlbResponse;
/// use alb_local::handler::handler_fn;
///
/// let handler = handler_fn(|event, _ctx| async move {
///     let body = format!("you asked for {}", event.path);
///     Ok::<_, std::io::Error>(AlbResponse::new(200).with_body(body))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(AlbEvent, Context) -> Fut,
{
    HandlerFn { f }
}

/// A [`Handler`] implemented by a closure
#[derive(Copy, Clone, Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut, Out, Err> Handler for HandlerFn<F>
where
    F: Fn(AlbEvent, Context) -> Fut,
    Fut: Future<Output = Result<Out, Err>> + 'static,
    Out: Serialize,
    Err: Into<BoxError>,
{
    fn call(&self, event: AlbEvent, context: Context) -> HandlerFuture {
        let fut = (self.f)(event, context);
        Box::pin(async move {
            let output = fut.await.map_err(Into::into)?;
            Ok(serde_json::to_value(output)?)
        })
    }
}
