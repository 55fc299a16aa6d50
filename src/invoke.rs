//! Invocation pipeline
//!
//! One request runs strictly in order: translate the request, call the
//! handler, translate its output. Nothing here imposes a deadline; a handler
//! that never resolves keeps its connection open.

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Request, Response};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use crate::error::{BoxError, InvocationError, ResolveError};
use crate::event::Context;
use crate::handler::Handler;
use crate::translate::{request_to_event, response_from_output};

/// Outcome of resolving the configured handler, computed once at startup
pub type ResolvedHandler = Result<Rc<dyn Handler>, ResolveError>;

/// Run one request through the handler
pub async fn invoke<B>(
    request: Request<B>,
    handler: &ResolvedHandler,
) -> Result<Response<Full<Bytes>>, InvocationError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<BoxError>,
{
    let handler = handler.as_ref().map_err(Clone::clone)?;

    let event = request_to_event(request).await?;

    // The call itself sits inside the future so an eager panic is caught too
    let output = AssertUnwindSafe(async { handler.call(event, Context::default()).await })
        .catch_unwind()
        .await
        .map_err(|panic| InvocationError::Panicked(panic_message(&*panic)))?
        .map_err(InvocationError::Handler)?;

    response_from_output(output)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AlbEvent, AlbResponse};
    use crate::handler::{handler_fn, HandlerFuture};
    use http_body_util::{BodyExt, Empty};
    use hyper::StatusCode;
    use serde_json::json;

    fn get(uri: &str) -> Request<Empty<Bytes>> {
        Request::builder()
            .uri(uri)
            .header("host", "localhost:3000")
            .body(Empty::new())
            .unwrap()
    }

    fn resolved<H: Handler + 'static>(handler: H) -> ResolvedHandler {
        Ok(Rc::new(handler))
    }

    /// Panics before returning a future
    struct EagerPanic;

    impl Handler for EagerPanic {
        fn call(&self, _event: AlbEvent, _context: Context) -> HandlerFuture {
            panic!("thrown synchronously")
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let handler = resolved(handler_fn(|event: AlbEvent, _ctx| async move {
            Ok::<_, std::io::Error>(
                AlbResponse::new(200)
                    .with_header("content-type", "text/plain")
                    .with_body(format!("{} {}", event.http_method, event.path)),
            )
        }));

        let response = invoke(get("/ping"), &handler).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/plain");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("GET /ping"));
    }

    #[tokio::test]
    async fn test_context_is_empty() {
        let handler = resolved(handler_fn(|_event, ctx: Context| async move {
            let ctx = serde_json::to_string(&ctx)?;
            Ok::<_, BoxError>(AlbResponse::new(200).with_body(ctx))
        }));
        let response = invoke(get("/"), &handler).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("{}"));
    }

    #[tokio::test]
    async fn test_resolution_error_is_reported_per_request() {
        let handler: ResolvedHandler = Err(ResolveError::MissingExport("index".to_string()));
        let err = invoke(get("/"), &handler).await.unwrap_err();
        assert!(matches!(err, InvocationError::Resolve(_)));
    }

    #[tokio::test]
    async fn test_handler_error() {
        let handler = resolved(handler_fn(|_event, _ctx| async {
            Err::<AlbResponse, _>(std::io::Error::other("boom"))
        }));
        let err = invoke(get("/"), &handler).await.unwrap_err();
        assert!(matches!(err, InvocationError::Handler(_)));
        assert_eq!(err.to_string(), "Handler failed: boom");
    }

    #[tokio::test]
    async fn test_synchronous_panic_is_caught() {
        let err = invoke(get("/"), &resolved(EagerPanic)).await.unwrap_err();
        match err {
            InvocationError::Panicked(message) => assert_eq!(message, "thrown synchronously"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_panic_while_suspended_is_caught() {
        let handler = resolved(handler_fn(|event: AlbEvent, _ctx| async move {
            tokio::task::yield_now().await;
            if event.path == "/explode" {
                panic!("exploded at {}", event.path);
            }
            Ok::<_, BoxError>(AlbResponse::new(200))
        }));
        let err = invoke(get("/explode"), &handler).await.unwrap_err();
        assert!(matches!(err, InvocationError::Panicked(ref m) if m == "exploded at /explode"));
    }

    #[tokio::test]
    async fn test_malformed_output() {
        let handler = resolved(handler_fn(|_event, _ctx| async {
            Ok::<_, BoxError>(json!({ "body": "no status" }))
        }));
        let err = invoke(get("/"), &handler).await.unwrap_err();
        assert!(matches!(err, InvocationError::MalformedOutput(_)));
    }
}
