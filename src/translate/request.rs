//! HTTP request → load-balancer event

use bytes::Bytes;
use hyper::body::Body;
use hyper::header::{COOKIE, HOST};
use hyper::{HeaderMap, Request};
use std::collections::BTreeMap;
use url::Url;

use super::body::buffer_body;
use crate::error::{BoxError, InvocationError};
use crate::event::{AlbEvent, EventHeaders, RequestContext};

/// Authority used when the request carries no `Host` header
const FALLBACK_HOST: &str = "localhost";

/// Translate an HTTP request into the event handed to the handler.
///
/// The body is buffered completely before this returns.
pub async fn request_to_event<B>(request: Request<B>) -> Result<AlbEvent, InvocationError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<BoxError>,
{
    let (parts, body) = request.into_parts();

    let url = request_url(&parts.headers, &parts.uri.to_string())?;
    let body = buffer_body(body).await?;

    Ok(AlbEvent {
        body: body.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
        headers: event_headers(&parts.headers),
        http_method: parts.method.as_str().to_ascii_uppercase(),
        is_base64_encoded: false,
        path: url.path().to_string(),
        query_string_parameters: query_parameters(&url),
        request_context: RequestContext::default(),
    })
}

/// Resolve the request target against `http://<host>`
fn request_url(headers: &HeaderMap, target: &str) -> Result<Url, InvocationError> {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(FALLBACK_HOST);
    let base = Url::parse(&format!("http://{host}"))?;
    Ok(base.join(target)?)
}

/// Single-value query map; a repeated name keeps its last value
fn query_parameters(url: &Url) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for (name, value) in url.query_pairs() {
        params.insert(name.into_owned(), value.into_owned());
    }
    params
}

/// Copy request headers and mirror `cookie` into `Cookie`
fn event_headers(headers: &HeaderMap) -> EventHeaders {
    let mut result = EventHeaders::new();

    for name in headers.keys() {
        let separator = if *name == COOKIE { "; " } else { ", " };
        let value = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(separator);
        result.insert(name.as_str().to_string(), Some(value));
    }

    let cookie = result.get(COOKIE.as_str()).cloned().flatten();
    result.insert("Cookie".to_string(), cookie);
    result
}
