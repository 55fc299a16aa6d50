//! Handler output → HTTP response

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Response, StatusCode};
use serde_json::Value;

use crate::error::InvocationError;
use crate::event::AlbResponse;

/// Standard alphabet, padding optional
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Translate the raw value a handler returned into an HTTP response
pub fn response_from_output(output: Value) -> Result<Response<Full<Bytes>>, InvocationError> {
    let response: AlbResponse = serde_json::from_value(output)?;
    into_http_response(response)
}

/// Write status, headers and body exactly as the handler gave them.
///
/// No header is normalised or added here.
pub fn into_http_response(response: AlbResponse) -> Result<Response<Full<Bytes>>, InvocationError> {
    let status = StatusCode::from_u16(response.status_code)
        .map_err(|_| InvocationError::InvalidStatus(response.status_code))?;

    let body = match response.body {
        Some(body) if response.is_base64_encoded => Bytes::from(BASE64.decode(body.as_bytes())?),
        Some(body) => Bytes::from(body),
        None => Bytes::new(),
    };

    let mut http_response = Response::new(Full::new(body));
    *http_response.status_mut() = status;

    let headers = http_response.headers_mut();
    for (name, values) in &response.headers {
        let invalid = || InvocationError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        for value in values.iter() {
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.append(header_name.clone(), header_value);
        }
    }

    Ok(http_response)
}

/// Empty response sent for a failed invocation when a failure status is configured
pub fn build_failure_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}
