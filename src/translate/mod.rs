//! Translator between raw HTTP and the load-balancer event contract
//!
//! - [`request_to_event`]: HTTP request → [`AlbEvent`](crate::event::AlbEvent)
//! - [`response_from_output`]: handler output → HTTP response

pub mod body;
pub mod request;
pub mod response;

pub use body::buffer_body;
pub use request::request_to_event;
pub use response::{build_failure_response, into_http_response, response_from_output};
