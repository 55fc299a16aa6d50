//! Load-balancer event contract
//!
//! The records exchanged with a handler: the inbound [`AlbEvent`] built from
//! an HTTP request, the (empty) [`Context`], and the [`AlbResponse`] the
//! handler hands back.

mod request;
mod response;

pub use request::{AlbEvent, Context, ElbContext, EventHeaders, RequestContext, TARGET_GROUP_ARN};
pub use response::{AlbResponse, HeaderValues};
