// Inbound event types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder target group reported in every event
pub const TARGET_GROUP_ARN: &str = "arn:aws:elasticloadbalancing:*";

/// Event headers
///
/// Values are optional: `Cookie` is always present, and is unset when the
/// request carried no `cookie` header.
pub type EventHeaders = BTreeMap<String, Option<String>>;

/// Event passed to a handler for one HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbEvent {
    /// Request payload as text; `None` when no body was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub headers: EventHeaders,
    pub http_method: String,
    /// Always `false`, request bodies are never base64-encoded
    pub is_base64_encoded: bool,
    pub path: String,
    #[serde(default)]
    pub query_string_parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub request_context: RequestContext,
}

impl AlbEvent {
    /// Look up a header by its exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(Option::as_deref)
    }
}

/// Marks the event as coming from a load-balancer target group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub elb: ElbContext,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            elb: ElbContext {
                target_group_arn: TARGET_GROUP_ARN.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    pub target_group_arn: String,
}

/// Invocation context handed to the handler next to the event.
///
/// Carries no request id, deadline or remaining-time budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {}
