//! Access log format module
//!
//! One line per completed invocation, in one of:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format)
//! - `json`
//! - a custom pattern with `$variables`

use chrono::{DateTime, Local};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::Request;
use std::net::SocketAddr;
use std::time::Duration;

/// What gets recorded about one invocation
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    pub status: u16,
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Time from request arrival to handler output translated
    pub duration: Duration,
}

impl AccessLogEntry {
    /// Capture the request side; status and size are filled in once the handler returns
    pub fn from_request<B>(peer_addr: &SocketAddr, request: &Request<B>) -> Self {
        let header = |name: HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        Self {
            remote_addr: peer_addr.ip().to_string(),
            time: Local::now(),
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(ToString::to_string),
            status: 0,
            body_bytes: 0,
            referer: header(REFERER),
            user_agent: header(USER_AGENT),
            duration: Duration::ZERO,
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// Format the entry as `combined`, `common`, `json`, or a custom pattern
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            "common" => self.format_common(),
            "json" => self.format_json(),
            pattern => self.format_custom(pattern),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.method,
            self.request_uri(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": u64::try_from(self.duration.as_micros()).unwrap_or(u64::MAX),
        })
        .to_string()
    }

    /// Custom pattern.
    ///
    /// Variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request_method`, `$request_uri`, `$request_time` (seconds, 3
    /// decimals), `$status`, `$body_bytes_sent`, `$http_referer`,
    /// `$http_user_agent`.
    fn format_custom(&self, pattern: &str) -> String {
        let request_time = format!("{:.3}", self.duration.as_secs_f64());
        // Longest names first so `$request_time` is not eaten by a shorter prefix
        let mut vars = [
            ("$remote_addr", self.remote_addr.clone()),
            ("$time_local", self.time_local()),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_method", self.method.clone()),
            ("$request_uri", self.request_uri()),
            ("$request_time", request_time),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            ("$http_referer", self.referer.clone().unwrap_or_else(|| "-".to_string())),
            ("$http_user_agent", self.user_agent.clone().unwrap_or_else(|| "-".to_string())),
        ];
        vars.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

        vars.iter()
            .fold(pattern.to_string(), |line, (name, value)| line.replace(name, value))
    }
}
