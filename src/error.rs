use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::response::CallResult;

/// Classification of base-URL validation failures.
///
/// Provides programmatic matching for different failure modes without
/// relying on unstable error message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUrlKind {
    /// URL could not be parsed (malformed syntax)
    ParseError,
    /// URL is missing required host/authority component
    MissingAuthority,
    /// URL is missing required scheme (http/https)
    MissingScheme,
}

/// Failures that prevent a request from completing at the transport level.
///
/// Ordinary HTTP error statuses are deliberately absent: they travel inside
/// the [`CallResult`] envelope and only become errors through [`ensure_ok`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// Request building failed
    #[error("Failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// Invalid header name
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Request timed out
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Transport error (network, connection, etc)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS error
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded size limit
    #[error("Response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// JSON parsing error.
    ///
    /// Raised for malformed bodies on 2xx responses. At this level it is
    /// indistinguishable from a transport failure, by design: non-2xx
    /// payloads are parsed leniently into the envelope instead.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL (failed to parse or missing components)
    ///
    /// Use the `kind` field for programmatic matching. The `reason` field
    /// contains a diagnostic message intended for logging only.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Structured failure classification for programmatic matching
        kind: InvalidUrlKind,
        /// Diagnostic message (unstable format, for logging only)
        reason: String,
    },

    /// Invalid URL scheme for the transport security configuration
    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    InvalidScheme {
        /// The URL scheme that was rejected
        scheme: String,
        /// Reason the scheme was rejected
        reason: String,
    },
}

impl From<hyper::Error> for ClientError {
    fn from(err: hyper::Error) -> Self {
        ClientError::Transport(Box::new(err))
    }
}

impl From<hyper_util::client::legacy::Error> for ClientError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        ClientError::Transport(Box::new(err))
    }
}

/// A non-2xx result envelope, normalized into a throwable error.
///
/// Constructed by [`ensure_ok`] or by caller code; operations themselves
/// never produce it. The message is deterministically `"HTTP {status}"`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("HTTP {}", .status.as_u16())]
pub struct HttpError {
    /// HTTP status code of the failed response
    pub status: StatusCode,
    /// Payload the envelope carried, if any
    pub body: Option<serde_json::Value>,
}

impl HttpError {
    #[must_use]
    pub fn new(status: StatusCode, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }
}

/// Convert a result envelope from errors-as-values to errors-as-`Result`.
///
/// Returns `data` unchanged when `response.ok` is true (strictly 2xx),
/// including `Ok(None)` for empty bodies such as 204. Otherwise fails with
/// an [`HttpError`] carrying the response status and whatever `data` the
/// envelope held — for real error responses that is `None`, since error
/// payloads live in `envelope.error`. Faithful, not idealized.
///
/// No retry, no logging, no status-specific branching: callers own all
/// policy around the statuses they care about.
///
/// # Errors
///
/// Returns [`HttpError`] when the response status is outside 200–299
/// (3xx redirects included).
pub fn ensure_ok<T, E>(result: CallResult<T, E>) -> Result<Option<T>, HttpError>
where
    T: Serialize,
{
    if result.response.ok {
        return Ok(result.data);
    }
    let body = result
        .data
        .and_then(|data| serde_json::to_value(data).ok());
    Err(HttpError {
        status: result.response.status,
        body,
    })
}
