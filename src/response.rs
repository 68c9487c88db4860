use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, HttpError, ensure_ok};

/// Boxed response body flowing out of the transport seam.
pub type TransportBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// Transport-level facts about a completed exchange.
///
/// Always present on a [`CallResult`], success or failure, so callers can
/// inspect status and headers (e.g. `Retry-After` on a 429) without the
/// client interpreting them.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: StatusCode,
    /// Whether the status is in the 2xx range. 3xx is NOT ok.
    pub ok: bool,
    /// Response headers as received
    pub headers: HeaderMap,
    /// The fully resolved request URL
    pub url: String,
    /// Canonical reason phrase for the status, empty if unknown
    pub status_text: String,
}

impl ResponseMeta {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, url: String) -> Self {
        Self {
            ok: status.is_success(),
            status_text: status.canonical_reason().unwrap_or("").to_owned(),
            status,
            headers,
            url,
        }
    }
}

/// Uniform result envelope returned by every API operation.
///
/// HTTP error statuses are values, not errors: a 404 resolves to an
/// envelope with `error` populated and `data` empty. At most one of
/// `data`/`error` is set. Use [`CallResult::ensure_ok`] (or the free
/// function [`ensure_ok`]) at the point where a non-2xx status should
/// become a failure.
#[derive(Debug, Clone)]
pub struct CallResult<T, E = serde_json::Value> {
    /// Parsed payload of a 2xx response, `None` for empty bodies
    pub data: Option<T>,
    /// Payload of a non-2xx response, `None` for empty bodies
    pub error: Option<E>,
    /// Transport-level response metadata, always present
    pub response: ResponseMeta,
}

impl<T, E> CallResult<T, E>
where
    T: serde::Serialize,
{
    /// Method form of [`ensure_ok`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the response status is not 2xx.
    pub fn ensure_ok(self) -> Result<Option<T>, HttpError> {
        ensure_ok(self)
    }
}

/// Assemble the envelope from a response's parts and collected body.
///
/// 2xx bodies must parse as `T`; anything else there is a [`ClientError`].
/// Non-2xx bodies are parsed leniently: JSON if possible, the raw text
/// otherwise, nothing for an empty body.
pub(crate) fn envelope<T>(meta: ResponseMeta, body: &[u8]) -> Result<CallResult<T>, ClientError>
where
    T: DeserializeOwned,
{
    if meta.ok {
        if body.is_empty() {
            return Ok(CallResult {
                data: None,
                error: None,
                response: meta,
            });
        }
        let data = serde_json::from_slice(body)?;
        return Ok(CallResult {
            data: Some(data),
            error: None,
            response: meta,
        });
    }

    let error = if body.is_empty() {
        None
    } else {
        Some(serde_json::from_slice::<serde_json::Value>(body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
        }))
    };
    Ok(CallResult {
        data: None,
        error,
        response: meta,
    })
}

/// Collect a body into memory, enforcing the configured size cap.
pub(crate) async fn collect_body(body: TransportBody, limit: usize) -> Result<Bytes, ClientError> {
    let mut collected: Vec<u8> = Vec::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(ClientError::Transport)?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(ClientError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}
