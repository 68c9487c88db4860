use http::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

use crate::error::ClientError;

/// Per-call request customization: header overrides and an optional
/// timeout override.
///
/// All header input routes normalize into one canonical [`HeaderMap`], so
/// no representation is lossy. Invalid header names or values are
/// deferred: the builder methods stay infallible and the first error
/// surfaces when the request is sent.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Headers applied on top of the client's defaults
    pub headers: HeaderMap,
    /// Overrides the client's `request_timeout` for this call
    pub timeout: Option<Duration>,
    pub(crate) error: Option<ClientError>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Invalid names/values are deferred until send.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let parsed = HeaderName::try_from(name)
            .map_err(ClientError::from)
            .and_then(|name| {
                HeaderValue::try_from(value)
                    .map_err(ClientError::from)
                    .map(|value| (name, value))
            });
        match parsed {
            Ok((name, value)) => {
                self.headers.insert(name, value);
            }
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    /// Add headers from string pairs. Invalid entries are deferred.
    #[must_use]
    pub fn header_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in pairs {
            self = self.header(name.as_ref(), value.as_ref());
        }
        self
    }

    /// Merge an already-typed header map, entry by entry.
    #[must_use]
    pub fn header_map(mut self, map: HeaderMap) -> Self {
        for (name, value) in &map {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Override the client's request timeout for this call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn take_error(&mut self) -> Option<ClientError> {
        self.error.take()
    }
}
