use http::{HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::client::{ClientInner, SimapClient};
use crate::config::{ClientConfig, TlsRootConfig, TransportSecurity};
use crate::error::{ClientError, InvalidUrlKind};
use crate::transport::{HyperTransport, Transport};

/// Builder for [`SimapClient`].
///
/// Setters are infallible; invalid inputs (base URL, header bytes) are
/// deferred and reported by [`SimapClientBuilder::build`].
pub struct SimapClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    error: Option<ClientError>,
}

impl Default for SimapClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimapClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
            error: None,
        }
    }

    /// Start from a prepared configuration instead of the defaults.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the base URL (default `https://www.simap.ch/api`).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Add a header sent with every request. Call-level headers win on
    /// key collision. Invalid names/values are reported at `build()`.
    #[must_use]
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        let parsed = HeaderName::try_from(name)
            .map_err(ClientError::from)
            .and_then(|name| {
                HeaderValue::try_from(value)
                    .map_err(ClientError::from)
                    .map(|value| (name, value))
            });
        match parsed {
            Ok((name, value)) => {
                self.config.default_headers.insert(name, value);
            }
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Per-request time budget (default 30 s).
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Cap on collected response bodies, in bytes (default 10 MB).
    #[must_use]
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.config.max_body_size = limit;
        self
    }

    /// Trust OS certificate roots instead of the bundled webpki set.
    #[must_use]
    pub fn native_tls_roots(mut self) -> Self {
        self.config.tls_roots = TlsRootConfig::Native;
        self
    }

    /// Accept plain-HTTP base URLs. Only available in debug builds or
    /// with the `allow-insecure-http` feature; intended for tests against
    /// local mock servers.
    #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
    #[must_use]
    pub fn allow_insecure_http(mut self) -> Self {
        self.config.transport = TransportSecurity::AllowInsecureHttp;
        self
    }

    /// Replace the request-execution seam, e.g. with a canned transport
    /// in tests. Skips TLS connector construction entirely.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and construct the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] / [`ClientError::InvalidScheme`]
    /// for an unusable base URL, [`ClientError::InvalidHeaderValue`] /
    /// [`ClientError::InvalidHeaderName`] for deferred header errors, and
    /// [`ClientError::Tls`] when the TLS connector cannot be built.
    pub fn build(self) -> Result<SimapClient, ClientError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let config = self.config;
        let base_url = validate_base_url(&config.base_url, config.transport)?;
        let user_agent = HeaderValue::try_from(config.user_agent)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HyperTransport::new(config.tls_roots, config.transport)?),
        };

        Ok(SimapClient::from_inner(ClientInner {
            base_url,
            default_headers: config.default_headers,
            user_agent,
            request_timeout: config.request_timeout,
            max_body_size: config.max_body_size,
            transport,
        }))
    }
}

fn validate_base_url(base: &str, transport: TransportSecurity) -> Result<Url, ClientError> {
    let url = Url::parse(base).map_err(|e| {
        let kind = if e == url::ParseError::RelativeUrlWithoutBase {
            InvalidUrlKind::MissingScheme
        } else {
            InvalidUrlKind::ParseError
        };
        ClientError::InvalidUrl {
            url: base.to_owned(),
            kind,
            reason: e.to_string(),
        }
    })?;

    if !url.has_host() {
        return Err(ClientError::InvalidUrl {
            url: base.to_owned(),
            kind: InvalidUrlKind::MissingAuthority,
            reason: "URL has no host".to_owned(),
        });
    }

    match url.scheme() {
        "https" => {}
        "http" => {
            if transport != TransportSecurity::AllowInsecureHttp {
                return Err(ClientError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "client is configured for TLS-only transport".to_owned(),
                });
            }
            tracing::warn!(url = base, "insecure HTTP transport enabled; use only for testing");
        }
        other => {
            return Err(ClientError::InvalidScheme {
                scheme: other.to_owned(),
                reason: "only http(s) URLs are supported".to_owned(),
            });
        }
    }

    Ok(url)
}
