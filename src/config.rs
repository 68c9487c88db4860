use http::HeaderMap;
use std::time::Duration;

/// Production base URL of the simap.ch API.
pub const DEFAULT_BASE_URL: &str = "https://www.simap.ch/api";

/// Default User-Agent sent when neither config nor call set one.
pub const DEFAULT_USER_AGENT: &str = concat!("simap-client/", env!("CARGO_PKG_VERSION"));

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Transport security policy for outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportSecurity {
    /// Only HTTPS URLs are accepted (default)
    #[default]
    TlsOnly,
    /// Plain HTTP is also accepted. Testing only; gated to debug builds
    /// or the `allow-insecure-http` feature.
    AllowInsecureHttp,
}

/// Which certificate roots the TLS connector trusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsRootConfig {
    /// Bundled webpki (Mozilla) roots (default)
    #[default]
    WebPki,
    /// Roots from the operating system certificate store
    Native,
}

/// Client configuration, built once and handed to [`crate::SimapClientBuilder`].
///
/// The built client holds an immutable snapshot; there is no way to
/// reconfigure a live client. To change configuration, build a new client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Prefix prepended to every operation path
    pub base_url: String,
    /// Headers merged into every request; call-level headers win on collision
    pub default_headers: HeaderMap,
    /// User-Agent applied when no per-call value is set
    pub user_agent: String,
    /// Per-request time budget. There are no retries, so this is total.
    pub request_timeout: Duration,
    /// Cap on collected response body size, in bytes
    pub max_body_size: usize,
    /// HTTPS-only or insecure-HTTP-allowed
    pub transport: TransportSecurity,
    /// Certificate root source for TLS
    pub tls_roots: TlsRootConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            default_headers: HeaderMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            transport: TransportSecurity::default(),
            tls_roots: TlsRootConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Preset for tests: insecure HTTP allowed (mock servers are plain
    /// HTTP), short timeout, small body cap.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            max_body_size: 1024 * 1024,
            transport: TransportSecurity::AllowInsecureHttp,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.simap.ch/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
        assert_eq!(config.tls_roots, TlsRootConfig::WebPki);
        assert!(config.default_headers.is_empty());
        assert!(config.user_agent.starts_with("simap-client/"));
    }

    #[test]
    fn testing_preset_loosens_transport_and_limits() {
        let config = ClientConfig::for_testing();
        assert_eq!(config.transport, TransportSecurity::AllowInsecureHttp);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_body_size, 1024 * 1024);
        assert_eq!(config.base_url, "https://www.simap.ch/api");
    }
}
