use bytes::Bytes;
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, Request};
use http_body_util::Full;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::builder::SimapClientBuilder;
use crate::error::{ClientError, InvalidUrlKind};
use crate::options::RequestOptions;
use crate::response::{CallResult, ResponseMeta, collect_body, envelope};
use crate::transport::Transport;

/// Handle to the simap.ch API.
///
/// Holds an immutable configuration snapshot behind an `Arc`; cloning is
/// cheap and clones share the connection pool. All typed operations (see
/// [`crate::api`]) are methods on this handle.
#[derive(Clone)]
pub struct SimapClient {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) base_url: Url,
    pub(crate) default_headers: HeaderMap,
    pub(crate) user_agent: HeaderValue,
    pub(crate) request_timeout: Duration,
    pub(crate) max_body_size: usize,
    pub(crate) transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for SimapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimapClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("request_timeout", &self.inner.request_timeout)
            .field("max_body_size", &self.inner.max_body_size)
            .finish_non_exhaustive()
    }
}

impl SimapClient {
    /// Start building a client.
    #[must_use]
    pub fn builder() -> SimapClientBuilder {
        SimapClientBuilder::new()
    }

    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Issue a GET against the base URL plus `segments` and assemble the
    /// envelope. The whole exchange, headers and body both, runs under
    /// one deadline.
    pub(crate) async fn get_json<T>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
        options: RequestOptions,
    ) -> Result<CallResult<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let mut options = options;
        if let Some(err) = options.take_error() {
            return Err(err);
        }

        let url = self.endpoint_url(segments, query)?;

        let mut headers = self.inner.default_headers.clone();
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, self.inner.user_agent.clone());
        }
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        let mut request = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .body(Full::new(Bytes::new()))?;
        *request.headers_mut() = headers;

        tracing::debug!(method = %Method::GET, url = %url, "dispatching request");

        let timeout = options.timeout.unwrap_or(self.inner.request_timeout);
        let exchange = async {
            let response = self.inner.transport.execute(request).await?;
            let (parts, body) = response.into_parts();
            let meta = ResponseMeta::new(parts.status, parts.headers, url.to_string());
            let body = collect_body(body, self.inner.max_body_size).await?;
            Ok::<_, ClientError>((meta, body))
        };
        let (meta, body) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| ClientError::Timeout(timeout))??;

        envelope(meta, &body)
    }

    /// Extend the base URL with path segments and append query pairs.
    ///
    /// Segments are pushed through the URL's segment API, so each one is
    /// percent-encoded as a whole segment: a path parameter containing
    /// `/`, `?` or `#` cannot reshape the path or truncate it. The base's
    /// own segments are preserved.
    fn endpoint_url(&self, segments: &[&str], query: &[(String, String)]) -> Result<Url, ClientError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: self.inner.base_url.as_str().to_owned(),
                kind: InvalidUrlKind::MissingAuthority,
                reason: "base URL cannot carry path segments".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::Response;
    use http_body_util::BodyExt;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use crate::response::TransportBody;

    fn client(base: &str) -> SimapClient {
        SimapClient::builder()
            .base_url(base)
            .build()
            .expect("client should build")
    }

    #[test]
    fn endpoint_url_appends_segments_to_base() {
        let client = client("https://www.simap.ch/api");
        let url = client.endpoint_url(&["cantons", "v1"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://www.simap.ch/api/cantons/v1");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash_on_base() {
        let client = client("https://www.simap.ch/api/");
        let url = client.endpoint_url(&["cantons", "v1"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://www.simap.ch/api/cantons/v1");
    }

    #[test]
    fn endpoint_url_keeps_base_path_segments() {
        // Url::join would have resolved an absolute path against the
        // host root and dropped /api/v2.
        let client = client("https://staging.simap.ch/api/v2");
        let url = client.endpoint_url(&["cantons", "v1"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://staging.simap.ch/api/v2/cantons/v1");
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client = client("https://www.simap.ch/api");

        // A '#' in a path parameter must not truncate the path into a
        // fragment and swallow the trailing segments.
        let url = client
            .endpoint_url(
                &["publications", "v2", "project", "abc#frag", "project-header"],
                &[],
            )
            .unwrap();
        assert_eq!(
            url.path(),
            "/api/publications/v2/project/abc%23frag/project-header"
        );
        assert!(url.fragment().is_none());

        // Likewise '/' cannot introduce extra segments.
        let url = client.endpoint_url(&["project", "a/b"], &[]).unwrap();
        assert_eq!(url.path(), "/api/project/a%2Fb");
    }

    #[test]
    fn endpoint_url_encodes_query_pairs() {
        let client = client("https://www.simap.ch/api");
        let url = client
            .endpoint_url(
                &["publications", "v2", "project", "project-search"],
                &[
                    ("search".to_owned(), "strada cantonale".to_owned()),
                    ("orderAddressCantons".to_owned(), "TI,ZH".to_owned()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.query(),
            Some("search=strada+cantonale&orderAddressCantons=TI%2CZH")
        );
    }

    #[tokio::test]
    async fn deferred_option_errors_surface_at_send() {
        let client = client("https://www.simap.ch/api");
        let options = RequestOptions::new().header("bad header", "v");
        let err = client
            .get_json::<serde_json::Value>(&["cantons", "v1"], &[], options)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeaderName(_)));
    }

    // Responds instantly with headers, then never produces a body frame.
    struct StallingBodyTransport;

    struct PendingBody;

    impl http_body::Body for PendingBody {
        type Data = Bytes;
        type Error = Box<dyn std::error::Error + Send + Sync>;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<http_body::Frame<Bytes>, Self::Error>>> {
            Poll::Pending
        }
    }

    #[async_trait]
    impl Transport for StallingBodyTransport {
        async fn execute(
            &self,
            _request: Request<Full<Bytes>>,
        ) -> Result<Response<TransportBody>, ClientError> {
            Ok(Response::new(PendingBody.boxed()))
        }
    }

    #[tokio::test]
    async fn timeout_covers_body_collection() {
        // The deadline spans the whole exchange: a response whose headers
        // arrive promptly but whose body stalls still times out.
        let client = SimapClient::builder()
            .with_transport(Arc::new(StallingBodyTransport))
            .build()
            .expect("client should build");

        let options = RequestOptions::new().with_timeout(Duration::from_millis(50));
        let err = client
            .get_json::<serde_json::Value>(&["cantons", "v1"], &[], options)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout(_)));
    }
}
