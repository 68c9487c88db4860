use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;

use crate::config::{TlsRootConfig, TransportSecurity};
use crate::error::ClientError;
use crate::response::TransportBody;
use crate::tls;

/// The request-execution seam.
///
/// The client builds a complete `http::Request` and hands it here; the
/// default implementation is [`HyperTransport`]. Tests inject their own
/// via [`crate::SimapClientBuilder::with_transport`] to return canned
/// responses without a network.
///
/// Cancellation is the generic async mechanism: dropping the operation
/// future drops the in-flight `execute` call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the raw response.
    async fn execute(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<TransportBody>, ClientError>;
}

const POOL_MAX_IDLE_PER_HOST: usize = 32;
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Default transport: hyper-util legacy pool over a rustls HTTPS
/// connector, HTTP/1.1 and HTTP/2 via ALPN.
pub(crate) struct HyperTransport {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl HyperTransport {
    pub(crate) fn new(
        tls_roots: TlsRootConfig,
        transport: TransportSecurity,
    ) -> Result<Self, ClientError> {
        let https = build_https_connector(tls_roots, transport)?;

        let mut builder = Client::builder(TokioExecutor::new());
        builder
            .pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT);

        Ok(Self {
            client: builder.build::<_, Full<Bytes>>(https),
        })
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<TransportBody>, ClientError> {
        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();
        let body = body
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
            .boxed();
        Ok(Response::from_parts(parts, body))
    }
}

fn build_https_connector(
    tls_roots: TlsRootConfig,
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, ClientError> {
    let builder = match tls_roots {
        TlsRootConfig::WebPki => HttpsConnectorBuilder::new().with_webpki_roots(),
        TlsRootConfig::Native => {
            HttpsConnectorBuilder::new().with_tls_config(tls::native_roots_client_config()?)
        }
    };

    let builder = match transport {
        TransportSecurity::TlsOnly => builder.https_only(),
        TransportSecurity::AllowInsecureHttp => builder.https_or_http(),
    };

    Ok(builder.enable_all_versions().build())
}
