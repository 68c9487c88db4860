//! TLS root loading and crypto provider selection for the default
//! transport.

use rustls_pki_types::CertificateDer;
use std::sync::{Arc, OnceLock};

use crate::error::ClientError;

static NATIVE_ROOTS: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

fn load_native_roots() -> Vec<CertificateDer<'static>> {
    let result = rustls_native_certs::load_native_certs();
    for err in &result.errors {
        tracing::warn!(error = %err, "error loading native root certificate");
    }
    if result.certs.is_empty() {
        tracing::warn!("no native root CA certificates found in OS store");
    }
    result.certs
}

/// Native roots, loaded once per process. OS certificate stores do not
/// change often enough to justify re-reading them per client.
pub(crate) fn native_root_certs() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS.get_or_init(load_native_roots).as_slice()
}

/// The process default crypto provider, or aws-lc-rs when none is
/// installed.
pub(crate) fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default().map_or_else(
        || Arc::new(rustls::crypto::aws_lc_rs::default_provider()),
        Arc::clone,
    )
}

/// Build a rustls client config trusting the OS certificate store.
pub(crate) fn native_roots_client_config() -> Result<rustls::ClientConfig, ClientError> {
    let certs = native_root_certs();
    if certs.is_empty() {
        return Err(ClientError::Tls(
            "no native root CA certificates found in OS certificate store".into(),
        ));
    }

    let mut roots = rustls::RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(certs.iter().cloned());
    if ignored > 0 {
        tracing::warn!(added, ignored, "some native root certificates could not be parsed");
    }
    if added == 0 {
        return Err(ClientError::Tls(
            format!("no valid native root CA certificates parsed ({ignored} failed)").into(),
        ));
    }

    let config = rustls::ClientConfig::builder_with_provider(crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| ClientError::Tls(Box::new(e)))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}
