use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::ring;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::warn;

/// Builds the rustls client configuration shared by every worker
/// connection to an HTTPS target.
///
/// With `insecure` set, certificate chain, hostname and validity-period
/// checks are all skipped; otherwise the system trust anchors apply.
/// ALPN offers `http/1.1` only.
pub fn client_config(insecure: bool) -> Result<Arc<ClientConfig>> {
    let provider = ring::default_provider();
    let builder = ClientConfig::builder_with_provider(provider.into())
        .with_safe_default_protocol_versions()
        .context("unsupported default TLS protocol versions")?;

    let mut config = if insecure {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(InsecureVerifier))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        let certs = rustls_native_certs::load_native_certs()
            .context("failed to load system trust anchors")?;
        let (added, ignored) = root_store.add_parsable_certificates(certs);
        if ignored > 0 {
            warn!("ignored {} unparsable system trust anchors", ignored);
        }
        ensure!(added > 0, "no usable trust anchors in the system store");

        builder
            .with_root_certificates(Arc::new(root_store))
            .with_no_client_auth()
    };

    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

/// Certificate verifier that accepts any server certificate.
///
/// Backs the `--insecure` flag. Handshake signatures still have to be
/// well-formed; only trust decisions are waved through.
#[derive(Debug)]
struct InsecureVerifier;

impl ServerCertVerifier for InsecureVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
