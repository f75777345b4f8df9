//! TLS settings for DNS-over-QUIC (RFC 9250).
//!
//! - ALPN is always `doq`.
//! - Without a CA bundle the server certificate is accepted unverified;
//!   signatures on the handshake are still checked.
//! - A client identity is presented only when both certificate and key
//!   are configured.

use super::key_log::KeyLogFile;
use ferrous_doq_domain::config::TlsConfig;
use ferrous_doq_domain::ConfigError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, RootCertStore, SignatureScheme};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DOQ_ALPN: &[u8] = b"doq";

/// Builds the rustls client configuration described by `tls`.
pub fn build_client_tls_config(tls: &TlsConfig) -> Result<rustls::ClientConfig, ConfigError> {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let builder = rustls::ClientConfig::builder_with_protocol_versions(&[&rustls::version::TLS13]);

    let builder = match &tls.ca_certs {
        Some(path) => builder.with_root_certificates(load_root_store(path)?),
        None => {
            warn!("No CA bundle configured, server certificate will not be verified");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(InsecureServerVerifier::new()))
        }
    };

    if tls.has_partial_identity() {
        warn!("Only one of certificate and key was given, connecting without a client certificate");
    }

    let mut config = match tls.client_identity() {
        Some((cert, key)) => {
            let (chain, key) = load_client_identity(cert, key)?;
            builder
                .with_client_auth_cert(chain, key)
                .map_err(|e| ConfigError::ClientIdentity(e.to_string()))?
        }
        None => builder.with_no_client_auth(),
    };

    config.alpn_protocols = vec![DOQ_ALPN.to_vec()];

    if let Some(path) = &tls.export_keys_path {
        let key_log = KeyLogFile::create(path)
            .map_err(|e| ConfigError::KeyLogFile(format!("{}: {}", path.display(), e)))?;
        config.key_log = Arc::new(key_log);
        debug!(path = %path.display(), "Exporting TLS session keys");
    }

    Ok(config)
}

/// Loads every certificate in a PEM bundle. A bundle without any
/// certificate is an error.
pub fn load_root_store(path: &Path) -> Result<RootCertStore, ConfigError> {
    let certs = read_certificates(path).map_err(ConfigError::CaBundle)?;

    let mut store = RootCertStore::empty();
    for cert in certs {
        store
            .add(cert)
            .map_err(|e| ConfigError::CaBundle(format!("{}: {}", path.display(), e)))?;
    }

    debug!(path = %path.display(), roots = store.len(), "Loaded CA bundle");
    Ok(store)
}

/// Loads a PEM certificate chain and its PEM private key.
pub fn load_client_identity(
    cert_path: &Path,
    key_path: &Path,
) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), ConfigError> {
    let chain = read_certificates(cert_path).map_err(ConfigError::ClientIdentity)?;

    let file = File::open(key_path)
        .map_err(|e| ConfigError::ClientIdentity(format!("{}: {}", key_path.display(), e)))?;
    let key = rustls_pemfile::private_key(&mut BufReader::new(file))
        .map_err(|e| ConfigError::ClientIdentity(format!("{}: {}", key_path.display(), e)))?
        .ok_or_else(|| {
            ConfigError::ClientIdentity(format!("{}: no private key found", key_path.display()))
        })?;

    Ok((chain, key))
}

fn read_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, String> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;

    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    if certs.is_empty() {
        return Err(format!("{}: no certificates found", path.display()));
    }
    Ok(certs)
}

/// Accepts any server certificate. Handshake signatures are still verified
/// with the provider's algorithms.
#[derive(Debug)]
struct InsecureServerVerifier {
    provider: Arc<CryptoProvider>,
}

impl InsecureServerVerifier {
    fn new() -> Self {
        let provider = CryptoProvider::get_default()
            .cloned()
            .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()));
        Self { provider }
    }
}

impl ServerCertVerifier for InsecureServerVerifier {
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
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
