use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TlsConfig {
    /// PEM bundle of trusted roots. Without it the server certificate is
    /// not verified at all.
    #[serde(default)]
    pub ca_certs: Option<PathBuf>,

    #[serde(default)]
    pub cert: Option<PathBuf>,

    #[serde(default)]
    pub key: Option<PathBuf>,

    /// NSS key log destination for offline decryption of captures.
    #[serde(default)]
    pub export_keys_path: Option<PathBuf>,
}

impl TlsConfig {
    pub fn verifies_server(&self) -> bool {
        self.ca_certs.is_some()
    }

    /// Certificate and key paths, only when both were supplied.
    pub fn client_identity(&self) -> Option<(&Path, &Path)> {
        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }

    pub fn has_partial_identity(&self) -> bool {
        self.cert.is_some() != self.key.is_some()
    }
}
