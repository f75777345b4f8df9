#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load CA certificate bundle: {0}")]
    CaBundle(String),

    #[error("failed to load TLS certificate: {0}")]
    ClientIdentity(String),

    #[error("failed to open file for session keys: {0}")]
    KeyLogFile(String),

    #[error("failed to build TLS configuration: {0}")]
    Tls(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
