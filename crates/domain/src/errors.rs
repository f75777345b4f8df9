use crate::config::ConfigError;
use thiserror::Error;

/// Failures that stop the whole run before any result is printed.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Usage(String),

    #[error("invalid qtype: {0}")]
    InvalidQueryType(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection to {server} failed: {reason}")]
    TransportConnectionRefused { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Usage mistakes print the usage text in addition to the message.
    pub fn is_usage(&self) -> bool {
        matches!(self, DomainError::Usage(_) | DomainError::InvalidQueryType(_))
    }
}

/// Failures scoped to a single query. They are reported on the output
/// channel and never abort sibling queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("open stream: {0}")]
    StreamOpen(String),

    #[error("send query: {0}")]
    Send(String),

    #[error("receive response: {0}")]
    Receive(String),

    #[error("decode response: {0}")]
    Decode(String),
}

impl QueryError {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::StreamOpen(_) => "stream_open",
            QueryError::Send(_) => "send",
            QueryError::Receive(_) => "receive",
            QueryError::Decode(_) => "decode",
        }
    }
}
