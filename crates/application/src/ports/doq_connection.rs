use async_trait::async_trait;
use ferrous_doq_domain::QueryError;
use tokio::io::{AsyncRead, AsyncWrite};

pub type StreamSendHalf = Box<dyn AsyncWrite + Send + Unpin>;
pub type StreamRecvHalf = Box<dyn AsyncRead + Send + Unpin>;

/// One bidirectional stream, owned exclusively by a single query.
///
/// Shutting down `send` finishes the write direction. Dropping `recv`
/// before the peer finished tells it to stop sending.
pub struct QueryStream {
    pub send: StreamSendHalf,
    pub recv: StreamRecvHalf,
}

impl QueryStream {
    pub fn new(send: StreamSendHalf, recv: StreamRecvHalf) -> Self {
        Self { send, recv }
    }
}

/// An established multiplexed connection. `open_stream` takes `&self` and
/// must be safe to call from many tasks at once.
#[async_trait]
pub trait DoqConnection: Send + Sync {
    async fn open_stream(&self) -> Result<QueryStream, QueryError>;

    /// Remote endpoint, for diagnostics only.
    fn peer(&self) -> String;
}
