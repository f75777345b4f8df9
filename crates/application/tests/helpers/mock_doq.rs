#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_doq_application::ports::{DnsCodec, DoqConnection, QueryStream};
use ferrous_doq_domain::{DnsQuery, QueryError, QueryOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const DUPLEX_BUFFER: usize = 64 * 1024;

/// What the scripted server does after it has read the whole request.
#[derive(Debug, Clone)]
pub enum ServerAction {
    /// A well-formed length-prefixed frame.
    Frame(Vec<u8>),
    /// Bytes written as-is, for malformed framing.
    Raw(Vec<u8>),
    Sleep(Duration),
    /// Finish the server's send side.
    Finish,
}

pub fn frame(text: &str) -> ServerAction {
    ServerAction::Frame(text.as_bytes().to_vec())
}

type Responder = Arc<dyn Fn(&str) -> Vec<ServerAction> + Send + Sync>;

/// In-memory connection: every stream is a pair of duplex pipes with a
/// scripted server task on the far end.
pub struct MockDoqConnection {
    responder: Responder,
    refuse_streams: bool,
    opened: AtomicUsize,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockDoqConnection {
    /// `responder` receives the request payload as text (see [`TextCodec`]).
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Vec<ServerAction> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            refuse_streams: false,
            opened: AtomicUsize::new(0),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every query with one frame echoing the question.
    pub fn echoing() -> Self {
        Self::new(|question| vec![frame(&format!("answer for {}", question))])
    }

    pub fn refusing() -> Self {
        Self {
            refuse_streams: true,
            ..Self::new(|_| Vec::new())
        }
    }

    pub fn streams_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Raw bytes of each request as received, framing included.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DoqConnection for MockDoqConnection {
    async fn open_stream(&self) -> Result<QueryStream, QueryError> {
        if self.refuse_streams {
            return Err(QueryError::StreamOpen("connection closed by peer".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);

        let (client_send, mut server_recv) = tokio::io::duplex(DUPLEX_BUFFER);
        let (mut server_send, client_recv) = tokio::io::duplex(DUPLEX_BUFFER);

        let responder = self.responder.clone();
        let requests = self.requests.clone();

        tokio::spawn(async move {
            let mut request = Vec::new();
            if server_recv.read_to_end(&mut request).await.is_err() {
                return;
            }
            requests.lock().unwrap().push(request.clone());

            let question = String::from_utf8_lossy(request.get(2..).unwrap_or_default()).to_string();

            for action in responder(&question) {
                let written = match action {
                    ServerAction::Frame(payload) => {
                        let mut bytes = (payload.len() as u16).to_be_bytes().to_vec();
                        bytes.extend_from_slice(&payload);
                        server_send.write_all(&bytes).await
                    }
                    ServerAction::Raw(bytes) => server_send.write_all(&bytes).await,
                    ServerAction::Sleep(duration) => {
                        tokio::time::sleep(duration).await;
                        Ok(())
                    }
                    ServerAction::Finish => {
                        let _ = server_send.shutdown().await;
                        return;
                    }
                };
                if written.is_err() {
                    return;
                }
            }

            // Keep the send side open: the client has to decide on its own
            // that the response is over.
            std::future::pending::<()>().await;
            drop(server_send);
        });

        Ok(QueryStream::new(Box::new(client_send), Box::new(client_recv)))
    }

    fn peer(&self) -> String {
        "mock:853".to_string()
    }
}

/// Plain-text stand-in for the DNS codec: a query encodes as
/// `"<name> <type>"` and any UTF-8 payload decodes to itself.
/// Payloads starting with `!` are treated as malformed.
#[derive(Default)]
pub struct TextCodec {
    fail_encode: bool,
}

impl TextCodec {
    pub fn failing_encode() -> Self {
        Self { fail_encode: true }
    }
}

impl DnsCodec for TextCodec {
    fn encode_query(
        &self,
        query: &DnsQuery,
        _options: &QueryOptions,
    ) -> Result<Vec<u8>, QueryError> {
        if self.fail_encode {
            return Err(QueryError::Send(format!("pack query {}: label too long", query.domain)));
        }
        Ok(format!("{} {}", query.domain, query.record_type).into_bytes())
    }

    fn decode_response(&self, wire: &[u8]) -> Result<String, QueryError> {
        if wire.first() == Some(&b'!') {
            return Err(QueryError::Decode("malformed message".to_string()));
        }
        String::from_utf8(wire.to_vec()).map_err(|e| QueryError::Decode(e.to_string()))
    }
}
