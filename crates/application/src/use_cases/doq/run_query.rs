use crate::ports::{DnsCodec, DoqConnection, QueryStream};
use crate::services::{
    send_frame_and_finish, CompletionDetector, IdleDeadlineDetector, NextFrame,
};
use ferrous_doq_domain::{DnsQuery, QueryError, QueryOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Drives one query over its own stream: send one framed request, finish
/// the send side, then read framed responses until the query is answered.
pub struct RunQueryUseCase {
    connection: Arc<dyn DoqConnection>,
    codec: Arc<dyn DnsCodec>,
    options: QueryOptions,
    read_timeout: Duration,
}

impl RunQueryUseCase {
    pub fn new(
        connection: Arc<dyn DoqConnection>,
        codec: Arc<dyn DnsCodec>,
        options: QueryOptions,
        read_timeout: Duration,
    ) -> Self {
        Self {
            connection,
            codec,
            options,
            read_timeout,
        }
    }

    /// Forwards each rendered response to `output` as soon as it decodes and
    /// returns how many were forwarded.
    ///
    /// Ordinary queries stop after the first response. Zone transfers keep
    /// reading until the stream is finished or the read deadline passes
    /// between frames. The stream is released on every return path.
    pub async fn execute(
        &self,
        query: &DnsQuery,
        output: &mpsc::Sender<String>,
    ) -> Result<usize, QueryError> {
        let QueryStream { mut send, recv } = self.connection.open_stream().await?;

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            server = %self.connection.peer(),
            "Stream opened"
        );

        let wire = match self.codec.encode_query(query, &self.options) {
            Ok(wire) => wire,
            Err(e) => {
                let _ = send.shutdown().await;
                return Err(e);
            }
        };

        send_frame_and_finish(&mut send, &wire).await?;
        drop(send);

        let deadline = Instant::now() + self.read_timeout;
        let mut detector = IdleDeadlineDetector::new(recv, deadline);
        let mut forwarded = 0usize;

        loop {
            let payload = match detector.next_frame().await? {
                NextFrame::Frame(payload) => payload,
                NextFrame::Done(reason) => {
                    debug!(
                        domain = %query.domain,
                        frames = detector.frames_read(),
                        reason = ?reason,
                        "Response complete"
                    );
                    break;
                }
            };

            let rendered = self.codec.decode_response(&payload)?;
            forwarded += 1;

            if output.send(rendered).await.is_err() {
                warn!(domain = %query.domain, "Output closed, abandoning response stream");
                break;
            }

            if !query.is_zone_transfer() {
                break;
            }
        }

        Ok(forwarded)
    }
}
