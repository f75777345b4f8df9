//! Deciding when a response stream is over.
//!
//! DoQ carries no "last message" marker that this client can rely on, so a
//! zone transfer is considered complete when the server finishes the stream
//! at a frame boundary or when no further frame starts before the read
//! deadline. The heuristic is kept behind [`CompletionDetector`] so a real
//! end-of-response signal can replace it without touching the callers.

use async_trait::async_trait;
use ferrous_doq_domain::QueryError;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{timeout_at, Instant};

use super::framing::LENGTH_PREFIX_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The deadline passed while waiting for the next length prefix.
    IdleDeadline,
    /// The peer finished its send side between two frames.
    StreamFinished,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NextFrame {
    Frame(Vec<u8>),
    Done(CompletionReason),
}

#[async_trait]
pub trait CompletionDetector: Send {
    async fn next_frame(&mut self) -> Result<NextFrame, QueryError>;
}

/// Reads length-prefixed frames until a single, fixed deadline elapses.
///
/// The deadline is not refreshed when a frame arrives: it bounds the whole
/// read phase. Running out of time between frames ends the response; running
/// out of time inside a payload is a [`QueryError::Receive`].
pub struct IdleDeadlineDetector<R> {
    reader: R,
    deadline: Instant,
    frames_read: usize,
}

impl<R> IdleDeadlineDetector<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, deadline: Instant) -> Self {
        Self {
            reader,
            deadline,
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// `Ok(None)` when the stream ends cleanly before the first prefix byte.
    async fn read_length(&mut self) -> io::Result<Option<u16>> {
        let mut buf = [0u8; LENGTH_PREFIX_LEN];
        let mut filled = 0;

        while filled < LENGTH_PREFIX_LEN {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream finished inside a length prefix",
                ));
            }
            filled += n;
        }

        Ok(Some(u16::from_be_bytes(buf)))
    }
}

#[async_trait]
impl<R> CompletionDetector for IdleDeadlineDetector<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn next_frame(&mut self) -> Result<NextFrame, QueryError> {
        let deadline = self.deadline;

        let length = match timeout_at(deadline, self.read_length()).await {
            Err(_elapsed) => return Ok(NextFrame::Done(CompletionReason::IdleDeadline)),
            Ok(Err(e)) => {
                return Err(QueryError::Receive(format!(
                    "read response length: {}",
                    e
                )))
            }
            Ok(Ok(None)) if self.frames_read > 0 => {
                return Ok(NextFrame::Done(CompletionReason::StreamFinished))
            }
            Ok(Ok(None)) => {
                return Err(QueryError::Receive(
                    "stream finished before any response".to_string(),
                ))
            }
            Ok(Ok(Some(length))) => length as usize,
        };

        let mut payload = vec![0u8; length];
        match timeout_at(deadline, self.reader.read_exact(&mut payload)).await {
            Err(_elapsed) => Err(QueryError::Receive(format!(
                "read deadline elapsed inside a {} byte payload",
                length
            ))),
            Ok(Err(e)) => Err(QueryError::Receive(format!(
                "read response payload ({} bytes): {}",
                length, e
            ))),
            Ok(Ok(_)) => {
                self.frames_read += 1;
                Ok(NextFrame::Frame(payload))
            }
        }
    }
}
