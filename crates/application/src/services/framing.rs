//! RFC 9250 §4.2 message framing: every DNS message on a stream is preceded
//! by its length as a 2-byte big-endian integer.

use ferrous_doq_domain::QueryError;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const LENGTH_PREFIX_LEN: usize = 2;
pub const MAX_FRAME_PAYLOAD: usize = u16::MAX as usize;

/// Builds `[len][message]` in one buffer so the request goes out in a single
/// write.
pub fn encode_frame(message: &[u8]) -> Result<Vec<u8>, QueryError> {
    let length = u16::try_from(message.len()).map_err(|_| {
        QueryError::Send(format!(
            "message of {} bytes exceeds the {} byte frame limit",
            message.len(),
            MAX_FRAME_PAYLOAD
        ))
    })?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + message.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message);
    Ok(frame)
}

/// Writes one framed message and then finishes the write direction.
///
/// The stream is shut down even if the write fails, so a half-sent request
/// never leaves the send side open.
pub async fn send_frame_and_finish<S>(stream: &mut S, message: &[u8]) -> Result<(), QueryError>
where
    S: AsyncWrite + Unpin + ?Sized,
{
    let frame = match encode_frame(message) {
        Ok(frame) => frame,
        Err(e) => {
            let _ = stream.shutdown().await;
            return Err(e);
        }
    };

    let written = stream.write_all(&frame).await;
    let finished = stream.shutdown().await;

    written.map_err(|e| QueryError::Send(format!("write request frame: {}", e)))?;
    finished.map_err(|e| QueryError::Send(format!("finish send stream: {}", e)))?;
    Ok(())
}
