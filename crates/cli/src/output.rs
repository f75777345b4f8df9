use std::io::Write;
use tokio::sync::mpsc;

/// Prints every line from `output` until the channel closes. Returns the
/// number of lines written.
pub async fn drain<W: Write>(
    mut output: mpsc::Receiver<String>,
    mut sink: W,
) -> std::io::Result<usize> {
    let mut written = 0usize;

    while let Some(line) = output.recv().await {
        writeln!(sink, "{}", line)?;
        sink.flush()?;
        written += 1;
    }

    Ok(written)
}
