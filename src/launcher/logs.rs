//! Foreground forwarding of container output.

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::runtime::LogChunk;
use crate::Result;

/// Forward demultiplexed container output to the local stdout/stderr
/// until the stream closes.
///
/// Each chunk is flushed immediately so interleaved output stays live.
///
/// # Errors
///
/// Propagates runtime stream errors and local write failures.
pub async fn forward(mut stream: BoxStream<'static, Result<LogChunk>>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    while let Some(chunk) = stream.next().await {
        match chunk? {
            LogChunk::Stdout(bytes) => {
                stdout.write_all(&bytes).await?;
                stdout.flush().await?;
            }
            LogChunk::Stderr(bytes) => {
                stderr.write_all(&bytes).await?;
                stderr.flush().await?;
            }
        }
    }

    Ok(())
}
