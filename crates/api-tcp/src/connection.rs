// Per-connection handling: one execution, one response, then close.

use std::net::SocketAddr;
use std::sync::Arc;

use execd_core::domain::render_response;
use execd_core::port::ProcessRunner;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Handle one accepted connection to completion.
///
/// Anything the client sends is ignored; the stream is only written to.
/// Write failures (client gone early) are logged and dropped so they never
/// reach the accept loop. The stream is closed on every exit path.
pub(crate) async fn handle<S>(mut stream: S, peer: SocketAddr, runner: Arc<dyn ProcessRunner>)
where
    S: AsyncWrite + Unpin,
{
    let outcome = runner.run().await;

    if let Err(e) = &outcome {
        warn!(peer = %peer, error = %e, "Execution failed, reporting to client");
    }

    let response = render_response(&outcome);

    if let Err(e) = write_response(&mut stream, &response).await {
        debug!(peer = %peer, error = %e, "Failed to deliver response");
    }
}

async fn write_response<S>(stream: &mut S, response: &[u8]) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(response).await?;
    stream.shutdown().await
}
