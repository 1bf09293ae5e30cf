//! The single-instance relaunch channel.
//!
//! One unix socket per user. A connection carries exactly one query:
//! there is no framing, every byte received before the peer closes is
//! the query. A second invocation connects, writes, closes, exits.

use std::env;
use std::path::{Path, PathBuf};

use kanal::AsyncSender;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

/// Per-user socket path: `$XDG_RUNTIME_DIR/{name}-{user}.sock`,
/// falling back to `/tmp`.
pub fn service_path(name: &str) -> anyhow::Result<PathBuf> {
    let user = env::var("USER")
        .or_else(|_| env::var("LOGNAME"))
        .map_err(|_| anyhow::anyhow!("neither USER nor LOGNAME is set"))?;
    let dir = env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    Ok(PathBuf::from(dir).join(format!("{name}-{user}.sock")))
}

/// Hand a query to an already-running instance. An error means there is
/// no instance listening and the caller should become one.
pub async fn forward_query(path: &Path, query: &str) -> std::io::Result<()> {
    let mut stream = UnixStream::connect(path).await?;
    stream.write_all(query.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

pub fn bind(path: &Path) -> anyhow::Result<UnixListener> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if path.exists() {
        // Nobody answered the connect attempt, so the file is stale.
        std::fs::remove_file(path)?;
    }
    Ok(UnixListener::bind(path)?)
}

pub async fn serve(
    listener: UnixListener,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("socket listener stopping");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, _addr) = accepted?;
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    match read_query(stream).await {
                        Ok(query) => {
                            if let Err(e) = tx.send(AppEvent::Query(query)).await {
                                tracing::error!("failed to queue query: {e}");
                            }
                        }
                        Err(e) => tracing::warn!("dropping connection: {e}"),
                    }
                });
            }
        }
    }
}

async fn read_query(mut stream: UnixStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
