use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;

mod display;
mod events;
mod io;
mod state;
#[cfg(test)]
mod tests;

use self::events::AppEvent;
use self::state::AppState;
use inkdict_config::Config;

#[derive(Parser)]
#[command(name = "inkdict", about = "Dictionary lookup for e-ink readers")]
struct Args {
    /// Term to look up; handed to the running instance if there is one.
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::new();
    let socket_path = io::service_path(&config.runtime.socket_name)?;

    // Single instance: if someone already listens on the socket, the
    // query belongs to them and this process is done.
    let query = args.query.unwrap_or_default();
    if io::forward_query(&socket_path, &query).await.is_ok() {
        tracing::info!("forwarded query to the running instance");
        return Ok(());
    }

    let state = Arc::new(AppState::new(config));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    run(state, socket_path, query, shutdown).await
}

pub async fn run(
    state: Arc<AppState>,
    socket_path: std::path::PathBuf,
    initial_query: String,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let (event_tx, event_rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();

    let listener = io::bind(&socket_path)?;
    let server = tokio::spawn(io::serve(listener, event_tx.clone(), cancel.clone()));

    if !initial_query.is_empty() && !state.dicts.is_empty() {
        event_tx.send(AppEvent::Query(initial_query)).await?;
    }

    let loop_state = Arc::clone(&state);
    let event_loop = tokio::spawn(async move {
        if let Err(e) = events::event_loop(loop_state, event_rx).await {
            tracing::error!("event_loop exited: {e}");
        }
    });

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
        result = server => {
            match result {
                Ok(_) => tracing::warn!("socket listener exited"),
                Err(e) => tracing::error!("socket listener panicked: {e}"),
            }
        }
        result = event_loop => {
            match result {
                Ok(_) => tracing::warn!("event loop exited"),
                Err(e) => tracing::error!("event loop panicked: {e}"),
            }
        }
    }

    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}
