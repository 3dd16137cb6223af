// Pipeline lifecycle: Starting -> Discovering -> Tailing -> Terminated

use std::path::Path;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tracing::info;

use warden_application::{pipeline, PipelineError};
use warden_domain::services::JoinEventParser;
use warden_infrastructure::{find_latest_console_log, heartbeat, ConfigOverrides, LogTailer};

use crate::context::AppContext;

const LINE_BUFFER: usize = 1024;

pub async fn run_standalone(overrides: ConfigOverrides) -> Result<()> {
    let context = AppContext::new(overrides).await?;
    let state = context.state;

    // Liveness signal for the lifetime of the process; never joined.
    tokio::spawn(heartbeat(state.config.heartbeat_seconds));

    let console_log = find_latest_console_log(Path::new(&state.config.base_log_dir))
        .await
        .map_err(|err| anyhow!("scan {} failed: {}", state.config.base_log_dir, err))?
        .ok_or_else(|| PipelineError::NoActiveLog(state.config.base_log_dir.clone()))?;

    // Rotation after this point is not detected; restart to pick up a new
    // active log directory.
    let (line_tx, mut line_rx) = mpsc::channel(LINE_BUFFER);
    let tail_task = tokio::spawn(LogTailer::new(&console_log).run(line_tx));

    let parser = JoinEventParser::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(line) => pipeline::handle_line(&state, &parser, &line).await,
                // Tailer ended; its result says whether that was fatal.
                None => break,
            },
            _ = &mut shutdown => {
                info!("interrupted, shutting down");
                tail_task.abort();
                return Ok(());
            }
        }
    }

    match tail_task.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(PipelineError::Tail(err).into()),
        Err(err) => Err(anyhow!("tail task failed: {}", err)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("sigterm handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
