use std::time::Duration;

use tracing::info;

/// Periodic liveness signal. Spawned once at startup and never joined; it
/// stops when the process exits.
pub async fn heartbeat(interval_seconds: u64) {
    let interval = Duration::from_secs(interval_seconds.max(1));
    loop {
        info!("whitelist watch is running, press ctrl-c to stop");
        tokio::time::sleep(interval).await;
    }
}
