// Fire-and-forget kick dispatch over the remote console

use anyhow::{Context, Result};
use rcon::Connection;
use tokio::net::TcpStream;
use tracing::{error, info, warn};

use warden_domain::ports::KickService;
use warden_domain::KickRequest;

/// Issues kick commands against the game server's remote console. Each
/// dispatch runs as a detached task with its own connection, so a hung
/// remote endpoint never blocks log processing; failures are logged and
/// discarded, never retried.
#[derive(Default)]
pub struct RconKickService;

impl RconKickService {
    pub fn new() -> Self {
        Self
    }
}

impl KickService for RconKickService {
    fn dispatch_kick(&self, request: KickRequest) {
        tokio::spawn(async move {
            let player_id = request.player_id.clone();
            if let Err(err) = run_kick(request).await {
                error!("kick failed for player {}: {:#}", player_id, err);
            }
        });
    }
}

async fn run_kick(request: KickRequest) -> Result<()> {
    let address = request.rcon.address();
    let mut connection = <Connection<TcpStream>>::builder()
        .connect(address.as_str(), &request.rcon.password)
        .await
        .with_context(|| format!("connect to remote console at {}", address))?;

    let response = connection
        .cmd(&request.command())
        .await
        .context("run kick command")?;
    if response.is_empty() {
        warn!(
            "empty remote console response for player {}",
            request.player_id
        );
    }
    info!("kick command issued for player {}", request.player_id);
    Ok(())
}
