// Per-line processing: parse -> whitelist decision -> optional kick dispatch

use tracing::{debug, error, info, warn};

use warden_domain::services::JoinEventParser;
use warden_domain::{KickRequest, PlayerEvent};

use crate::AppState;

/// Handles one console log line. Lines are fed strictly in log order; kick
/// dispatch is fire-and-forget so a slow remote console never delays the
/// next line.
pub async fn handle_line(state: &AppState, parser: &JoinEventParser, line: &str) {
    let Some(event) = parser.parse(line) else {
        debug!("unmatched line: {}", line);
        return;
    };

    info!(
        "{} player - id: {}, name: {}, identity: {}",
        event.action, event.player_id, event.player_name, event.identity_id
    );

    if is_whitelisted(state, &event).await {
        info!(
            "player {} ({}) is whitelisted",
            event.player_name, event.identity_id
        );
        return;
    }

    warn!(
        "player {} ({}) is NOT whitelisted, kicking",
        event.player_name, event.identity_id
    );
    state.kick_service.dispatch_kick(KickRequest {
        player_id: event.player_id,
        rcon: state.config.rcon.clone(),
    });
}

/// Fail-closed: an unreachable or unreadable whitelist must never be treated
/// as "everyone is allowed", so lookup errors count as not whitelisted.
async fn is_whitelisted(state: &AppState, event: &PlayerEvent) -> bool {
    match state
        .whitelist_repo
        .is_whitelisted(&event.player_name, &event.identity_id)
        .await
    {
        Ok(allowed) => allowed,
        Err(err) => {
            error!(
                "whitelist lookup failed for {} ({}), treating as not whitelisted: {:#}",
                event.player_name, event.identity_id, err
            );
            false
        }
    }
}
