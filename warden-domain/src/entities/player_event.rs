// Player join events parsed from the game server console log

use std::fmt;

use crate::entities::config::RconConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Created,
    Updated,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Created => write!(f, "Creating"),
            PlayerAction::Updated => write!(f, "Updating"),
        }
    }
}

/// One `Creating player` / `Updating player` console log line.
/// Ephemeral: derived per matching line, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEvent {
    pub action: PlayerAction,
    pub player_id: String,
    pub player_name: String,
    pub identity_id: String,
}

/// One kick attempt against the remote console. Carries its own credentials
/// snapshot so concurrent dispatches share no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickRequest {
    pub player_id: String,
    pub rcon: RconConfig,
}

impl KickRequest {
    pub fn command(&self) -> String {
        format!("#kick {}", self.player_id)
    }
}
