use std::sync::Arc;

use warden_domain::ports::{KickService, WhitelistRepository};
use warden_domain::RuntimeConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub whitelist_repo: Arc<dyn WhitelistRepository>,
    pub kick_service: Arc<dyn KickService>,
}
