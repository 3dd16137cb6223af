use std::sync::Arc;

use anyhow::Result;

use warden_application::AppState;
use warden_domain::ports::WhitelistRepository;
use warden_domain::WhitelistBackend;
use warden_infrastructure::{
    AppConfig, ConfigOverrides, JsonWhitelistRepository, RconKickService,
    SqliteWhitelistRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(overrides: ConfigOverrides) -> Result<Self> {
        let mut config = AppConfig::load().await?;
        config.apply_overrides(&overrides);
        config.validate()?;
        let runtime_config = config.to_runtime_config()?;

        let whitelist_repo: Arc<dyn WhitelistRepository> = match runtime_config.whitelist_backend
        {
            WhitelistBackend::Json => {
                Arc::new(JsonWhitelistRepository::new(&runtime_config.whitelist_path))
            }
            WhitelistBackend::Database => {
                Arc::new(SqliteWhitelistRepository::new(&runtime_config.whitelist_path))
            }
        };

        let state = AppState {
            config: runtime_config,
            whitelist_repo,
            kick_service: Arc::new(RconKickService::new()),
        };

        Ok(Self { state })
    }
}
