use async_trait::async_trait;

/// Read-only lookup against the external allow-list store.
///
/// Implementations report lookup failures honestly; the pipeline is the one
/// that fails closed (treats `Err` as "not whitelisted").
#[async_trait]
pub trait WhitelistRepository: Send + Sync {
    async fn is_whitelisted(&self, player_name: &str, identity_id: &str)
        -> anyhow::Result<bool>;
}
