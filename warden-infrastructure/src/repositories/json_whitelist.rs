use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use warden_domain::ports::WhitelistRepository;
use warden_domain::WhitelistDocument;

/// Whitelist backed by a JSON file of player records. The file is owned by
/// an external tool and may change at any time, so it is re-read on every
/// lookup rather than cached.
pub struct JsonWhitelistRepository {
    path: PathBuf,
}

impl JsonWhitelistRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WhitelistRepository for JsonWhitelistRepository {
    async fn is_whitelisted(
        &self,
        player_name: &str,
        identity_id: &str,
    ) -> anyhow::Result<bool> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read whitelist file {}", self.path.display()))?;
        let document: WhitelistDocument = serde_json::from_str(&content)
            .with_context(|| format!("parse whitelist file {}", self.path.display()))?;
        let allowed = document.allows(player_name, identity_id);
        debug!(
            "whitelist file lookup for {} ({}): {}",
            player_name, identity_id, allowed
        );
        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use tempfile::TempDir;

    fn write_whitelist(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("whitelist.json");
        std::fs::write(&path, content).expect("write whitelist fixture");
        path
    }

    #[tokio::test]
    async fn matches_game_name_ignoring_case() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_whitelist(
            dir.path(),
            r#"{"players":[{"game_name":"Alice","identity_id":"id-1","whitelisted":1}]}"#,
        );
        let repo = JsonWhitelistRepository::new(path);
        assert!(repo.is_whitelisted("alice", "any-id").await.expect("lookup"));
    }

    #[tokio::test]
    async fn matches_identity_id_ignoring_case() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_whitelist(
            dir.path(),
            r#"{"players":[{"game_name":"someone","identity_id":"abc-123","whitelisted":1}]}"#,
        );
        let repo = JsonWhitelistRepository::new(path);
        assert!(repo
            .is_whitelisted("unknownname", "ABC-123")
            .await
            .expect("lookup"));
    }

    #[tokio::test]
    async fn unflagged_entry_does_not_match() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_whitelist(
            dir.path(),
            r#"{"players":[{"game_name":"Alice","identity_id":"id-1","whitelisted":0}]}"#,
        );
        let repo = JsonWhitelistRepository::new(path);
        assert!(!repo.is_whitelisted("alice", "id-1").await.expect("lookup"));
    }

    #[tokio::test]
    async fn malformed_json_surfaces_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_whitelist(dir.path(), r#"{"players": [ oops"#);
        let repo = JsonWhitelistRepository::new(path);
        // The pipeline maps this to "not whitelisted" (fail-closed).
        assert!(repo.is_whitelisted("alice", "id-1").await.is_err());
    }

    #[tokio::test]
    async fn missing_file_surfaces_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let repo = JsonWhitelistRepository::new(dir.path().join("absent.json"));
        assert!(repo.is_whitelisted("alice", "id-1").await.is_err());
    }
}
