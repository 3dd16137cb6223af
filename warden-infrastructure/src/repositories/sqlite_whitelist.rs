use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use warden_domain::ports::WhitelistRepository;

const LOOKUP_SQL: &str = "SELECT 1 FROM user_data \
     WHERE (LOWER(game_name) = LOWER(?1) OR LOWER(game_name) = LOWER(?2)) \
     AND whitelisted = 1 \
     LIMIT 1";

/// Whitelist backed by a SQLite database owned by an external tool. Opened
/// read-only per lookup; queries run on the blocking thread pool so the tail
/// loop is never stalled by database I/O.
pub struct SqliteWhitelistRepository {
    path: PathBuf,
}

impl SqliteWhitelistRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WhitelistRepository for SqliteWhitelistRepository {
    async fn is_whitelisted(
        &self,
        player_name: &str,
        identity_id: &str,
    ) -> anyhow::Result<bool> {
        let path = self.path.clone();
        let player_name = player_name.to_string();
        let identity_id = identity_id.to_string();

        let allowed = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
            let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
                .with_context(|| format!("open whitelist database {}", path.display()))?;
            let mut statement = conn.prepare(LOOKUP_SQL)?;
            let found = statement.exists(params![player_name, identity_id])?;
            Ok(found)
        })
        .await??;

        debug!("whitelist database lookup: {}", allowed);
        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use tempfile::TempDir;

    fn seed_database(dir: &Path, rows: &[(&str, i64)]) -> PathBuf {
        let path = dir.join("whitelist.db");
        let conn = Connection::open(&path).expect("create database");
        conn.execute(
            "CREATE TABLE user_data (game_name TEXT NOT NULL, whitelisted INTEGER NOT NULL)",
            [],
        )
        .expect("create table");
        for (game_name, whitelisted) in rows {
            conn.execute(
                "INSERT INTO user_data (game_name, whitelisted) VALUES (?1, ?2)",
                params![game_name, whitelisted],
            )
            .expect("insert row");
        }
        path
    }

    #[tokio::test]
    async fn matches_game_name_ignoring_case() {
        let dir = TempDir::new().expect("tempdir");
        let path = seed_database(dir.path(), &[("Alice", 1)]);
        let repo = SqliteWhitelistRepository::new(path);
        assert!(repo.is_whitelisted("ALICE", "no-such-id").await.expect("lookup"));
    }

    #[tokio::test]
    async fn matches_identity_id_column_entry() {
        // Console players are stored under their identity id in game_name.
        let dir = TempDir::new().expect("tempdir");
        let path = seed_database(dir.path(), &[("abc-123", 1)]);
        let repo = SqliteWhitelistRepository::new(path);
        assert!(repo
            .is_whitelisted("unknownname", "ABC-123")
            .await
            .expect("lookup"));
    }

    #[tokio::test]
    async fn unflagged_row_does_not_match() {
        let dir = TempDir::new().expect("tempdir");
        let path = seed_database(dir.path(), &[("Alice", 0)]);
        let repo = SqliteWhitelistRepository::new(path);
        assert!(!repo.is_whitelisted("alice", "id-1").await.expect("lookup"));
    }

    #[tokio::test]
    async fn unknown_player_is_not_whitelisted() {
        let dir = TempDir::new().expect("tempdir");
        let path = seed_database(dir.path(), &[("Alice", 1)]);
        let repo = SqliteWhitelistRepository::new(path);
        assert!(!repo.is_whitelisted("mallory", "id-9").await.expect("lookup"));
    }

    #[tokio::test]
    async fn missing_database_surfaces_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let repo = SqliteWhitelistRepository::new(dir.path().join("absent.db"));
        // The pipeline maps this to "not whitelisted" (fail-closed).
        assert!(repo.is_whitelisted("alice", "id-1").await.is_err());
    }
}
