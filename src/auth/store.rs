//! File-backed session token storage.
//!
//! One opaque token per store, persisted as a single-key JSON file so a
//! restart within the same session picks it up again. The store is an
//! explicit context object owned by the application and handed to the
//! components that need it - nothing reads ambient global state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session file name in the store directory
const SESSION_FILE: &str = "session.json";

/// On-disk shape of a persisted session. `created_at` is diagnostic only;
/// the token is opaque and its expiry is the server's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    token: String,
    created_at: DateTime<Utc>,
}

/// Single-token session store. Purely storage - the token value is never
/// inspected or validated here.
pub struct SessionStore {
    dir: PathBuf,
    record: Option<SessionRecord>,
}

impl SessionStore {
    /// Open a store rooted at `dir`, loading any previously saved session
    pub fn open(dir: PathBuf) -> Result<Self> {
        let path = dir.join(SESSION_FILE);
        let record = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let record: SessionRecord =
                serde_json::from_str(&contents).context("Failed to parse session file")?;
            debug!(created_at = %record.created_at, "Loaded stored session");
            Some(record)
        } else {
            None
        };

        Ok(Self { dir, record })
    }

    /// The stored token, if any
    pub fn token(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.token.as_str())
    }

    /// Store or clear the token. `Some` writes the session file, `None`
    /// removes it; clearing an already-empty store is a no-op.
    ///
    /// The in-memory token is updated even when persisting fails, so an
    /// `Err` here only means the session will not survive a restart.
    pub fn set_token(&mut self, token: Option<&str>) -> Result<()> {
        match token {
            Some(token) => {
                let record = SessionRecord {
                    token: token.to_string(),
                    created_at: Utc::now(),
                };
                self.record = Some(record.clone());
                let path = self.session_path();
                std::fs::create_dir_all(&self.dir)
                    .context("Failed to create session directory")?;
                let contents = serde_json::to_string_pretty(&record)?;
                std::fs::write(&path, contents).context("Failed to write session file")?;
            }
            None => {
                self.record = None;
                let path = self.session_path();
                if path.exists() {
                    std::fs::remove_file(&path).context("Failed to remove session file")?;
                }
            }
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.token().is_none());
        store.set_token(Some("abc123")).unwrap();
        assert_eq!(store.token(), Some("abc123"));

        let reopened = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.token(), Some("abc123"));
    }

    #[test]
    fn test_clear_removes_session_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_token(Some("abc123")).unwrap();
        store.set_token(None).unwrap();
        assert!(store.token().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());

        let reopened = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.token().is_none());
    }

    #[test]
    fn test_clearing_empty_store_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_token(None).unwrap();
        store.set_token(None).unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_in_memory_token_survives_persist_failure() {
        // A store rooted at an existing file cannot create its directory,
        // so the write fails; the in-memory token must still be set
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut store = SessionStore::open(file.path().to_path_buf()).unwrap();

        assert!(store.set_token(Some("abc123")).is_err());
        assert_eq!(store.token(), Some("abc123"));
    }

    #[test]
    fn test_overwrite_replaces_token() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_token(Some("first")).unwrap();
        store.set_token(Some("second")).unwrap();
        assert_eq!(store.token(), Some("second"));

        let reopened = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.token(), Some("second"));
    }
}
