//! # Session Store
//!
//! Holds the access/refresh token pair for the current session.
//!
//! ## Single-Writer Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Token Flow                                │
//! │                                                                         │
//! │  WRITERS (only two)                 READERS (everyone)                 │
//! │  ──────────────────                 ──────────────────                 │
//! │  • login        → set_tokens()      • every outgoing request           │
//! │  • 401 refresh  → set_tokens()        reads access_token()             │
//! │  • logout /                                                            │
//! │    failed refresh → clear()                                            │
//! │                                                                         │
//! │  The store is an explicit object injected into ApiClient - there is    │
//! │  no ad hoc global key-value storage.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence
//! A store created with [`SessionStore::persistent`] mirrors every write to
//! a TOML file under the platform config directory, so a restarted client
//! resumes the session. Persistence failures are logged and never fail the
//! request that triggered the write.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The access/refresh token pair issued by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    /// Bearer token attached to every request.
    pub access_token: String,
    /// One-time-use token exchanged when the access token expires.
    pub refresh_token: String,
}

/// Shared, cloneable session token store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tokens: Arc<RwLock<Option<SessionTokens>>>,
    /// Mirror file for persistence; None for in-memory stores.
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Creates an in-memory store (tests, short-lived tools).
    pub fn in_memory() -> Self {
        SessionStore {
            tokens: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Creates a store mirrored to `session.toml` under the platform config
    /// directory, loading any previously persisted tokens.
    pub fn persistent() -> Self {
        let path = directories::ProjectDirs::from("com", "cargodesk", "cargodesk")
            .map(|dirs| dirs.config_dir().join("session.toml"));

        let initial = path.as_deref().and_then(|p| match std::fs::read_to_string(p) {
            Ok(raw) => match toml::from_str::<SessionTokens>(&raw) {
                Ok(tokens) => {
                    debug!(path = %p.display(), "loaded persisted session");
                    Some(tokens)
                }
                Err(e) => {
                    warn!(path = %p.display(), %e, "ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        });

        SessionStore {
            tokens: Arc::new(RwLock::new(initial)),
            path,
        }
    }

    /// Creates a store mirrored to an explicit file path.
    pub fn at_path(path: PathBuf) -> Self {
        let initial = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| toml::from_str(&raw).ok());
        SessionStore {
            tokens: Arc::new(RwLock::new(initial)),
            path: Some(path),
        }
    }

    /// Returns the current access token, if authenticated.
    pub async fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Returns the current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// Returns true if a session is present.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Replaces the token pair. Called only by login and refresh.
    pub async fn set_tokens(&self, access_token: String, refresh_token: String) {
        let tokens = SessionTokens {
            access_token,
            refresh_token,
        };
        *self.tokens.write().await = Some(tokens.clone());
        self.persist(Some(&tokens));
    }

    /// Drops the session. Called by logout and by a failed refresh.
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
        self.persist(None);
    }

    /// Best-effort mirror to disk; never fails the caller.
    fn persist(&self, tokens: Option<&SessionTokens>) {
        let Some(path) = &self.path else {
            return;
        };

        let result = match tokens {
            Some(tokens) => toml::to_string_pretty(tokens)
                .map_err(|e| e.to_string())
                .and_then(|raw| {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
                    }
                    std::fs::write(path, raw).map_err(|e| e.to_string())
                }),
            None => match std::fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.to_string()),
            },
        };

        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to persist session");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated().await);
        assert!(store.access_token().await.is_none());

        store
            .set_tokens("access-1".to_string(), "refresh-1".to_string())
            .await;
        assert!(store.is_authenticated().await);
        assert_eq!(store.access_token().await.as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-1"));

        store.clear().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_persistent_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let store = SessionStore::at_path(path.clone());
        store
            .set_tokens("access-2".to_string(), "refresh-2".to_string())
            .await;
        assert!(path.exists());

        // A fresh store at the same path resumes the session.
        let resumed = SessionStore::at_path(path.clone());
        assert_eq!(resumed.access_token().await.as_deref(), Some("access-2"));

        resumed.clear().await;
        assert!(!path.exists());
    }
}
