//! Holds the bearer token of the signed-in user and persists it between runs.
//!
//! The token is kept in memory behind a lock so that the `Api` can read it on every request. When
//! the store was loaded from a file, `set` and `clear` keep that file in sync.

use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// The on-disk format of the token file.
#[derive(Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// A shared handle to the session token. Clones share the same token.
#[derive(Clone, Default)]
pub struct TokenStore {
    token: Arc<RwLock<Option<String>>>,
    path: Option<PathBuf>,
}

impl Debug for TokenStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.token().is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl TokenStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the token file at `path`. A missing file means nobody is signed in.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let token = if path.is_file() {
            let file: TokenFile = utils::deserialize(&path)
                .await
                .context("Unable to load the session token")?;
            Some(file.token)
        } else {
            None
        };
        debug!(
            "Loaded token store from {} (signed in: {})",
            path.display(),
            token.is_some()
        );
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        })
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replaces the token and rewrites the token file.
    pub async fn set(&self, token: String) -> Result<()> {
        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&TokenFile {
                token: token.clone(),
            })
            .context("Unable to serialize the session token")?;
            utils::write_private(path, data).await?;
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// Forgets the token and deletes the token file.
    pub async fn clear(&self) -> Result<()> {
        if let Some(path) = &self.path {
            utils::remove_if_exists(path).await?;
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_means_signed_out() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::load(dir.path().join("token.json")).await.unwrap();
        assert!(store.token().is_none());
    }

    #[tokio::test]
    async fn set_persists_and_clear_removes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");

        let store = TokenStore::load(&path).await.unwrap();
        store.set("abc".to_string()).await.unwrap();
        assert!(path.is_file());

        let reloaded = TokenStore::load(&path).await.unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("abc"));

        reloaded.clear().await.unwrap();
        assert!(!path.exists());
        assert!(reloaded.token().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        let store = TokenStore::load(&path).await.unwrap();
        store.set("abc".to_string()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn clones_share_the_token() {
        let store = TokenStore::in_memory();
        let clone = store.clone();
        store.set("shared".to_string()).await.unwrap();
        assert_eq!(clone.token().as_deref(), Some("shared"));
    }

    #[test]
    fn debug_hides_the_token() {
        let store = TokenStore {
            token: Arc::new(RwLock::new(Some("secret".to_string()))),
            path: None,
        };
        assert!(!format!("{store:?}").contains("secret"));
    }
}
