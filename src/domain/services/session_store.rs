#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::PersistedSession;
use crate::domain::models::Session;

/// Owns the current [`Session`] and mirrors every change to disk.
pub struct SessionStore {
    file_path: path::PathBuf,
    session: Session,
}

impl SessionStore {
    pub fn new(file_path: path::PathBuf) -> SessionStore {
        return SessionStore {
            file_path,
            session: Session::default(),
        };
    }

    /// Rehydrates from `file_path`. A missing, unreadable or malformed file
    /// yields an empty session rather than an error.
    pub async fn load(file_path: path::PathBuf) -> SessionStore {
        let mut store = SessionStore::new(file_path);
        if !store.file_path.exists() {
            return store;
        }

        let payload = match fs::read_to_string(&store.file_path).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = ?err, path = ?store.file_path, "Failed to read session file");
                return store;
            }
        };

        match serde_json::from_str::<PersistedSession>(&payload) {
            Ok(persisted) => {
                // Flags are always re-derived from the token.
                store.session = Session::from_token(persisted.state.token().map(String::from));
            }
            Err(err) => {
                tracing::warn!(error = ?err, path = ?store.file_path, "Malformed session file");
            }
        }

        return store;
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    pub fn token(&self) -> Option<String> {
        return self.session.token().map(String::from);
    }

    pub fn file_path(&self) -> &path::Path {
        return &self.file_path;
    }

    pub async fn set_token(&mut self, token: Option<String>) -> Result<()> {
        self.session = Session::from_token(token);
        tracing::debug!(
            is_authenticated = self.session.is_authenticated(),
            is_guest = self.session.is_guest(),
            "Session updated"
        );

        return self.save().await;
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.session = Session::default();
        tracing::debug!("Session cleared");

        return self.save().await;
    }

    async fn save(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let persisted = PersistedSession {
            state: self.session.clone(),
            version: 0,
        };

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(serde_json::to_string(&persisted)?.as_bytes())
            .await?;
        file.flush().await?;

        return Ok(());
    }
}
