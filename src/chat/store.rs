//! Flat file persistence for chat transcripts. Every session is a
//! single JSON file named after the session ID holding an array of
//! `{role, content}` messages.
//!
//! There is no locking. Two requests writing the same session at
//! the same time race and the last write wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::ai::chat::Transcript;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),
    #[error("Failed to access session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse session file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session IDs become file names so reject anything that could point
/// outside the sessions directory. Everything else is allowed.
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id != "."
        && session_id != ".."
        && !session_id.contains(['/', '\\', '\0'])
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store rooted at `dir`, creating the directory if it
    /// doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_path(&self, session_id: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_session_id(session_id) {
            return Err(StoreError::InvalidSessionId(session_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", session_id)))
    }

    /// Persist the transcript for a new session. Overwrites anything
    /// previously stored under the same ID.
    pub async fn create(&self, session_id: &str, transcript: &Transcript) -> Result<(), StoreError> {
        self.save(session_id, transcript).await
    }

    /// Load the transcript for a session. A session that was never
    /// saved loads as an empty transcript.
    pub async fn load(&self, session_id: &str) -> Result<Transcript, StoreError> {
        let path = self.session_path(session_id)?;
        let data = match fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No transcript found for session {}", session_id);
                return Ok(Transcript::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    pub async fn save(&self, session_id: &str, transcript: &Transcript) -> Result<(), StoreError> {
        let path = self.session_path(session_id)?;
        let data = serde_json::to_string(transcript)?;
        fs::write(&path, data).await?;
        Ok(())
    }
}
