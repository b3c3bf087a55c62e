use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::interfaces::SessionStore;
use crate::domain::{DomainError, Session};

const SESSION_FILE: &str = "session.json";

/// Session persisted as JSON under the data directory, so the token and
/// user id survive between invocations until `logout` clears them.
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<Session>, DomainError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt file downgrades to anonymous rather than
                // blocking every command.
                warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| DomainError::internal(format!("failed to encode session: {}", e)))?;
        std::fs::write(&self.path, raw)?;
        debug!("Saved session to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), DomainError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!("Cleared session at {:?}", self.path);
        }
        Ok(())
    }
}
