//! File-backed bearer-token store.
//!
//! One opaque token in `$ALERTA_HOME/auth.json`, written with mode 0o600
//! on Unix. The rest of the core only reads it; the login and logout
//! flows are the only writers.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AuthError;

/// Storage file name inside the alerta home directory.
const AUTH_FILE: &str = "auth.json";

/// Persisted credential state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenStore {
    /// Bearer token issued by the login collaborator, opaque to us.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl TokenStore {
    /// Loads the store, returning an empty one when the file is missing.
    pub fn load(home: &Path) -> Result<Self, AuthError> {
        let file_path = home.join(AUTH_FILE);
        if !file_path.exists() {
            return Ok(Self::default());
        }

        let mut file = File::open(&file_path).map_err(AuthError::Io)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(AuthError::Io)?;

        let store: Self = serde_json::from_str(&contents)?;
        Ok(store)
    }

    /// Saves the store with secure file permissions (0o600) on Unix.
    pub fn save(&self, home: &Path) -> Result<(), AuthError> {
        let file_path = home.join(AUTH_FILE);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(AuthError::Io)?;
        }

        #[cfg(unix)]
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&file_path)
            .map_err(AuthError::Io)?;

        #[cfg(not(unix))]
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .map_err(AuthError::Io)?;

        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes()).map_err(AuthError::Io)?;

        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    /// The storage file path for a given home directory.
    pub fn file_path(home: &Path) -> PathBuf {
        home.join(AUTH_FILE)
    }
}
