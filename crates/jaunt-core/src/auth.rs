//! Bearer token persistence.
//!
//! The backend hands out long-lived bearer tokens; the client keeps the
//! current one in a state file between runs. When any request comes back
//! 401 the token is discarded and the caller is signed out until a new
//! token is stored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AuthoringError, Result};

/// File-backed store holding at most one bearer token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Uses the given file as the store.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store at its default XDG state location.
    pub fn open_default() -> Result<Self> {
        let path = xdg::BaseDirectories::with_prefix("jaunt")
            .place_state_file("token")
            .map_err(|e| AuthoringError::XdgDirectory(e.to_string()))?;
        Ok(Self::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored token, if any.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AuthoringError::file_system(&self.path, source)),
        }
    }

    /// Stores a token, replacing any previous one.
    pub fn save(&self, token: &str) -> Result<()> {
        fs::write(&self.path, token)
            .map_err(|source| AuthoringError::file_system(&self.path, source))
    }

    /// Discards the stored token. Clearing an empty store is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AuthoringError::file_system(&self.path, source)),
        }
    }
}
