//! Authoring session persistence between CLI invocations.
//!
//! Each invocation is a separate process; the session file is what makes
//! `jaunt new` followed by `jaunt day add` act on the same itinerary. The
//! package scratch cache lives next to it, so one `--session-file` flag
//! relocates all session state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jaunt_core::error::{AuthoringError, Result};
use jaunt_core::session::SessionState;

/// File holding the open session between runs.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Uses the given file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the file at its default XDG state location.
    pub fn open_default() -> Result<Self> {
        let path = xdg::BaseDirectories::with_prefix("jaunt")
            .place_state_file("session.json")
            .map_err(|e| AuthoringError::XdgDirectory(e.to_string()))?;
        Ok(Self::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the package scratch cache belongs: next to the session file.
    pub fn scratch_path(&self) -> PathBuf {
        self.path.with_file_name("package-scratch.json")
    }

    /// Loads the stored session, if one is open.
    pub fn load(&self) -> Result<Option<SessionState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(AuthoringError::file_system(&self.path, source)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Loads the stored session or explains how to open one.
    pub fn load_required(&self) -> Result<SessionState> {
        self.load()?.ok_or_else(|| {
            AuthoringError::session(
                "no itinerary is open; run `jaunt new <title>` or `jaunt open <id>` first",
            )
        })
    }

    /// Stores the session, replacing any previous one.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state)?;
        fs::write(&self.path, bytes)
            .map_err(|source| AuthoringError::file_system(&self.path, source))
    }

    /// Closes the session. Closing when none is open is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AuthoringError::file_system(&self.path, source)),
        }
    }
}
