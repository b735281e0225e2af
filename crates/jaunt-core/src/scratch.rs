//! Scratch cache for in-progress package form data.
//!
//! Package form data survives outside the session proper, in a small state
//! file, so a half-filled form is not lost when the author wanders off
//! before saving. The cache has exactly three operations: save, load, and
//! clear. A successful save of the package clears it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AuthoringError, Result};
use crate::params::PackageForm;

/// File-backed cache holding at most one staged package form.
#[derive(Debug, Clone)]
pub struct PackageScratch {
    path: PathBuf,
}

impl PackageScratch {
    /// Uses the given file as the cache.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the cache at its default XDG state location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Returns the default cache path following the XDG Base Directory
    /// specification.
    fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("jaunt")
            .place_state_file("package-scratch.json")
            .map_err(|e| AuthoringError::XdgDirectory(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Caches the given form, replacing any previous one.
    pub fn save(&self, form: &PackageForm) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(form)?;
        fs::write(&self.path, bytes)
            .map_err(|source| AuthoringError::file_system(&self.path, source))
    }

    /// Loads the cached form, if one exists.
    pub fn load(&self) -> Result<Option<PackageForm>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(AuthoringError::file_system(&self.path, source)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Drops the cached form. Clearing an empty cache is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AuthoringError::file_system(&self.path, source)),
        }
    }
}
