//! Builder for creating and configuring authoring sessions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AuthoringSession, SessionState};
use crate::api::TravelApi;
use crate::document::ItineraryDocument;
use crate::error::Result;
use crate::library::Library;
use crate::params::NewItinerary;
use crate::scratch::PackageScratch;

/// Builder for creating and configuring authoring sessions.
pub struct SessionBuilder {
    api: Arc<dyn TravelApi>,
    scratch_path: Option<PathBuf>,
}

impl SessionBuilder {
    /// Creates a new builder over a backend.
    pub fn new(api: Arc<dyn TravelApi>) -> Self {
        Self {
            api,
            scratch_path: None,
        }
    }

    /// Sets a custom package scratch file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_STATE_HOME/jaunt/package-scratch.json`.
    pub fn with_scratch_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.scratch_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Starts a session on a brand-new draft itinerary.
    pub fn start(self, params: NewItinerary) -> Result<AuthoringSession> {
        let scratch = self.scratch()?;
        Ok(AuthoringSession {
            api: self.api,
            document: ItineraryDocument::new(params),
            library: Library::new(),
            pending_package: None,
            linked_package: None,
            scratch,
        })
    }

    /// Opens a session on an itinerary fetched from the backend.
    ///
    /// The itinerary's canonical package (the first package pointing at it,
    /// if any) is loaded alongside, so later saves update it in place.
    pub async fn open(self, id: u64) -> Result<AuthoringSession> {
        let scratch = self.scratch()?;
        let itinerary = self.api.get_itinerary(id).await?;
        let linked_package = self
            .api
            .list_packages()
            .await?
            .into_iter()
            .find(|package| package.itinerary_id == Some(id));
        Ok(AuthoringSession {
            api: self.api,
            document: ItineraryDocument::from_remote(itinerary),
            library: Library::new(),
            pending_package: None,
            linked_package,
            scratch,
        })
    }

    /// Resumes a session from a persisted snapshot.
    pub fn resume(self, state: SessionState) -> Result<AuthoringSession> {
        let scratch = self.scratch()?;
        Ok(AuthoringSession {
            api: self.api,
            document: state.document,
            library: state.library,
            pending_package: state.pending_package,
            linked_package: state.linked_package,
            scratch,
        })
    }

    fn scratch(&self) -> Result<PackageScratch> {
        match &self.scratch_path {
            Some(path) => Ok(PackageScratch::at(path)),
            None => PackageScratch::open_default(),
        }
    }
}
