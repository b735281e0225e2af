//! High-level authoring session API.
//!
//! This module provides the main [`AuthoringSession`] interface for editing
//! and persisting one itinerary. The session acts as the coordinator between
//! the in-memory document, the session library, the staged package form, and
//! the backend API.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │    Authoring    │    │   Save flow      │    │    Backend      │
//! │ (days, events,  │───▶│ (validate, then  │───▶│  (via TravelApi)│
//! │  library, form) │    │  itinerary+pkg)  │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//!    Pure in-memory         Orchestration           REST or test
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`AuthoringSession`] instances
//! - [`authoring`]: Content operations (days, events, library, package form)
//! - [`save`]: The save flow that persists the itinerary and its package
//!
//! Content edits are pure and instantaneous; nothing touches the network
//! until [`AuthoringSession::save`] runs. The only exceptions are image
//! operations, which upload and release files as they happen.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use jaunt_core::api::HttpApi;
//! use jaunt_core::params::NewItinerary;
//! use jaunt_core::session::{SaveMode, SessionBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(HttpApi::new("http://localhost:8000", None)?);
//! let mut session = SessionBuilder::new(api).start(NewItinerary {
//!     title: "Goa Trip".to_string(),
//!     cover_image: None,
//! })?;
//!
//! session.add_day();
//! let report = session.save(SaveMode::Draft).await?;
//! println!("saved as #{:?}", report.itinerary.id);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::TravelApi;
use crate::document::ItineraryDocument;
use crate::library::Library;
use crate::models::{ItinerarySummary, Package};
use crate::params::PackageForm;
use crate::scratch::PackageScratch;

pub mod authoring;
pub mod builder;
pub mod save;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use save::{SaveMode, SavePhase, SaveReport};

/// Everything a session needs to survive between runs.
///
/// Front ends persist this between invocations and hand it back to
/// [`SessionBuilder::resume`]. The library and the staged package form live
/// here and nowhere else, so closing a session without saving drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub document: ItineraryDocument,
    #[serde(default)]
    pub library: Library,
    #[serde(default)]
    pub pending_package: Option<PackageForm>,
    #[serde(default)]
    pub linked_package: Option<Package>,
}

/// One itinerary under edit, with its library, staged package, and backend.
pub struct AuthoringSession {
    pub(crate) api: Arc<dyn TravelApi>,
    pub(crate) document: ItineraryDocument,
    pub(crate) library: Library,
    /// Staged package form, waiting for the next save
    pub(crate) pending_package: Option<PackageForm>,
    /// The itinerary's persisted package, once known
    pub(crate) linked_package: Option<Package>,
    pub(crate) scratch: PackageScratch,
}

impl AuthoringSession {
    /// The document under edit.
    pub fn document(&self) -> &ItineraryDocument {
        &self.document
    }

    /// The session library.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Staged package form data, if any.
    pub fn pending_package(&self) -> Option<&PackageForm> {
        self.pending_package.as_ref()
    }

    /// The itinerary's persisted package, once a save has established it.
    pub fn linked_package(&self) -> Option<&Package> {
        self.linked_package.as_ref()
    }

    /// Compact listing row for the open itinerary.
    pub fn summary(&self) -> ItinerarySummary {
        self.document.summary()
    }

    /// Snapshot of the persistable session parts.
    pub fn state(&self) -> SessionState {
        SessionState {
            document: self.document.clone(),
            library: self.library.clone(),
            pending_package: self.pending_package.clone(),
            linked_package: self.linked_package.clone(),
        }
    }
}
