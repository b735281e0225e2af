//! The save flow: one itinerary write, then one package write.

use std::fmt;

use log::debug;

use super::AuthoringSession;
use crate::error::{AuthoringError, Result};
use crate::models::{Itinerary, Package, Visibility};
use crate::validate;

/// Whether a save keeps the current visibility or forces publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Persist as-is. Never changes the publication state.
    Draft,
    /// Persist and publish. One-way: there is no unpublish.
    Publish,
}

impl SaveMode {
    /// True when this save forces publication.
    pub fn publishes(&self) -> bool {
        matches!(self, Self::Publish)
    }
}

/// The ordered phases of a save, for logging and failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    Validate,
    Itinerary,
    Package,
    Finalize,
}

impl fmt::Display for SavePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::Itinerary => "itinerary",
            Self::Package => "package",
            Self::Finalize => "finalize",
        };
        write!(f, "{name}")
    }
}

/// What a completed save persisted.
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// The itinerary as the server now stores it
    pub itinerary: Itinerary,
    /// The package as the server now stores it
    pub package: Package,
    pub mode: SaveMode,
    /// Serialized content size that passed validation, in bytes
    pub content_bytes: u64,
}

impl AuthoringSession {
    /// Persists the itinerary and its package.
    ///
    /// The flow runs in fixed phases:
    ///
    /// 1. Validate locally; nothing touches the network on failure.
    /// 2. Upsert the itinerary (update when it has an ID, create otherwise)
    ///    and record the server-assigned identity in the document.
    /// 3. Persist the package: update the linked one, create one from the
    ///    staged form, or synthesize a placeholder package.
    /// 4. Clear the package scratch cache (best-effort).
    ///
    /// A failure in phase 3 comes back as
    /// [`AuthoringError::PackagePersist`] carrying the itinerary's ID: the
    /// itinerary is saved, the package is not. The staged form stays put in
    /// that case, and because the document now knows its server ID, saving
    /// again retries the package without duplicating the itinerary.
    pub async fn save(&mut self, mode: SaveMode) -> Result<SaveReport> {
        debug!("save phase: {}", SavePhase::Validate);
        let content_bytes = if mode.publishes() {
            validate::for_publish(self.document.itinerary())?
        } else {
            validate::for_save(self.document.itinerary())?
        };

        debug!("save phase: {}", SavePhase::Itinerary);
        let mut payload = self.document.itinerary().clone();
        if mode.publishes() {
            payload.visibility = Visibility::Published;
        }
        let saved = self.api.save_itinerary(&payload).await?;
        self.document.record_remote_identity(&saved);
        let itinerary_id = saved.id.ok_or_else(|| AuthoringError::Api {
            message: "server returned an itinerary without an id".to_string(),
        })?;

        debug!("save phase: {}", SavePhase::Package);
        let package = self
            .persist_package(&saved, mode.publishes())
            .await
            .map_err(|source| AuthoringError::package_persist(itinerary_id, source))?;

        debug!("save phase: {}", SavePhase::Finalize);
        if let Err(e) = self.scratch.clear() {
            log::warn!("could not clear package scratch cache: {e}");
        }

        Ok(SaveReport {
            itinerary: saved,
            package,
            mode,
            content_bytes,
        })
    }

    /// Persists the package that belongs to the just-saved itinerary.
    ///
    /// Exactly one write happens here. Which one depends on what the
    /// session knows: a linked package is updated (with any staged form
    /// applied on top), a staged form becomes a new package, and with
    /// neither a placeholder package is created so the itinerary never
    /// goes without one.
    async fn persist_package(&mut self, itinerary: &Itinerary, publish: bool) -> Result<Package> {
        let mut package = match (&self.linked_package, &self.pending_package) {
            (Some(linked), staged) => {
                let mut package = linked.clone();
                if let Some(form) = staged {
                    package.apply_form(form);
                }
                package
            }
            (None, Some(form)) => Package::from_form(form, itinerary),
            (None, None) => Package::default_for(itinerary),
        };
        package.sync_with(itinerary);
        if publish {
            package.visibility = Visibility::Published;
        }

        let saved = match package.id {
            Some(id) => self.api.update_package(id, &package).await?,
            None => self.api.create_package(&package).await?,
        };

        // Only a successful write consumes the staged form.
        self.pending_package = None;
        self.linked_package = Some(saved.clone());
        Ok(saved)
    }
}
