//! Content operations on the open session: days, events, library, package.

use jiff::civil::Date;
use log::warn;

use super::AuthoringSession;
use crate::error::{AuthoringError, Result};
use crate::images;
use crate::models::{Day, Event, LibraryItem, MAX_EVENT_IMAGES};
use crate::params::{PackageForm, SaveEvent};

impl AuthoringSession {
    /// Sets the itinerary title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.set_title(title);
    }

    /// Sets or clears the cover image reference.
    pub fn set_cover_image(&mut self, cover_image: Option<String>) {
        self.document.set_cover_image(cover_image);
    }

    /// Appends a new auto-titled day and selects it. Returns the day's ID.
    pub fn add_day(&mut self) -> u64 {
        self.document.add_day()
    }

    /// Selects the day future event operations target.
    pub fn select_day(&mut self, day_id: u64) -> Result<()> {
        self.document.select_day(day_id)
    }

    /// Renames a day. Returns false when no day has that ID.
    pub fn set_day_title(&mut self, day_id: u64, title: impl Into<String>) -> bool {
        self.document.set_day_title(day_id, title)
    }

    /// Sets or clears a day's date. Returns false when no day has that ID.
    pub fn set_day_date(&mut self, day_id: u64, date: Option<Date>) -> bool {
        self.document.set_day_date(day_id, date)
    }

    /// Removes a day with all its events and releases their uploaded images.
    ///
    /// Image deletion is best-effort: the day is gone from the document
    /// either way, and failures are only logged. Orphaned files on the
    /// server are preferable to a day that refuses to go away.
    pub async fn remove_day(&mut self, day_id: u64) -> Result<Day> {
        let removed = self.document.remove_day(day_id)?;
        for event in &removed.events {
            self.release_images(event).await;
        }
        Ok(removed)
    }

    /// Creates or edits an event in the selected day, returning its ID.
    pub fn save_event(&mut self, params: SaveEvent) -> Result<u64> {
        self.document.save_event(params)
    }

    /// Removes an event and releases its uploaded images (best-effort).
    pub async fn remove_event(&mut self, event_id: u64) -> Result<Event> {
        let removed = self.document.remove_event(event_id)?;
        self.release_images(&removed).await;
        Ok(removed)
    }

    /// Uploads an image and attaches its storage path to an event.
    ///
    /// The per-event image limit is checked before any bytes leave the
    /// machine, so a full event never causes a stray upload.
    ///
    /// # Arguments
    ///
    /// * `event_id` - Event to attach the image to
    /// * `filename` - Client-side filename, used for the upload
    /// * `bytes` - Raw image bytes
    ///
    /// # Returns
    ///
    /// The storage path the backend assigned, already attached to the event.
    pub async fn attach_image(
        &mut self,
        event_id: u64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let (_, event) = self
            .document
            .find_event(event_id)
            .ok_or(AuthoringError::EventNotFound { id: event_id })?;
        if event.images.len() >= MAX_EVENT_IMAGES {
            return Err(AuthoringError::TooManyImages {
                limit: MAX_EVENT_IMAGES,
            });
        }
        let path = self.api.upload_image(filename, bytes).await?;
        self.document.add_image(event_id, path.clone())?;
        Ok(path)
    }

    /// Detaches the image at `index` from an event and releases the
    /// uploaded file (best-effort).
    pub async fn detach_image(&mut self, event_id: u64, index: usize) -> Result<String> {
        let reference = self.document.remove_image(event_id, index)?;
        self.release_reference(&reference).await;
        Ok(reference)
    }

    /// Copies an event into the session library, returning the item's ID.
    ///
    /// The library receives a detached copy; the source event is only
    /// marked as being in the library. Later edits to either side do not
    /// affect the other.
    pub fn add_to_library(&mut self, event_id: u64) -> Result<u64> {
        let (_, event) = self
            .document
            .find_event(event_id)
            .ok_or(AuthoringError::EventNotFound { id: event_id })?;
        let event = event.clone();
        let item = LibraryItem::from_event(self.document.allocate_id(), &event);
        let item_id = self.library.add(item);
        self.document.mark_in_library(event_id, true);
        Ok(item_id)
    }

    /// Materializes a library item as a fresh event in the selected day,
    /// returning the new event's ID.
    pub fn copy_from_library(&mut self, item_id: u64) -> Result<u64> {
        let item = self
            .library
            .get(item_id)
            .ok_or(AuthoringError::LibraryItemNotFound { id: item_id })?;
        let event = item.to_event(self.document.allocate_id());
        self.document.append_event(event)
    }

    /// Removes an item from the session library, returning it.
    pub fn remove_from_library(&mut self, item_id: u64) -> Result<LibraryItem> {
        self.library.remove(item_id)
    }

    /// Stages package form data for the next save.
    ///
    /// The form is also cached in the scratch file so a half-filled form
    /// survives the session going away. Cache failures are logged and
    /// swallowed; staging always succeeds.
    pub fn stage_package(&mut self, form: PackageForm) {
        if let Err(e) = self.scratch.save(&form) {
            warn!("could not cache package form: {e}");
        }
        self.pending_package = Some(form);
    }

    /// Restores package form data from the scratch cache, if the session
    /// has nothing staged yet. Returns true when something was restored.
    pub fn restore_cached_package(&mut self) -> bool {
        if self.pending_package.is_some() {
            return false;
        }
        match self.scratch.load() {
            Ok(Some(form)) => {
                self.pending_package = Some(form);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("could not read cached package form: {e}");
                false
            }
        }
    }

    /// Deletes uploaded files referenced by an event, logging failures.
    async fn release_images(&self, event: &Event) {
        for reference in &event.images {
            self.release_reference(reference).await;
        }
    }

    async fn release_reference(&self, reference: &str) {
        if let Some(name) = images::filename(reference) {
            if let Err(e) = self.api.delete_image(name).await {
                warn!("could not delete image '{name}': {e}");
            }
        }
    }
}
