//! Display implementations for operation result types.
//!
//! Wraps the outcomes of save, delete, and upload operations in types that
//! render one-line confirmations followed by the details a caller needs to
//! continue working, such as server-assigned IDs and share tokens.

use std::fmt;

use crate::models::Itinerary;
use crate::session::{SaveMode, SaveReport};

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.itinerary.id.unwrap_or_default();
        match self.mode {
            SaveMode::Draft => writeln!(f, "Saved draft '{}' (ID: {})", self.itinerary.title, id)?,
            SaveMode::Publish => writeln!(
                f,
                "Published itinerary '{}' (ID: {})",
                self.itinerary.title, id
            )?,
        }
        writeln!(
            f,
            "- Content size: {:.2} MB",
            self.content_bytes as f64 / (1024.0 * 1024.0)
        )?;
        if let Some(package_id) = self.package.id {
            writeln!(
                f,
                "- Package: '{}' (ID: {})",
                self.package.title, package_id
            )?;
        }
        if let Some(share_uuid) = &self.itinerary.share_uuid {
            if self.itinerary.visibility.is_published() {
                writeln!(f, "- Share token: {share_uuid}")?;
            }
        }
        Ok(())
    }
}

/// A generic wrapper for deletion results that provides formatted output.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Itinerary> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resource.id {
            Some(id) => writeln!(
                f,
                "Deleted itinerary '{}' (ID: {})",
                self.resource.title, id
            ),
            None => writeln!(f, "Deleted itinerary '{}'", self.resource.title),
        }
    }
}

/// The stored path of a successfully uploaded image.
pub struct UploadResult(pub String);

impl fmt::Display for UploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Uploaded image: {}", self.0)
    }
}
