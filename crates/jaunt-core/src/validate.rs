//! Pre-save validation and the content size guard.
//!
//! Saving is refused client-side before any network traffic happens, so a
//! paste of an enormous image or an empty title never reaches the backend.
//! The same checks run for draft saves and publishes; publishing adds the
//! requirement that there is something to show.

use crate::error::{AuthoringError, Result};
use crate::images;
use crate::models::{Itinerary, ItineraryContent, MAX_EVENT_IMAGES};

/// Ceiling on the serialized size of itinerary content, in bytes.
pub const MAX_CONTENT_BYTES: u64 = 10 * 1024 * 1024;

/// Ceiling on a cover image stored inline as a data URI, in bytes.
pub const MAX_INLINE_COVER_BYTES: u64 = 60 * 1024;

/// Measures the serialized size of itinerary content.
///
/// This is the exact byte count the backend would receive for the `content`
/// field; serialization is deterministic, so the measurement is stable for
/// unchanged content.
pub fn content_size(content: &ItineraryContent) -> Result<u64> {
    Ok(serde_json::to_vec(content)?.len() as u64)
}

/// Validates an itinerary for a draft save.
///
/// Checks the title, the inline cover image, the per-event image limit, and
/// the content size ceiling. Returns the measured content size on success so
/// callers can report it.
pub fn for_save(itinerary: &Itinerary) -> Result<u64> {
    check_title(itinerary)?;
    check_cover(itinerary)?;
    check_images(itinerary)?;
    check_size(itinerary)
}

/// Validates an itinerary for publishing.
///
/// Everything a draft save checks, plus the itinerary must have at least one
/// day holding at least one event.
pub fn for_publish(itinerary: &Itinerary) -> Result<u64> {
    let size = for_save(itinerary)?;
    if !itinerary.has_content() {
        return Err(AuthoringError::validation("content").with_reason(
            "an itinerary needs at least one day with at least one event before it can be published",
        ));
    }
    Ok(size)
}

fn check_title(itinerary: &Itinerary) -> Result<()> {
    if itinerary.title.trim().is_empty() {
        return Err(AuthoringError::validation("title").with_reason("cannot be empty"));
    }
    Ok(())
}

fn check_cover(itinerary: &Itinerary) -> Result<()> {
    if let Some(cover) = &itinerary.cover_image {
        if images::is_data_uri(cover) {
            let size_bytes = cover.len() as u64;
            if size_bytes > MAX_INLINE_COVER_BYTES {
                return Err(AuthoringError::CoverImageTooLarge {
                    size_bytes,
                    limit_bytes: MAX_INLINE_COVER_BYTES,
                });
            }
        }
    }
    Ok(())
}

// Mutations already refuse a sixth image; this catches content that arrived
// through deserialization instead.
fn check_images(itinerary: &Itinerary) -> Result<()> {
    for day in &itinerary.content.days {
        for event in &day.events {
            if event.images.len() > MAX_EVENT_IMAGES {
                return Err(AuthoringError::TooManyImages {
                    limit: MAX_EVENT_IMAGES,
                });
            }
        }
    }
    Ok(())
}

fn check_size(itinerary: &Itinerary) -> Result<u64> {
    let size_bytes = content_size(&itinerary.content)?;
    // Content sitting exactly on the ceiling still saves.
    if size_bytes > MAX_CONTENT_BYTES {
        return Err(AuthoringError::ContentTooLarge {
            size_bytes,
            limit_bytes: MAX_CONTENT_BYTES,
        });
    }
    Ok(size_bytes)
}
