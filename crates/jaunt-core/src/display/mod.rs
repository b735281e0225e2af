//! Display formatting for terminal output.
//!
//! This module combines direct `Display` implementations on domain models
//! with newtype wrappers for collections and operation results, so every
//! output context renders through the same formatting logic.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types & │    │   Formatted     │
//! │ (Itinerary, …)  │───▶│  Result Types   │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (ItinerarySummaries, LibraryItems)
//! - [`results`]: Operation result types (DeleteResult, UploadResult)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! All formatters produce markdown-ish text: `#`/`##` headers, bullet lists
//! for attributes, and explicit empty-state lines for collections.
//!
//! ## Usage
//!
//! ```rust
//! use jaunt_core::display::ItinerarySummaries;
//!
//! let summaries = ItinerarySummaries::new(vec![]);
//! assert_eq!(format!("{summaries}"), "No itineraries found.\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

// Re-export commonly used types for convenience
pub use collections::{ItinerarySummaries, LibraryItems};
pub use datetime::{LocalDateTime, ShortDate};
pub use results::{DeleteResult, UploadResult};
