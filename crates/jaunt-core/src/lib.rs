//! Core library for the Jaunt itinerary authoring application.
//!
//! This crate provides the client-side business logic for building travel
//! itineraries: the document model, validation, the authoring session with
//! its draft/publish lifecycle, the reusable event library, and the API
//! surface spoken to the backend.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, author view vs. shared view, etc.)
//! while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jaunt_core::{
//!     api::InMemoryApi,
//!     params::NewItinerary,
//!     session::{SaveMode, SessionBuilder},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Start authoring a new itinerary against an in-memory backend
//! let api = Arc::new(InMemoryApi::default());
//! let mut session = SessionBuilder::new(api)
//!     .with_scratch_path(Some("package-scratch.json"))
//!     .start(NewItinerary {
//!         title: "Goa Trip".to_string(),
//!         cover_image: None,
//!     })?;
//!
//! // Lay out the first day and persist a draft
//! session.add_day();
//! let report = session.save(SaveMode::Draft).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod display;
pub mod document;
pub mod error;
pub mod images;
pub mod library;
pub mod models;
pub mod params;
pub mod scratch;
pub mod session;
pub mod validate;
pub mod viewer;

// Re-export commonly used types
pub use api::{HttpApi, InMemoryApi, TravelApi};
pub use auth::TokenStore;
pub use display::{DeleteResult, ItinerarySummaries, LibraryItems, LocalDateTime, UploadResult};
pub use document::ItineraryDocument;
pub use error::{AuthoringError, Result};
pub use library::Library;
pub use models::{
    CompanyDetails, Day, Event, EventCategory, EventDetails, EventKind, Itinerary,
    ItinerarySummary, LibraryItem, Package, Visibility,
};
pub use params::{EventForm, NewItinerary, PackageForm, SaveEvent};
pub use scratch::PackageScratch;
pub use session::{AuthoringSession, SaveMode, SavePhase, SaveReport, SessionBuilder, SessionState};
pub use validate::{MAX_CONTENT_BYTES, MAX_INLINE_COVER_BYTES};
pub use viewer::SharedView;
