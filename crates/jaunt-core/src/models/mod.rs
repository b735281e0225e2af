//! Data models for itineraries, packages, and the session library.
//!
//! Two wire formats meet here. Resource-level fields (`is_published`,
//! `share_uuid`, `cover_image`) follow the API's snake_case naming, while
//! everything inside itinerary content (`days`, `events`) uses camelCase
//! keys with client-generated numeric IDs. The serde attributes on each
//! type pin those formats down so the round trip through the backend is
//! byte-stable.

mod company;
mod event;
mod itinerary;
mod library;
mod package;
mod status;
mod summary;

#[cfg(test)]
mod tests;

pub use company::CompanyDetails;
pub use event::{Event, EventCategory, EventDetails, EventKind, MAX_EVENT_IMAGES};
pub use itinerary::{Day, Itinerary, ItineraryContent};
pub use library::{LibraryItem, LibraryItemKind};
pub use package::{DescriptionBlock, Package, PriceType, PLACEHOLDER};
pub use status::Visibility;
pub use summary::ItinerarySummary;
