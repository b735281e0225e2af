//! The itinerary resource and its day-by-day content tree.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::event::Event;
use super::status::Visibility;

/// One day of an itinerary, holding an ordered list of events.
///
/// Days live inside itinerary content and use the content wire format
/// (camelCase keys, client-generated numeric IDs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Client-generated identifier, unique within the document
    pub id: u64,
    /// Display title, "Day N" by default
    pub title: String,
    /// Calendar date, distinct from having no date at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Events in authoring order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Day {
    /// Creates an empty day numbered `position` (1-based).
    pub fn numbered(id: u64, position: usize) -> Self {
        Self {
            id,
            title: format!("Day {position}"),
            date: None,
            events: Vec::new(),
        }
    }

    /// Finds an event by ID.
    pub fn find_event(&self, event_id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }
}

/// The structured content document of an itinerary.
///
/// This is the piece that round-trips through the backend as one JSON blob
/// and whose serialized size is capped before every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryContent {
    #[serde(default)]
    pub days: Vec<Day>,
}

impl ItineraryContent {
    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}

/// A travel itinerary as the backend stores it.
///
/// Resource-level fields use the API's snake_case naming; everything under
/// `content` uses the content wire format instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Server-assigned identifier, absent until the first successful save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Owning user, assigned server-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Itinerary title
    pub title: String,
    /// Day-by-day content tree
    #[serde(default)]
    pub content: ItineraryContent,
    /// Cover image reference (storage path, URL, or small data URI)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Publication state, `is_published` on the wire
    #[serde(rename = "is_published", default)]
    pub visibility: Visibility,
    /// Opaque share token, minted server-side on first save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Itinerary {
    /// Creates a new unsaved draft itinerary.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: None,
            title: title.into(),
            content: ItineraryContent::default(),
            cover_image: None,
            visibility: Visibility::Draft,
            share_uuid: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Number of days in the itinerary.
    pub fn day_count(&self) -> usize {
        self.content.days.len()
    }

    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.content.event_count()
    }

    /// True when at least one day holds at least one event.
    pub fn has_content(&self) -> bool {
        self.content.days.iter().any(|d| !d.events.is_empty())
    }

    /// Finds a day by ID.
    pub fn find_day(&self, day_id: u64) -> Option<&Day> {
        self.content.days.iter().find(|d| d.id == day_id)
    }

    /// Finds a day by ID, mutable.
    pub fn find_day_mut(&mut self, day_id: u64) -> Option<&mut Day> {
        self.content.days.iter_mut().find(|d| d.id == day_id)
    }

    /// Finds an event anywhere in the itinerary, with its owning day.
    pub fn find_event(&self, event_id: u64) -> Option<(&Day, &Event)> {
        self.content.days.iter().find_map(|day| {
            day.find_event(event_id).map(|event| (day, event))
        })
    }
}
