//! Reusable event templates kept in the session library.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventCategory, EventDetails};

/// What a library item was copied from. Only events are supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryItemKind {
    Event,
}

/// A reusable copy of an event, detached from any day.
///
/// Library items keep only the shareable core of an event: title, notes,
/// category, sub-category, and images. Attribute details and schedule fields
/// stay behind, so a copy pasted into a day starts clean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    /// Client-generated identifier, unique within the session
    pub id: u64,
    pub title: String,
    /// Notes text copied from the source event
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: LibraryItemKind,
    pub category: EventCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl LibraryItem {
    /// Copies the shareable core of an event into a new library item.
    pub fn from_event(id: u64, event: &Event) -> Self {
        Self {
            id,
            title: event.title.clone(),
            content: event.notes.clone(),
            kind: LibraryItemKind::Event,
            category: event.category(),
            sub_category: event.sub_category.clone(),
            images: event.images.clone(),
        }
    }

    /// Materializes this item as a fresh event under a new ID.
    pub fn to_event(&self, id: u64) -> Event {
        Event {
            id,
            title: self.title.clone(),
            details: EventDetails::empty_for(self.category),
            kind: None,
            sub_category: self.sub_category.clone(),
            notes: self.content.clone(),
            time: None,
            duration: None,
            timezone: None,
            booking_reference: None,
            booked_through: None,
            amount: None,
            currency: None,
            images: self.images.clone(),
            in_library: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EventForm;

    fn source_event() -> Event {
        let mut event = Event::from_form(
            10,
            EventForm {
                title: "Spice farm tour".to_string(),
                notes: Some("Book a guide".to_string()),
                details: EventDetails::Activity { provider: None },
                sub_category: Some("Outdoors".to_string()),
                images: vec!["farm.jpg".to_string()],
                ..Default::default()
            },
        );
        event.time = Some("10:00".to_string());
        event
    }

    #[test]
    fn test_from_event_copies_core_fields() {
        let item = LibraryItem::from_event(99, &source_event());
        assert_eq!(item.id, 99);
        assert_eq!(item.title, "Spice farm tour");
        assert_eq!(item.content, "Book a guide");
        assert_eq!(item.category, EventCategory::Activity);
        assert_eq!(item.sub_category.as_deref(), Some("Outdoors"));
        assert_eq!(item.images, vec!["farm.jpg".to_string()]);
    }

    #[test]
    fn test_to_event_is_a_fresh_copy() {
        let item = LibraryItem::from_event(99, &source_event());
        let copy = item.to_event(123);
        assert_eq!(copy.id, 123);
        assert_eq!(copy.title, "Spice farm tour");
        assert_eq!(copy.notes, "Book a guide");
        // Schedule details never travel through the library.
        assert!(copy.time.is_none());
        assert!(!copy.in_library);
    }

    #[test]
    fn test_wire_format() {
        let item = LibraryItem::from_event(99, &source_event());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["category"], "Activity");
        assert_eq!(value["subCategory"], "Outdoors");
    }
}
