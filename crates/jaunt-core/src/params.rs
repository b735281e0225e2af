//! Parameter structures for authoring operations.
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI today, other front ends later) without
//! framework-specific derives or dependencies. Interface layers define their
//! own wrapper types (clap arg structs, form bindings) and convert into these
//! via `From` impls, so the session API stays free of UI concerns.
//!
//! All structures serialize with serde because staged form data is persisted
//! between invocations (the package scratch file, the session file).

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{EventDetails, EventKind, PriceType};

/// Parameters for starting a brand-new itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItinerary {
    /// Title of the itinerary (required)
    pub title: String,
    /// Optional cover image reference
    pub cover_image: Option<String>,
}

/// Form data for creating or editing a single event.
///
/// The same shape serves both paths: a create appends a new event under a
/// fresh ID, an edit replaces the addressed event's content in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventForm {
    /// Short label shown in day listings (required)
    pub title: String,
    /// Long-form notes
    pub notes: Option<String>,
    /// Category tag plus category-specific attributes
    pub details: EventDetails,
    /// Schedule marker (check in, departure, ...)
    pub kind: Option<EventKind>,
    /// Free-form refinement of the category
    pub sub_category: Option<String>,
    /// Start time as entered, e.g. "14:00"
    pub time: Option<String>,
    pub duration: Option<String>,
    pub timezone: Option<String>,
    pub booking_reference: Option<String>,
    pub booked_through: Option<String>,
    /// Booked price amount, in `currency`
    pub amount: Option<f64>,
    pub currency: Option<String>,
    /// Image references to attach
    #[serde(default)]
    pub images: Vec<String>,
}

impl EventForm {
    /// Rebuilds form data from an existing event, for edit flows that
    /// override a subset of fields.
    pub fn from_event(event: &crate::models::Event) -> Self {
        Self {
            title: event.title.clone(),
            notes: Some(event.notes.clone()),
            details: event.details.clone(),
            kind: event.kind,
            sub_category: event.sub_category.clone(),
            time: event.time.clone(),
            duration: event.duration.clone(),
            timezone: event.timezone.clone(),
            booking_reference: event.booking_reference.clone(),
            booked_through: event.booked_through.clone(),
            amount: event.amount,
            currency: event.currency.clone(),
            images: event.images.clone(),
        }
    }
}

/// Parameters for saving an event into the selected day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveEvent {
    /// The event content
    pub form: EventForm,
    /// When set, the ID of the existing event to replace in place
    pub editing: Option<u64>,
}

/// Form data for the itinerary's sales package.
///
/// Everything is optional in spirit: fields left blank are backfilled with
/// placeholders when the package is persisted, so a save never stalls on an
/// incomplete form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageForm {
    /// Departure location
    #[serde(default)]
    pub start_location: String,
    /// Offer expiry date; defaults to tomorrow when unset
    pub valid_till: Option<Date>,
    /// Description text, stored as the package's first description block
    pub description: Option<String>,
    /// Price amount
    #[serde(default)]
    pub price: f64,
    /// Whether the price is per person or for the whole group
    #[serde(default)]
    pub price_type: PriceType,
    /// Group size the price applies to
    pub people: Option<u32>,
    /// Covered locations
    #[serde(default)]
    pub locations: Vec<String>,
    /// What the price includes
    #[serde(default)]
    pub inclusions: Vec<String>,
    /// What the price excludes
    #[serde(default)]
    pub exclusions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    #[test]
    fn test_event_form_round_trips_through_event() {
        let form = EventForm {
            title: "Ferry".to_string(),
            notes: Some("Jetty 4".to_string()),
            details: EventDetails::Transport {
                carrier: Some("Goa Ferries".to_string()),
                number: Some("F-12".to_string()),
            },
            ..Default::default()
        };
        let event = Event::from_form(9, form.clone());
        let rebuilt = EventForm::from_event(&event);
        assert_eq!(rebuilt.title, form.title);
        assert_eq!(rebuilt.notes.as_deref(), Some("Jetty 4"));
        assert_eq!(rebuilt.details, form.details);
    }

    #[test]
    fn test_package_form_serde_defaults() {
        let form: PackageForm = serde_json::from_str(r#"{"price": 150.0}"#).unwrap();
        assert_eq!(form.price, 150.0);
        assert_eq!(form.price_type, PriceType::PerPerson);
        assert!(form.start_location.is_empty());
        assert!(form.locations.is_empty());
    }
}
