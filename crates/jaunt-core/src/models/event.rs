//! Events and their category-specific detail payloads.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AuthoringError, Result};
use crate::params::EventForm;

/// Maximum number of images a single event may hold.
pub const MAX_EVENT_IMAGES: usize = 5;

/// The six closed event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Info,
    Hotel,
    Activity,
    Flights,
    Transport,
    Cruise,
}

impl EventCategory {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Hotel => "Hotel",
            Self::Activity => "Activity",
            Self::Flights => "Flights",
            Self::Transport => "Transport",
            Self::Cruise => "Cruise",
        }
    }

    /// Returns the category name with a display icon.
    pub fn with_icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ Info",
            Self::Hotel => "⌂ Hotel",
            Self::Activity => "★ Activity",
            Self::Flights => "✈ Flights",
            Self::Transport => "⇄ Transport",
            Self::Cruise => "⚓ Cruise",
        }
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "hotel" => Ok(Self::Hotel),
            "activity" => Ok(Self::Activity),
            "flights" | "flight" => Ok(Self::Flights),
            "transport" => Ok(Self::Transport),
            "cruise" => Ok(Self::Cruise),
            _ => Err(format!("Invalid event category: {s}")),
        }
    }
}

/// Schedule marker attached to travel-leg events.
///
/// The wire values carry spaces ("Check In", "Check Out"), matching what the
/// backend stores inside itinerary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Check In")]
    CheckIn,
    #[serde(rename = "Check Out")]
    CheckOut,
    Departure,
    Arrival,
}

impl EventKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "Check In",
            Self::CheckOut => "Check Out",
            Self::Departure => "Departure",
            Self::Arrival => "Arrival",
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "check in" | "checkin" => Ok(Self::CheckIn),
            "check out" | "checkout" => Ok(Self::CheckOut),
            "departure" => Ok(Self::Departure),
            "arrival" => Ok(Self::Arrival),
            _ => Err(format!("Invalid event kind: {s}")),
        }
    }
}

/// Category-specific attributes of an event.
///
/// Serialized inline with the event under a `category` tag, so a hotel event
/// reads `{"category": "Hotel", "roomType": ...}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all_fields = "camelCase")]
pub enum EventDetails {
    #[default]
    Info,
    Hotel {
        #[serde(skip_serializing_if = "Option::is_none")]
        room_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bed_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hotel_type: Option<String>,
    },
    Activity {
        #[serde(skip_serializing_if = "Option::is_none")]
        provider: Option<String>,
    },
    Flights {
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        airline: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        terminal: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gate: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        flight_number: Option<String>,
    },
    Transport {
        #[serde(skip_serializing_if = "Option::is_none")]
        carrier: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        number: Option<String>,
    },
    Cruise {
        #[serde(skip_serializing_if = "Option::is_none")]
        cabin_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cabin_number: Option<String>,
    },
}

impl EventDetails {
    /// Returns the category tag of this detail payload.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Info => EventCategory::Info,
            Self::Hotel { .. } => EventCategory::Hotel,
            Self::Activity { .. } => EventCategory::Activity,
            Self::Flights { .. } => EventCategory::Flights,
            Self::Transport { .. } => EventCategory::Transport,
            Self::Cruise { .. } => EventCategory::Cruise,
        }
    }

    /// Returns an empty payload for the given category.
    ///
    /// Used when copying a library item back into a day: the library keeps
    /// only the category, not the attribute values.
    pub fn empty_for(category: EventCategory) -> Self {
        match category {
            EventCategory::Info => Self::Info,
            EventCategory::Hotel => Self::Hotel {
                room_type: None,
                bed_type: None,
                hotel_type: None,
            },
            EventCategory::Activity => Self::Activity { provider: None },
            EventCategory::Flights => Self::Flights {
                from: None,
                to: None,
                airline: None,
                terminal: None,
                gate: None,
                flight_number: None,
            },
            EventCategory::Transport => Self::Transport {
                carrier: None,
                number: None,
            },
            EventCategory::Cruise => Self::Cruise {
                cabin_type: None,
                cabin_number: None,
            },
        }
    }
}

/// A single scheduled entry inside a day.
///
/// Events live only inside itinerary content; they are never a standalone
/// backend resource. Field names follow the content wire format, which is
/// camelCase throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Client-generated identifier, unique within the document
    pub id: u64,
    /// Short label shown in day listings
    pub title: String,
    /// Category tag plus category-specific attributes, flattened on the wire
    #[serde(flatten)]
    pub details: EventDetails,
    /// Schedule marker (check in, departure, ...), serialized as `type`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    /// Free-form refinement of the category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Long-form notes
    #[serde(default)]
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_through: Option<String>,
    /// Booked price amount, in `currency`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Image references, at most [`MAX_EVENT_IMAGES`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// True while a copy of this event sits in the session library
    #[serde(default, rename = "isInLibrary")]
    pub in_library: bool,
}

impl Event {
    /// Builds an event from form input under a freshly allocated ID.
    pub fn from_form(id: u64, form: EventForm) -> Self {
        Self {
            id,
            title: form.title,
            details: form.details,
            kind: form.kind,
            sub_category: form.sub_category,
            notes: form.notes.unwrap_or_default(),
            time: form.time,
            duration: form.duration,
            timezone: form.timezone,
            booking_reference: form.booking_reference,
            booked_through: form.booked_through,
            amount: form.amount,
            currency: form.currency,
            images: form.images,
            in_library: false,
        }
    }

    /// Returns the event's category.
    pub fn category(&self) -> EventCategory {
        self.details.category()
    }

    /// Attaches an image reference, refusing once the limit is reached.
    pub fn add_image(&mut self, reference: impl Into<String>) -> Result<()> {
        if self.images.len() >= MAX_EVENT_IMAGES {
            return Err(AuthoringError::TooManyImages {
                limit: MAX_EVENT_IMAGES,
            });
        }
        self.images.push(reference.into());
        Ok(())
    }

    /// Removes the image at `index`, returning its reference if present.
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel_event() -> Event {
        Event {
            id: 7,
            title: "Taj Resort".to_string(),
            details: EventDetails::Hotel {
                room_type: Some("Deluxe".to_string()),
                bed_type: None,
                hotel_type: None,
            },
            kind: Some(EventKind::CheckIn),
            sub_category: None,
            notes: "Lobby check-in".to_string(),
            time: Some("14:00".to_string()),
            duration: None,
            timezone: None,
            booking_reference: Some("BK-99".to_string()),
            booked_through: None,
            amount: Some(120.5),
            currency: Some("USD".to_string()),
            images: vec![],
            in_library: false,
        }
    }

    #[test]
    fn test_event_wire_format() {
        let value = serde_json::to_value(hotel_event()).unwrap();
        assert_eq!(value["category"], "Hotel");
        assert_eq!(value["roomType"], "Deluxe");
        assert_eq!(value["type"], "Check In");
        assert_eq!(value["bookingReference"], "BK-99");
        assert_eq!(value["isInLibrary"], false);
        assert!(value.get("bedType").is_none());
    }

    #[test]
    fn test_event_round_trip() {
        let event = hotel_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_info_event_has_no_detail_fields() {
        let event = Event::from_form(
            1,
            EventForm {
                title: "Visa notes".to_string(),
                details: EventDetails::Info,
                ..Default::default()
            },
        );
        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["category"], "Info");
        assert!(value.get("from").is_none());
    }

    #[test]
    fn test_add_image_enforces_limit() {
        let mut event = hotel_event();
        for n in 0..MAX_EVENT_IMAGES {
            event.add_image(format!("img-{n}.jpg")).unwrap();
        }
        let err = event.add_image("one-too-many.jpg").unwrap_err();
        assert!(matches!(err, AuthoringError::TooManyImages { limit: 5 }));
        assert_eq!(event.images.len(), MAX_EVENT_IMAGES);
    }

    #[test]
    fn test_kind_parses_cli_spellings() {
        assert_eq!("check-in".parse::<EventKind>().unwrap(), EventKind::CheckIn);
        assert_eq!(
            "Check Out".parse::<EventKind>().unwrap(),
            EventKind::CheckOut
        );
        assert_eq!("ARRIVAL".parse::<EventKind>().unwrap(), EventKind::Arrival);
        assert!("layover".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_empty_for_keeps_category() {
        for category in [
            EventCategory::Info,
            EventCategory::Hotel,
            EventCategory::Activity,
            EventCategory::Flights,
            EventCategory::Transport,
            EventCategory::Cruise,
        ] {
            assert_eq!(EventDetails::empty_for(category).category(), category);
        }
    }
}
