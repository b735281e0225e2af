//! Cross-model serialization tests exercising whole documents.

use jiff::civil::date;

use super::*;
use crate::params::EventForm;

fn goa_trip() -> Itinerary {
    let mut itinerary = Itinerary::new("Goa Trip");
    let mut day_one = Day::numbered(1, 1);
    day_one.date = Some(date(2026, 9, 14));
    day_one.events.push(Event::from_form(
        2,
        EventForm {
            title: "Flight to Goa".to_string(),
            details: EventDetails::Flights {
                from: Some("BOM".to_string()),
                to: Some("GOI".to_string()),
                airline: Some("IndiGo".to_string()),
                terminal: None,
                gate: None,
                flight_number: Some("6E-331".to_string()),
            },
            kind: Some(EventKind::Departure),
            time: Some("08:15".to_string()),
            ..Default::default()
        },
    ));
    day_one.events.push(Event::from_form(
        3,
        EventForm {
            title: "Taj Resort".to_string(),
            details: EventDetails::Hotel {
                room_type: Some("Sea view".to_string()),
                bed_type: Some("King".to_string()),
                hotel_type: None,
            },
            kind: Some(EventKind::CheckIn),
            ..Default::default()
        },
    ));
    let day_two = Day::numbered(4, 2);
    itinerary.content.days.push(day_one);
    itinerary.content.days.push(day_two);
    itinerary
}

#[test]
fn test_full_document_round_trip() {
    let itinerary = goa_trip();
    let json = serde_json::to_string(&itinerary).unwrap();
    let back: Itinerary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, itinerary);
}

#[test]
fn test_content_serialization_is_deterministic() {
    let itinerary = goa_trip();
    let first = serde_json::to_vec(&itinerary.content).unwrap();
    let second = serde_json::to_vec(&itinerary.content).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reads_server_shaped_itinerary() {
    // A realistic backend response, with server-managed fields filled in.
    let json = r#"{
        "id": 17,
        "user_id": 4,
        "title": "Goa Trip",
        "content": {
            "days": [
                {
                    "id": 1,
                    "title": "Day 1",
                    "date": "2026-09-14",
                    "events": [
                        {
                            "id": 2,
                            "title": "Flight to Goa",
                            "category": "Flights",
                            "from": "BOM",
                            "to": "GOI",
                            "type": "Departure",
                            "notes": ""
                        }
                    ]
                }
            ]
        },
        "cover_image": "/storage/images/goa.jpg",
        "is_published": true,
        "share_uuid": "f2a9c1",
        "created_at": "2026-08-01T08:00:00Z",
        "updated_at": "2026-08-20T10:30:00Z"
    }"#;
    let itinerary: Itinerary = serde_json::from_str(json).unwrap();
    assert_eq!(itinerary.id, Some(17));
    assert_eq!(itinerary.visibility, Visibility::Published);
    assert_eq!(itinerary.share_uuid.as_deref(), Some("f2a9c1"));
    let (day, event) = itinerary.find_event(2).unwrap();
    assert_eq!(day.id, 1);
    assert_eq!(event.category(), EventCategory::Flights);
    assert_eq!(event.kind, Some(EventKind::Departure));
    assert!(event.images.is_empty());
}

#[test]
fn test_package_round_trip_with_snake_case_resource_fields() {
    let mut itinerary = goa_trip();
    itinerary.id = Some(17);
    let package = Package::default_for(&itinerary);
    let value = serde_json::to_value(&package).unwrap();
    assert_eq!(value["itinerary_id"], 17);
    assert_eq!(value["start_location"], PLACEHOLDER);
    assert_eq!(value["price_type"], "per_person");
    assert_eq!(value["is_published"], false);
    let back: Package = serde_json::from_value(value).unwrap();
    assert_eq!(back, package);
}
