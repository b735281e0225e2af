//! Compact itinerary listing rows.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::itinerary::Itinerary;
use super::status::Visibility;

/// A lightweight view of an itinerary for list output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySummary {
    /// Server ID, `None` for a document that was never saved
    pub id: Option<u64>,
    pub title: String,
    pub visibility: Visibility,
    pub day_count: usize,
    pub event_count: usize,
    pub share_uuid: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl From<&Itinerary> for ItinerarySummary {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            id: itinerary.id,
            title: itinerary.title.clone(),
            visibility: itinerary.visibility,
            day_count: itinerary.day_count(),
            event_count: itinerary.event_count(),
            share_uuid: itinerary.share_uuid.clone(),
            updated_at: itinerary.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itinerary::Day;

    #[test]
    fn test_summary_from_itinerary() {
        let mut itinerary = Itinerary::new("Goa Trip");
        itinerary.id = Some(5);
        itinerary.content.days.push(Day::numbered(1, 1));
        let summary = ItinerarySummary::from(&itinerary);
        assert_eq!(summary.id, Some(5));
        assert_eq!(summary.title, "Goa Trip");
        assert_eq!(summary.day_count, 1);
        assert_eq!(summary.event_count, 0);
        assert_eq!(summary.visibility, Visibility::Draft);
    }
}
