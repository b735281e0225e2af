//! The in-memory itinerary document being authored.
//!
//! An [`ItineraryDocument`] wraps one [`Itinerary`] with the bookkeeping the
//! authoring flow needs: which day new events land on, and a counter for
//! client-generated IDs. Days and events get their IDs here, client-side,
//! so content can be assembled fully offline and saved as one blob later.
//!
//! The counter is seeded from the wall-clock millisecond when a document is
//! created. Loading an existing itinerary re-seeds past the highest ID found
//! in its content, so freshly allocated IDs never collide with IDs minted by
//! an earlier session.

use jiff::civil::Date as CivilDate;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{AuthoringError, Result};
use crate::models::{Day, Event, Itinerary, ItinerarySummary, MAX_EVENT_IMAGES};
use crate::params::{NewItinerary, SaveEvent};

/// Millisecond wall clock, the base for fresh ID counters.
fn id_seed() -> u64 {
    u64::try_from(Timestamp::now().as_millisecond()).unwrap_or(1)
}

/// An itinerary under edit, with day selection and ID allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDocument {
    itinerary: Itinerary,
    /// Day that event operations target
    selected_day: Option<u64>,
    /// Next client-generated ID
    next_id: u64,
}

impl ItineraryDocument {
    /// Starts a brand-new draft document.
    pub fn new(params: NewItinerary) -> Self {
        let mut itinerary = Itinerary::new(params.title);
        itinerary.cover_image = params.cover_image;
        Self {
            itinerary,
            selected_day: None,
            next_id: id_seed(),
        }
    }

    /// Wraps an itinerary loaded from the backend.
    ///
    /// The ID counter is re-seeded past every ID already present, and the
    /// first day (if any) becomes the selected day.
    pub fn from_remote(itinerary: Itinerary) -> Self {
        let highest = itinerary
            .content
            .days
            .iter()
            .flat_map(|day| {
                std::iter::once(day.id).chain(day.events.iter().map(|event| event.id))
            })
            .max()
            .unwrap_or(0);
        let selected_day = itinerary.content.days.first().map(|day| day.id);
        Self {
            itinerary,
            selected_day,
            next_id: id_seed().max(highest + 1),
        }
    }

    /// The wrapped itinerary.
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Compact listing row for this document.
    pub fn summary(&self) -> ItinerarySummary {
        ItinerarySummary::from(&self.itinerary)
    }

    /// Sets the itinerary title. Emptiness is caught at save time.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.itinerary.title = title.into();
    }

    /// Sets or clears the cover image reference.
    pub fn set_cover_image(&mut self, cover_image: Option<String>) {
        self.itinerary.cover_image = cover_image;
    }

    /// Day that event operations currently target.
    pub fn selected_day(&self) -> Option<u64> {
        self.selected_day
    }

    /// Selects the day future event operations target.
    pub fn select_day(&mut self, day_id: u64) -> Result<()> {
        if self.itinerary.find_day(day_id).is_none() {
            return Err(AuthoringError::DayNotFound { id: day_id });
        }
        self.selected_day = Some(day_id);
        Ok(())
    }

    /// Allocates a fresh client ID, distinct from every ID in the document.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a new auto-titled day and selects it. Returns the day's ID.
    pub fn add_day(&mut self) -> u64 {
        let id = self.allocate_id();
        let position = self.itinerary.day_count() + 1;
        self.itinerary.content.days.push(Day::numbered(id, position));
        self.selected_day = Some(id);
        id
    }

    /// Renames a day. Returns false when no day has that ID.
    pub fn set_day_title(&mut self, day_id: u64, title: impl Into<String>) -> bool {
        match self.itinerary.find_day_mut(day_id) {
            Some(day) => {
                day.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Sets or clears a day's date. Returns false when no day has that ID.
    pub fn set_day_date(&mut self, day_id: u64, date: Option<CivilDate>) -> bool {
        match self.itinerary.find_day_mut(day_id) {
            Some(day) => {
                day.date = date;
                true
            }
            None => false,
        }
    }

    /// Removes a day and all its events, returning the removed day.
    ///
    /// If the removed day was selected, selection falls back to the first
    /// remaining day.
    pub fn remove_day(&mut self, day_id: u64) -> Result<Day> {
        let days = &mut self.itinerary.content.days;
        let index = days
            .iter()
            .position(|day| day.id == day_id)
            .ok_or(AuthoringError::DayNotFound { id: day_id })?;
        let removed = days.remove(index);
        if self.selected_day == Some(day_id) {
            self.selected_day = days.first().map(|day| day.id);
        }
        Ok(removed)
    }

    /// Creates or edits an event, returning its ID.
    ///
    /// With `editing` set, the addressed event's content is replaced in
    /// place: same ID, same position in its day. Otherwise a new event is
    /// appended to the selected day under a fresh ID.
    pub fn save_event(&mut self, params: SaveEvent) -> Result<u64> {
        if params.form.images.len() > MAX_EVENT_IMAGES {
            return Err(AuthoringError::TooManyImages {
                limit: MAX_EVENT_IMAGES,
            });
        }
        match params.editing {
            Some(event_id) => {
                let (day_index, event_index) = self
                    .position_of(event_id)
                    .ok_or(AuthoringError::EventNotFound { id: event_id })?;
                let slot =
                    &mut self.itinerary.content.days[day_index].events[event_index];
                let mut event = Event::from_form(event_id, params.form);
                event.in_library = slot.in_library;
                *slot = event;
                Ok(event_id)
            }
            None => {
                let id = self.allocate_id();
                self.append_event(Event::from_form(id, params.form))
            }
        }
    }

    /// Appends an already-built event to the selected day, returning its ID.
    pub fn append_event(&mut self, event: Event) -> Result<u64> {
        let day_id = self.selected_day.ok_or_else(|| {
            AuthoringError::validation("day")
                .with_reason("no day is selected; add or select a day first")
        })?;
        let day = self
            .itinerary
            .find_day_mut(day_id)
            .ok_or(AuthoringError::DayNotFound { id: day_id })?;
        let id = event.id;
        day.events.push(event);
        Ok(id)
    }

    /// Removes an event, returning it so callers can release its images.
    pub fn remove_event(&mut self, event_id: u64) -> Result<Event> {
        let (day_index, event_index) = self
            .position_of(event_id)
            .ok_or(AuthoringError::EventNotFound { id: event_id })?;
        Ok(self.itinerary.content.days[day_index]
            .events
            .remove(event_index))
    }

    /// Finds an event with its owning day.
    pub fn find_event(&self, event_id: u64) -> Option<(&Day, &Event)> {
        self.itinerary.find_event(event_id)
    }

    /// Attaches an uploaded image reference to an event.
    pub fn add_image(&mut self, event_id: u64, reference: impl Into<String>) -> Result<()> {
        self.event_mut(event_id)?.add_image(reference)
    }

    /// Detaches the image at `index` from an event, returning its reference.
    pub fn remove_image(&mut self, event_id: u64, index: usize) -> Result<String> {
        self.event_mut(event_id)?.remove_image(index).ok_or_else(|| {
            AuthoringError::validation("image").with_reason(format!("no image at index {index}"))
        })
    }

    /// Flags whether an event has a copy in the session library.
    /// Returns false when no event has that ID.
    pub fn mark_in_library(&mut self, event_id: u64, in_library: bool) -> bool {
        match self.event_mut(event_id) {
            Ok(event) => {
                event.in_library = in_library;
                true
            }
            Err(_) => false,
        }
    }

    /// Copies server-managed fields from a save response into the document.
    pub fn record_remote_identity(&mut self, saved: &Itinerary) {
        self.itinerary.id = saved.id;
        self.itinerary.user_id = saved.user_id;
        self.itinerary.share_uuid = saved.share_uuid.clone();
        self.itinerary.visibility = saved.visibility;
        self.itinerary.created_at = saved.created_at;
        self.itinerary.updated_at = saved.updated_at;
    }

    fn position_of(&self, event_id: u64) -> Option<(usize, usize)> {
        self.itinerary
            .content
            .days
            .iter()
            .enumerate()
            .find_map(|(day_index, day)| {
                day.events
                    .iter()
                    .position(|event| event.id == event_id)
                    .map(|event_index| (day_index, event_index))
            })
    }

    fn event_mut(&mut self, event_id: u64) -> Result<&mut Event> {
        let (day_index, event_index) = self
            .position_of(event_id)
            .ok_or(AuthoringError::EventNotFound { id: event_id })?;
        Ok(&mut self.itinerary.content.days[day_index].events[event_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDetails;
    use crate::params::EventForm;

    fn new_document() -> ItineraryDocument {
        ItineraryDocument::new(NewItinerary {
            title: "Goa Trip".to_string(),
            cover_image: None,
        })
    }

    fn activity(title: &str) -> SaveEvent {
        SaveEvent {
            form: EventForm {
                title: title.to_string(),
                details: EventDetails::Activity { provider: None },
                ..Default::default()
            },
            editing: None,
        }
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = new_document();
        assert_eq!(doc.itinerary().day_count(), 0);
        assert!(doc.selected_day().is_none());
    }

    #[test]
    fn test_add_day_titles_and_selects() {
        let mut doc = new_document();
        let first = doc.add_day();
        let second = doc.add_day();
        assert_ne!(first, second);
        assert_eq!(doc.itinerary().find_day(first).unwrap().title, "Day 1");
        assert_eq!(doc.itinerary().find_day(second).unwrap().title, "Day 2");
        assert_eq!(doc.selected_day(), Some(second));
    }

    #[test]
    fn test_ids_are_unique_across_days_and_events() {
        let mut doc = new_document();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..3 {
            assert!(seen.insert(doc.add_day()));
            for n in 0..4 {
                let id = doc.save_event(activity(&format!("Event {n}"))).unwrap();
                assert!(seen.insert(id), "duplicate ID {id}");
            }
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_from_remote_seeds_past_existing_ids() {
        // An itinerary whose content carries an ID far beyond the current
        // wall clock must still get fresh, non-colliding IDs.
        let mut itinerary = Itinerary::new("Imported");
        let mut day = Day::numbered(u64::MAX - 10, 1);
        day.events.push(Event::from_form(
            u64::MAX - 9,
            EventForm {
                title: "Old event".to_string(),
                ..Default::default()
            },
        ));
        itinerary.content.days.push(day);
        let mut doc = ItineraryDocument::from_remote(itinerary);
        let fresh = doc.add_day();
        assert!(fresh > u64::MAX - 9);
    }

    #[test]
    fn test_from_remote_selects_first_day() {
        let mut itinerary = Itinerary::new("Imported");
        itinerary.content.days.push(Day::numbered(4, 1));
        itinerary.content.days.push(Day::numbered(5, 2));
        let doc = ItineraryDocument::from_remote(itinerary);
        assert_eq!(doc.selected_day(), Some(4));
    }

    #[test]
    fn test_save_event_without_day_is_a_validation_error() {
        let mut doc = new_document();
        let err = doc.save_event(activity("Orphan")).unwrap_err();
        assert!(matches!(err, AuthoringError::Validation { ref field, .. } if field == "day"));
    }

    #[test]
    fn test_events_append_in_order() {
        let mut doc = new_document();
        let day_id = doc.add_day();
        let a = doc.save_event(activity("First")).unwrap();
        let b = doc.save_event(activity("Second")).unwrap();
        let day = doc.itinerary().find_day(day_id).unwrap();
        let ids: Vec<u64> = day.events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_edit_preserves_id_and_position() {
        let mut doc = new_document();
        doc.add_day();
        let a = doc.save_event(activity("First")).unwrap();
        let b = doc.save_event(activity("Second")).unwrap();
        let c = doc.save_event(activity("Third")).unwrap();

        let edited = doc
            .save_event(SaveEvent {
                form: EventForm {
                    title: "Second, revised".to_string(),
                    notes: Some("Now with notes".to_string()),
                    details: EventDetails::Activity { provider: None },
                    ..Default::default()
                },
                editing: Some(b),
            })
            .unwrap();
        assert_eq!(edited, b);

        let day_id = doc.selected_day().unwrap();
        let day = doc.itinerary().find_day(day_id).unwrap();
        let ids: Vec<u64> = day.events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(day.events[1].title, "Second, revised");
        assert_eq!(day.events[1].notes, "Now with notes");
    }

    #[test]
    fn test_edit_unknown_event_fails() {
        let mut doc = new_document();
        doc.add_day();
        let err = doc
            .save_event(SaveEvent {
                form: EventForm::default(),
                editing: Some(424242),
            })
            .unwrap_err();
        assert!(matches!(err, AuthoringError::EventNotFound { id: 424242 }));
    }

    #[test]
    fn test_remove_event_returns_it() {
        let mut doc = new_document();
        doc.add_day();
        let id = doc.save_event(activity("Doomed")).unwrap();
        let removed = doc.remove_event(id).unwrap();
        assert_eq!(removed.title, "Doomed");
        assert!(doc.find_event(id).is_none());
    }

    #[test]
    fn test_remove_selected_day_moves_selection() {
        let mut doc = new_document();
        let first = doc.add_day();
        let second = doc.add_day();
        assert_eq!(doc.selected_day(), Some(second));
        doc.remove_day(second).unwrap();
        assert_eq!(doc.selected_day(), Some(first));
        doc.remove_day(first).unwrap();
        assert_eq!(doc.selected_day(), None);
    }

    #[test]
    fn test_day_mutations_report_misses() {
        let mut doc = new_document();
        let day_id = doc.add_day();
        assert!(doc.set_day_title(day_id, "Arrival day"));
        assert!(!doc.set_day_title(999, "Ghost day"));
        assert!(doc.set_day_date(day_id, Some("2026-09-14".parse().unwrap())));
        assert!(doc.set_day_date(day_id, None));
        assert!(!doc.set_day_date(999, None));
        assert_eq!(doc.itinerary().find_day(day_id).unwrap().title, "Arrival day");
        assert!(doc.itinerary().find_day(day_id).unwrap().date.is_none());
    }

    #[test]
    fn test_image_limit_through_document() {
        let mut doc = new_document();
        doc.add_day();
        let id = doc.save_event(activity("Gallery")).unwrap();
        for n in 0..MAX_EVENT_IMAGES {
            doc.add_image(id, format!("img-{n}.jpg")).unwrap();
        }
        let err = doc.add_image(id, "img-5.jpg").unwrap_err();
        assert!(matches!(err, AuthoringError::TooManyImages { .. }));
        let (_, event) = doc.find_event(id).unwrap();
        assert_eq!(event.images.len(), MAX_EVENT_IMAGES);
    }

    #[test]
    fn test_save_event_rejects_oversized_image_list() {
        let mut doc = new_document();
        doc.add_day();
        let err = doc
            .save_event(SaveEvent {
                form: EventForm {
                    title: "Gallery".to_string(),
                    images: (0..=MAX_EVENT_IMAGES).map(|n| format!("{n}.jpg")).collect(),
                    ..Default::default()
                },
                editing: None,
            })
            .unwrap_err();
        assert!(matches!(err, AuthoringError::TooManyImages { .. }));
    }

    #[test]
    fn test_record_remote_identity() {
        let mut doc = new_document();
        let mut saved = doc.itinerary().clone();
        saved.id = Some(17);
        saved.share_uuid = Some("f2a9c1".to_string());
        doc.record_remote_identity(&saved);
        assert_eq!(doc.itinerary().id, Some(17));
        assert_eq!(doc.itinerary().share_uuid.as_deref(), Some("f2a9c1"));
    }
}
