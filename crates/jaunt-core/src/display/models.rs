//! Display implementations for domain model types.
//!
//! Renders itineraries, packages, and library items as markdown-ish text for
//! terminal output. Headers carry `#`/`##` prefixes, attributes are rendered
//! as bullet lists, and optional fields are omitted rather than printed as
//! placeholders.

use std::fmt;

use crate::display::datetime::{LocalDateTime, ShortDate};
use crate::models::{
    CompanyDetails, Day, Event, EventDetails, Itinerary, ItinerarySummary, LibraryItem, Package,
    PriceType, Visibility,
};
use crate::viewer::SharedView;

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.with_icon())
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriceType::PerPerson => "per person",
            PriceType::Total => "total",
        };
        write!(f, "{label}")
    }
}

impl fmt::Display for ItinerarySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "## {} (ID: {})", self.title, id)?,
            None => writeln!(f, "## {} (unsaved)", self.title)?,
        }
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.visibility)?;
        writeln!(
            f,
            "- **Days**: {} ({} events)",
            self.day_count, self.event_count
        )?;
        if let Some(share_uuid) = &self.share_uuid {
            writeln!(f, "- **Share**: {share_uuid}")?;
        }
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- **Updated**: {}", LocalDateTime(updated_at))?;
        }
        writeln!(f)?; // Add blank line after each summary

        Ok(())
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.visibility)?;
        writeln!(f, "- Days: {}", self.day_count())?;
        writeln!(f, "- Events: {}", self.event_count())?;
        if let Some(share_uuid) = &self.share_uuid {
            writeln!(f, "- Share token: {share_uuid}")?;
        }
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?;
        }
        for day in &self.content.days {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        if let Some(date) = &self.date {
            writeln!(f, "*{}*", ShortDate(date))?;
        }
        if self.events.is_empty() {
            writeln!(f)?;
            writeln!(f, "No events planned for this day.")?;
        }
        for event in &self.events {
            writeln!(f)?;
            write!(f, "{event}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} ({}) (ID: {})",
            self.title,
            self.category().with_icon(),
            self.id
        )?;
        if let Some(kind) = &self.kind {
            writeln!(f, "- Type: {}", kind.as_str())?;
        }
        if let Some(sub_category) = &self.sub_category {
            writeln!(f, "- Detail: {sub_category}")?;
        }
        if let Some(time) = &self.time {
            match &self.timezone {
                Some(tz) => writeln!(f, "- Time: {time} ({tz})")?,
                None => writeln!(f, "- Time: {time}")?,
            }
        }
        if let Some(duration) = &self.duration {
            writeln!(f, "- Duration: {duration}")?;
        }
        write_details(f, &self.details)?;
        if let Some(reference) = &self.booking_reference {
            match &self.booked_through {
                Some(agent) => writeln!(f, "- Booking: {reference} (via {agent})")?,
                None => writeln!(f, "- Booking: {reference}")?,
            }
        }
        if let Some(amount) = self.amount {
            match &self.currency {
                Some(currency) => writeln!(f, "- Price: {amount:.2} {currency}")?,
                None => writeln!(f, "- Price: {amount:.2}")?,
            }
        }
        for image in &self.images {
            writeln!(f, "- Image: {image}")?;
        }
        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }
        Ok(())
    }
}

/// Writes the category-specific attribute lines of an event.
fn write_details(f: &mut fmt::Formatter<'_>, details: &EventDetails) -> fmt::Result {
    match details {
        EventDetails::Info => Ok(()),
        EventDetails::Activity { provider } => {
            if let Some(provider) = provider {
                writeln!(f, "- Provider: {provider}")?;
            }
            Ok(())
        }
        EventDetails::Hotel {
            room_type,
            bed_type,
            hotel_type,
        } => {
            if let Some(room) = room_type {
                match bed_type {
                    Some(bed) => writeln!(f, "- Room: {room} ({bed})")?,
                    None => writeln!(f, "- Room: {room}")?,
                }
            }
            if let Some(hotel) = hotel_type {
                writeln!(f, "- Property: {hotel}")?;
            }
            Ok(())
        }
        EventDetails::Flights {
            from,
            to,
            airline,
            terminal,
            gate,
            flight_number,
        } => {
            match (from, to) {
                (Some(from), Some(to)) => writeln!(f, "- Route: {from} to {to}")?,
                (Some(from), None) => writeln!(f, "- From: {from}")?,
                (None, Some(to)) => writeln!(f, "- To: {to}")?,
                (None, None) => {}
            }
            if let Some(airline) = airline {
                match flight_number {
                    Some(number) => writeln!(f, "- Flight: {airline} {number}")?,
                    None => writeln!(f, "- Flight: {airline}")?,
                }
            }
            if let Some(terminal) = terminal {
                writeln!(f, "- Terminal: {terminal}")?;
            }
            if let Some(gate) = gate {
                writeln!(f, "- Gate: {gate}")?;
            }
            Ok(())
        }
        EventDetails::Transport { carrier, number } => {
            if let Some(carrier) = carrier {
                match number {
                    Some(number) => writeln!(f, "- Carrier: {carrier} {number}")?,
                    None => writeln!(f, "- Carrier: {carrier}")?,
                }
            }
            Ok(())
        }
        EventDetails::Cruise {
            cabin_type,
            cabin_number,
        } => {
            match (cabin_type, cabin_number) {
                (Some(cabin), Some(number)) => writeln!(f, "- Cabin: {cabin}, no. {number}")?,
                (Some(cabin), None) => writeln!(f, "- Cabin: {cabin}")?,
                (None, Some(number)) => writeln!(f, "- Cabin no.: {number}")?,
                (None, None) => {}
            }
            Ok(())
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Package: {}", self.title)?;
        writeln!(f, "- Price: {:.2} ({})", self.price, self.price_type)?;
        writeln!(f, "- Valid till: {}", ShortDate(&self.valid_till))?;
        writeln!(f, "- Starts from: {}", self.start_location)?;
        if let Some(people) = self.people {
            writeln!(f, "- People: {people}")?;
        }
        if !self.locations.is_empty() {
            writeln!(f, "- Locations: {}", self.locations.join(", "))?;
        }
        if !self.inclusions.is_empty() {
            writeln!(f, "- Inclusions: {}", self.inclusions.join(", "))?;
        }
        if !self.exclusions.is_empty() {
            writeln!(f, "- Exclusions: {}", self.exclusions.join(", "))?;
        }
        for block in &self.description {
            if !block.content.is_empty() {
                writeln!(f)?;
                writeln!(f, "{}", block.content)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for LibraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} ({}) (ID: {})",
            self.title,
            self.category.with_icon(),
            self.id
        )?;
        if let Some(sub_category) = &self.sub_category {
            writeln!(f, "- Detail: {sub_category}")?;
        }
        if !self.content.is_empty() {
            writeln!(f, "- Notes: {}", self.content)?;
        }
        if !self.images.is_empty() {
            writeln!(f, "- Images: {}", self.images.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for CompanyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.company_name)?;
        if let Some(email) = &self.email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- Address: {address}")?;
        }
        if let Some(website) = &self.website {
            writeln!(f, "- Website: {website}")?;
        }
        if let Some(facebook) = &self.facebook_url {
            writeln!(f, "- Facebook: {facebook}")?;
        }
        if let Some(instagram) = &self.instagram_url {
            writeln!(f, "- Instagram: {instagram}")?;
        }
        if let Some(description) = &self.description {
            if !description.is_empty() {
                writeln!(f)?;
                writeln!(f, "{description}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SharedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.itinerary.title)?;
        if let Some(company) = &self.company {
            writeln!(f)?;
            writeln!(f, "Presented by {}", company.company_name)?;
        }
        if self.itinerary.content.days.is_empty() {
            writeln!(f)?;
            writeln!(f, "This itinerary has no days yet.")?;
        }
        for day in &self.itinerary.content.days {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        writeln!(f)?;
        match &self.package {
            Some(package) => write!(f, "{package}")?,
            None => writeln!(f, "No package details published.")?,
        }
        if let Some(company) = &self.company {
            writeln!(f)?;
            write!(f, "{company}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, ItineraryContent};

    fn flight_event() -> Event {
        Event {
            id: 2,
            title: "Flight to Goa".to_string(),
            details: EventDetails::Flights {
                from: Some("BOM".to_string()),
                to: Some("GOI".to_string()),
                airline: Some("IndiGo".to_string()),
                terminal: Some("T2".to_string()),
                gate: None,
                flight_number: Some("6E-334".to_string()),
            },
            kind: Some(EventKind::Departure),
            sub_category: None,
            notes: "Arrive two hours early.".to_string(),
            time: Some("08:15".to_string()),
            duration: None,
            timezone: Some("IST".to_string()),
            booking_reference: Some("BK-99".to_string()),
            booked_through: Some("MakeMyTrip".to_string()),
            amount: Some(120.50),
            currency: Some("USD".to_string()),
            images: vec![],
            in_library: false,
        }
    }

    #[test]
    fn test_event_display() {
        let output = flight_event().to_string();
        assert!(output.contains("### Flight to Goa (✈ Flights) (ID: 2)"));
        assert!(output.contains("- Type: Departure"));
        assert!(output.contains("- Time: 08:15 (IST)"));
        assert!(output.contains("- Route: BOM to GOI"));
        assert!(output.contains("- Flight: IndiGo 6E-334"));
        assert!(output.contains("- Terminal: T2"));
        assert!(output.contains("- Booking: BK-99 (via MakeMyTrip)"));
        assert!(output.contains("- Price: 120.50 USD"));
        assert!(output.contains("Arrive two hours early."));
    }

    #[test]
    fn test_day_display_with_no_events() {
        let day = Day {
            id: 1,
            title: "Day 1".to_string(),
            date: None,
            events: vec![],
        };
        let output = day.to_string();
        assert!(output.contains("## Day 1 (ID: 1)"));
        assert!(output.contains("No events planned for this day."));
    }

    #[test]
    fn test_itinerary_display() {
        let mut itinerary = Itinerary::new("Goa Trip".to_string());
        itinerary.content = ItineraryContent {
            days: vec![Day {
                id: 1,
                title: "Day 1".to_string(),
                date: Some(jiff::civil::date(2026, 9, 14)),
                events: vec![flight_event()],
            }],
        };
        let output = itinerary.to_string();
        assert!(output.contains("# Goa Trip"));
        assert!(output.contains("- Status: ○ Draft"));
        assert!(output.contains("- Days: 1"));
        assert!(output.contains("- Events: 1"));
        assert!(output.contains("*Mon, Sep 14, 2026*"));
        assert!(output.contains("### Flight to Goa"));
    }

    #[test]
    fn test_summary_display_unsaved() {
        let itinerary = Itinerary::new("Scratch Trip".to_string());
        let output = ItinerarySummary::from(&itinerary).to_string();
        assert!(output.contains("## Scratch Trip (unsaved)"));
        assert!(output.contains("- **Status**: ○ Draft"));
    }

    #[test]
    fn test_package_display_with_placeholders() {
        let itinerary = Itinerary::new("Goa Trip".to_string());
        let package = Package::default_for(&itinerary);
        let output = package.to_string();
        assert!(output.contains("## Package: Goa Trip"));
        assert!(output.contains("- Price: 0.00 (per person)"));
        assert!(output.contains("- Starts from: TBD"));
        assert!(output.contains("- Locations: TBD"));
    }

    #[test]
    fn test_shared_view_without_package() {
        let view = SharedView {
            itinerary: Itinerary::new("Goa Trip".to_string()),
            package: None,
            company: None,
        };
        let output = view.to_string();
        assert!(output.contains("# Goa Trip"));
        assert!(output.contains("This itinerary has no days yet."));
        assert!(output.contains("No package details published."));
    }
}
