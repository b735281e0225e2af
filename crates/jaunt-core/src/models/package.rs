//! Sales packages attached to itineraries.

use std::str::FromStr;

use jiff::civil::Date;
use jiff::{ToSpan, Zoned};
use serde::{Deserialize, Serialize};

use super::itinerary::Itinerary;
use super::status::Visibility;
use crate::params::PackageForm;

/// Placeholder written into required package fields the author left blank.
pub const PLACEHOLDER: &str = "TBD";

/// How a package price is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    PerPerson,
    Total,
}

impl PriceType {
    /// Returns the wire name of the price type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerPerson => "per_person",
            Self::Total => "total",
        }
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_person" | "per person" => Ok(Self::PerPerson),
            "total" => Ok(Self::Total),
            _ => Err(format!("Invalid price type: {s}")),
        }
    }
}

/// One block of package description text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionBlock {
    pub content: String,
}

impl DescriptionBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A sales package linked to an itinerary.
///
/// The backend keeps packages as standalone resources; the client treats the
/// first package whose `itinerary_id` matches as the itinerary's canonical
/// one. Every save of an itinerary also persists its package, synthesizing a
/// placeholder one when the author never filled the form in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Server-assigned identifier, absent until first persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Owning itinerary, set during the save flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary_id: Option<u64>,
    /// Mirrors the itinerary title on every save
    pub title: String,
    /// Departure location, `TBD` when not provided
    pub start_location: String,
    /// Offer expiry date
    pub valid_till: Date,
    /// Description blocks, `TBD` block when not provided
    #[serde(default)]
    pub description: Vec<DescriptionBlock>,
    /// Price amount
    pub price: f64,
    /// Whether `price` is per person or for the whole group
    #[serde(default)]
    pub price_type: PriceType,
    /// Group size the price applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<u32>,
    /// Covered locations, `TBD` entry when not provided
    #[serde(default)]
    pub locations: Vec<String>,
    /// What the price includes, `TBD` entry when not provided
    #[serde(default)]
    pub inclusions: Vec<String>,
    /// What the price excludes, `TBD` entry when not provided
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// Mirrors the itinerary cover image on every save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Publication state, `is_published` on the wire
    #[serde(rename = "is_published", default)]
    pub visibility: Visibility,
}

/// Replaces an empty list with a single placeholder entry.
fn backfill(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        values
    }
}

/// Tomorrow in the system time zone, the default offer expiry.
fn default_valid_till() -> Date {
    Zoned::now().date().saturating_add(1.day())
}

impl Package {
    /// Synthesizes the placeholder package persisted alongside an itinerary
    /// the author never filled a package form for.
    pub fn default_for(itinerary: &Itinerary) -> Self {
        Self {
            id: None,
            itinerary_id: itinerary.id,
            title: itinerary.title.clone(),
            start_location: PLACEHOLDER.to_string(),
            valid_till: default_valid_till(),
            description: vec![DescriptionBlock::new(PLACEHOLDER)],
            price: 0.0,
            price_type: PriceType::PerPerson,
            people: None,
            locations: backfill(Vec::new()),
            inclusions: backfill(Vec::new()),
            exclusions: backfill(Vec::new()),
            cover_image: itinerary.cover_image.clone(),
            visibility: itinerary.visibility,
        }
    }

    /// Builds a package from staged form data, backfilling whatever the
    /// author left blank and syncing title and cover from the itinerary.
    pub fn from_form(form: &PackageForm, itinerary: &Itinerary) -> Self {
        let mut package = Self::default_for(itinerary);
        package.apply_form(form);
        package
    }

    /// Applies staged form data on top of this package.
    pub fn apply_form(&mut self, form: &PackageForm) {
        if !form.start_location.trim().is_empty() {
            self.start_location = form.start_location.clone();
        }
        if let Some(valid_till) = form.valid_till {
            self.valid_till = valid_till;
        }
        if let Some(description) = &form.description {
            if !description.trim().is_empty() {
                self.description = vec![DescriptionBlock::new(description.clone())];
            }
        }
        self.price = form.price;
        self.price_type = form.price_type;
        self.people = form.people;
        self.locations = backfill(form.locations.clone());
        self.inclusions = backfill(form.inclusions.clone());
        self.exclusions = backfill(form.exclusions.clone());
    }

    /// Syncs the fields that always mirror the owning itinerary.
    pub fn sync_with(&mut self, itinerary: &Itinerary) {
        self.itinerary_id = itinerary.id;
        self.title = itinerary.title.clone();
        self.cover_image = itinerary.cover_image.clone();
    }

    /// First description block, if any.
    pub fn summary_text(&self) -> Option<&str> {
        self.description.first().map(|b| b.content.as_str())
    }
}
