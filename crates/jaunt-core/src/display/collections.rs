//! Display implementations for collections of domain models.
//!
//! Wrapper types around vectors of summaries and library items that render
//! the whole collection, including an explicit empty state so callers never
//! have to special-case "nothing here" themselves.

use std::fmt;
use std::ops::Index;

use crate::models::{ItinerarySummary, LibraryItem};

/// A collection of itinerary summaries with formatted display output.
pub struct ItinerarySummaries(Vec<ItinerarySummary>);

impl ItinerarySummaries {
    pub fn new(summaries: Vec<ItinerarySummary>) -> Self {
        Self(summaries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&ItinerarySummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItinerarySummary> {
        self.0.iter()
    }
}

impl From<Vec<ItinerarySummary>> for ItinerarySummaries {
    fn from(summaries: Vec<ItinerarySummary>) -> Self {
        Self::new(summaries)
    }
}

impl Index<usize> for ItinerarySummaries {
    type Output = ItinerarySummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ItinerarySummaries {
    type Item = ItinerarySummary;
    type IntoIter = std::vec::IntoIter<ItinerarySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItinerarySummaries {
    type Item = &'a ItinerarySummary;
    type IntoIter = std::slice::Iter<'a, ItinerarySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ItinerarySummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No itineraries found.")
        } else {
            for summary in &self.0 {
                write!(f, "{}", summary)?;
            }
            Ok(())
        }
    }
}

/// A collection of library items with formatted display output.
pub struct LibraryItems(Vec<LibraryItem>);

impl LibraryItems {
    pub fn new(items: Vec<LibraryItem>) -> Self {
        Self(items)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&LibraryItem> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LibraryItem> {
        self.0.iter()
    }
}

impl From<Vec<LibraryItem>> for LibraryItems {
    fn from(items: Vec<LibraryItem>) -> Self {
        Self::new(items)
    }
}

impl Index<usize> for LibraryItems {
    type Output = LibraryItem;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for LibraryItems {
    type Item = LibraryItem;
    type IntoIter = std::vec::IntoIter<LibraryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LibraryItems {
    type Item = &'a LibraryItem;
    type IntoIter = std::slice::Iter<'a, LibraryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for LibraryItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "Library is empty.")
        } else {
            for item in &self.0 {
                write!(f, "{}", item)?;
            }
            Ok(())
        }
    }
}
