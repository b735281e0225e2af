//! Publication status for itineraries and packages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state of an itinerary or package.
///
/// The wire format is the backend's `is_published` boolean, so the enum
/// converts to and from `bool` during serialization. Publishing is one-way
/// through the authoring flow: once published, an itinerary stays published
/// on every subsequent save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Visibility {
    /// Draft, reachable only by its author
    #[default]
    Draft,
    /// Published and reachable through its share link
    Published,
}

impl From<bool> for Visibility {
    fn from(is_published: bool) -> Self {
        if is_published {
            Self::Published
        } else {
            Self::Draft
        }
    }
}

impl From<Visibility> for bool {
    fn from(visibility: Visibility) -> Self {
        visibility.is_published()
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(format!("Invalid visibility: {s}")),
        }
    }
}

impl Visibility {
    /// Returns the string representation of the visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Returns the visibility with a status icon for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            Self::Draft => "○ Draft",
            Self::Published => "● Published",
        }
    }

    /// True once the record is visible through its share link.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_from_str() {
        assert_eq!("draft".parse::<Visibility>().unwrap(), Visibility::Draft);
        assert_eq!(
            "Published".parse::<Visibility>().unwrap(),
            Visibility::Published
        );
        assert!("hidden".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_visibility_wire_format_is_bool() {
        let json = serde_json::to_string(&Visibility::Published).unwrap();
        assert_eq!(json, "true");
        let back: Visibility = serde_json::from_str("false").unwrap();
        assert_eq!(back, Visibility::Draft);
    }

    #[test]
    fn test_visibility_icons() {
        assert_eq!(Visibility::Draft.with_icon(), "○ Draft");
        assert_eq!(Visibility::Published.with_icon(), "● Published");
    }
}
