//! Company branding details shown on public itinerary pages.

use serde::{Deserialize, Serialize};

/// The signed-in user's company profile.
///
/// Effectively a singleton per account. Everything except the name is
/// optional, and the public viewer renders whatever subset is filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub company_name: String,
    /// Logo image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompanyDetails {
    /// Creates a profile with just the company name set.
    pub fn named(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_stay_off_the_wire() {
        let details = CompanyDetails::named("Sunset Travels");
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["company_name"], "Sunset Travels");
        assert!(value.get("logo").is_none());
        assert!(value.get("website").is_none());
    }

    #[test]
    fn test_tolerates_missing_fields() {
        let details: CompanyDetails =
            serde_json::from_str(r#"{"company_name": "Sunset Travels", "id": 3}"#).unwrap();
        assert_eq!(details.id, Some(3));
        assert!(details.email.is_none());
    }
}
