//! Wire types specific to the HTTP API.

use serde::Deserialize;

use crate::error::{AuthoringError, Result};
use crate::models::{CompanyDetails, Itinerary, Package};

/// The `{success, message, data}` envelope some endpoints wrap responses in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning a `success: false` envelope into an
    /// error carrying the server's message.
    pub fn into_data(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AuthoringError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| "request failed without a message".to_string()),
            })
        }
    }
}

/// Response to an image upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Storage path of the uploaded file, e.g. `/storage/images/x.jpg`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// Unwraps the stored path or surfaces the server's refusal.
    pub fn into_path(self) -> Result<String> {
        match (self.success, self.path) {
            (true, Some(path)) => Ok(path),
            (_, _) => Err(AuthoringError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| "upload failed without a message".to_string()),
            }),
        }
    }
}

/// Response to a multi-file image upload.
#[derive(Debug, Deserialize)]
pub struct MultiUploadResponse {
    pub success: bool,
    /// Storage paths in upload order.
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MultiUploadResponse {
    /// Unwraps the stored paths or surfaces the server's refusal.
    pub fn into_paths(self) -> Result<Vec<String>> {
        if self.success {
            Ok(self.paths)
        } else {
            Err(AuthoringError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| "upload failed without a message".to_string()),
            })
        }
    }
}

/// The signed-in account, as `GET /api/user` reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Publisher block nested inside a shared-itinerary response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareUser {
    #[serde(default)]
    pub company_details: Option<CompanyDetails>,
}

/// Everything the public share endpoint returns for one token: the
/// itinerary itself plus its packages and the publisher's company block.
#[derive(Debug, Deserialize)]
pub struct SharePayload {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub user: Option<ShareUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), Some(7));
    }

    #[test]
    fn test_envelope_failure_carries_message() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.to_string(), "API error: nope");
    }

    #[test]
    fn test_upload_response() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": true, "path": "/storage/images/a.jpg"}"#).unwrap();
        assert_eq!(response.into_path().unwrap(), "/storage/images/a.jpg");
    }

    #[test]
    fn test_share_payload_nests_itinerary_fields() {
        let json = r#"{
            "id": 17,
            "title": "Goa Trip",
            "content": {"days": []},
            "is_published": true,
            "share_uuid": "f2a9c1",
            "packages": [],
            "user": {"company_details": {"company_name": "Sunset Travels"}}
        }"#;
        let payload: SharePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.itinerary.title, "Goa Trip");
        assert!(payload.itinerary.visibility.is_published());
        let company = payload.user.unwrap().company_details.unwrap();
        assert_eq!(company.company_name, "Sunset Travels");
    }
}
