//! HTTP implementation of the backend contract.

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;

use crate::error::{AuthoringError, Result};
use crate::models::{CompanyDetails, Itinerary, Package};

use super::types::{CurrentUser, Envelope, MultiUploadResponse, SharePayload, UploadResponse};
use super::TravelApi;

/// REST client for the travel backend.
///
/// Requests carry the bearer token when one is set. A 401 response discards
/// the token on the spot, so every later call behaves as signed out until a
/// new token is provided. Timeouts and retries are whatever the underlying
/// client defaults to; there is no retry layer here.
pub struct HttpApi {
    client: Client,
    origin: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// Creates a client against a server origin like `http://localhost:8000`.
    pub fn new(origin: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
            token: RwLock::new(token),
        })
    }

    /// The server origin this client talks to.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Replaces the bearer token.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// True while a bearer token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.origin, path)
    }

    async fn bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps error statuses onto the error taxonomy. 401 also drops the
    /// held token.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            *self.token.write().await = None;
            return Err(AuthoringError::Unauthorized);
        }
        if status.is_server_error() {
            return Err(AuthoringError::Backend {
                status: status.as_u16(),
            });
        }
        if status.is_client_error() {
            return Err(AuthoringError::ContentRejected {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_authed(&self, path: &str) -> Result<Response> {
        debug!("GET {path}");
        let builder = self.client.get(self.url(path));
        let response = self.bearer(builder).await.send().await?;
        self.check(response).await
    }

    async fn send_json<B: serde::Serialize + Sync>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        debug!("{method} {path}");
        let builder = self.client.request(method, self.url(path)).json(body);
        let response = self.bearer(builder).await.send().await?;
        self.check(response).await
    }
}

#[derive(serde::Serialize)]
struct DeleteImageBody<'a> {
    filename: &'a str,
}

fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl TravelApi for HttpApi {
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>> {
        Ok(self.get_authed("/itineraries").await?.json().await?)
    }

    async fn get_itinerary(&self, id: u64) -> Result<Itinerary> {
        debug!("GET /itineraries/{id}");
        let builder = self.client.get(self.url(&format!("/itineraries/{id}")));
        let response = self.bearer(builder).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::ItineraryNotFound { id });
        }
        Ok(self.check(response).await?.json().await?)
    }

    async fn create_itinerary(&self, itinerary: &Itinerary) -> Result<Itinerary> {
        let response = self
            .send_json(reqwest::Method::POST, "/itineraries", itinerary)
            .await?;
        Ok(response.json().await?)
    }

    async fn update_itinerary(&self, id: u64, itinerary: &Itinerary) -> Result<Itinerary> {
        debug!("PUT /itineraries/{id}");
        let builder = self
            .client
            .put(self.url(&format!("/itineraries/{id}")))
            .json(itinerary);
        let response = self.bearer(builder).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::ItineraryNotFound { id });
        }
        Ok(self.check(response).await?.json().await?)
    }

    async fn delete_itinerary(&self, id: u64) -> Result<()> {
        debug!("DELETE /itineraries/{id}");
        let builder = self.client.delete(self.url(&format!("/itineraries/{id}")));
        let response = self.bearer(builder).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::ItineraryNotFound { id });
        }
        self.check(response).await?;
        Ok(())
    }

    async fn list_packages(&self) -> Result<Vec<Package>> {
        Ok(self.get_authed("/packages").await?.json().await?)
    }

    async fn create_package(&self, package: &Package) -> Result<Package> {
        let response = self
            .send_json(reqwest::Method::POST, "/packages", package)
            .await?;
        Ok(response.json().await?)
    }

    async fn update_package(&self, id: u64, package: &Package) -> Result<Package> {
        debug!("PUT /packages/{id}");
        let builder = self
            .client
            .put(self.url(&format!("/packages/{id}")))
            .json(package);
        let response = self.bearer(builder).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::PackageNotFound { id });
        }
        Ok(self.check(response).await?.json().await?)
    }

    async fn delete_package(&self, id: u64) -> Result<()> {
        debug!("DELETE /packages/{id}");
        let builder = self.client.delete(self.url(&format!("/packages/{id}")));
        let response = self.bearer(builder).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::PackageNotFound { id });
        }
        self.check(response).await?;
        Ok(())
    }

    async fn shared_itinerary(&self, share_uuid: &str) -> Result<SharePayload> {
        // Public endpoint: no bearer token, works signed out.
        debug!("GET /share/{share_uuid}");
        let response = self
            .client
            .get(self.url(&format!("/share/{share_uuid}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthoringError::ShareUnavailable {
                token: share_uuid.to_string(),
            });
        }
        Ok(self.check(response).await?.json().await?)
    }

    async fn company_details(&self) -> Result<Option<CompanyDetails>> {
        let response = self.get_authed("/company-details").await?;
        let envelope: Envelope<CompanyDetails> = response.json().await?;
        envelope.into_data()
    }

    async fn create_company_details(&self, details: &CompanyDetails) -> Result<CompanyDetails> {
        let response = self
            .send_json(reqwest::Method::POST, "/company-details", details)
            .await?;
        let envelope: Envelope<CompanyDetails> = response.json().await?;
        envelope.into_data()?.ok_or_else(|| AuthoringError::Api {
            message: "company details response carried no data".to_string(),
        })
    }

    async fn update_company_details(
        &self,
        id: u64,
        details: &CompanyDetails,
    ) -> Result<CompanyDetails> {
        let response = self
            .send_json(
                reqwest::Method::PUT,
                &format!("/company-details/{id}"),
                details,
            )
            .await?;
        let envelope: Envelope<CompanyDetails> = response.json().await?;
        envelope.into_data()?.ok_or_else(|| AuthoringError::Api {
            message: "company details response carried no data".to_string(),
        })
    }

    async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String> {
        debug!("POST /images/upload ({} bytes)", bytes.len());
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        let form = Form::new().part("image", part);
        let builder = self
            .client
            .post(self.url("/images/upload"))
            .multipart(form);
        let response = self.bearer(builder).await.send().await?;
        let response = self.check(response).await?;
        let upload: UploadResponse = response.json().await?;
        upload.into_path()
    }

    async fn upload_images(&self, files: Vec<(String, Vec<u8>)>) -> Result<Vec<String>> {
        debug!("POST /images/upload-multiple ({} files)", files.len());
        let mut form = Form::new();
        for (index, (filename, bytes)) in files.into_iter().enumerate() {
            let part = Part::bytes(bytes)
                .file_name(filename.clone())
                .mime_str(mime_for(&filename))?;
            form = form.part(format!("images[{index}]"), part);
        }
        let builder = self
            .client
            .post(self.url("/images/upload-multiple"))
            .multipart(form);
        let response = self.bearer(builder).await.send().await?;
        let response = self.check(response).await?;
        let upload: MultiUploadResponse = response.json().await?;
        upload.into_paths()
    }

    async fn delete_image(&self, filename: &str) -> Result<()> {
        let body = DeleteImageBody { filename };
        self.send_json(reqwest::Method::DELETE, "/images/delete", &body)
            .await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        Ok(self.get_authed("/user").await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let api = HttpApi::new("http://localhost:8000/", None).unwrap();
        assert_eq!(api.origin(), "http://localhost:8000");
        assert_eq!(
            api.url("/itineraries/7"),
            "http://localhost:8000/api/itineraries/7"
        );
    }

    #[test]
    fn test_mime_guessing() {
        assert_eq!(mime_for("goa.JPG"), "image/jpeg");
        assert_eq!(mime_for("cover.png"), "image/png");
        assert_eq!(mime_for("mystery"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let api = HttpApi::new("http://localhost:8000", Some("tok".to_string())).unwrap();
        assert!(api.is_authenticated().await);
        api.set_token(None).await;
        assert!(!api.is_authenticated().await);
    }
}
