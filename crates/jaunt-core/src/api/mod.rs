//! The backend API contract and its implementations.
//!
//! [`TravelApi`] captures every backend interaction the authoring flow
//! needs, so the session logic stays independent of the transport. The
//! [`HttpApi`] implementation talks to the real REST backend; the
//! [`InMemoryApi`] implementation backs tests with a faithful in-process
//! stand-in, including injectable write failures.

mod http;
mod memory;
mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CompanyDetails, Itinerary, Package};

pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use types::{
    CurrentUser, Envelope, MultiUploadResponse, SharePayload, ShareUser, UploadResponse,
};

/// Everything the backend does for the authoring client.
///
/// Implementations must be shareable across tasks. All write operations are
/// full-resource replacements; the backend never merges.
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// Lists the signed-in user's itineraries.
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>>;

    /// Fetches one itinerary by ID.
    async fn get_itinerary(&self, id: u64) -> Result<Itinerary>;

    /// Creates an itinerary, returning it with server-assigned fields set.
    async fn create_itinerary(&self, itinerary: &Itinerary) -> Result<Itinerary>;

    /// Replaces an itinerary by ID.
    async fn update_itinerary(&self, id: u64, itinerary: &Itinerary) -> Result<Itinerary>;

    /// Deletes an itinerary by ID.
    async fn delete_itinerary(&self, id: u64) -> Result<()>;

    /// Upserts an itinerary: update when it has an ID, create otherwise.
    async fn save_itinerary(&self, itinerary: &Itinerary) -> Result<Itinerary> {
        match itinerary.id {
            Some(id) => self.update_itinerary(id, itinerary).await,
            None => self.create_itinerary(itinerary).await,
        }
    }

    /// Lists the signed-in user's packages.
    async fn list_packages(&self) -> Result<Vec<Package>>;

    /// Creates a package, returning it with server-assigned fields set.
    async fn create_package(&self, package: &Package) -> Result<Package>;

    /// Replaces a package by ID.
    async fn update_package(&self, id: u64, package: &Package) -> Result<Package>;

    /// Deletes a package by ID.
    async fn delete_package(&self, id: u64) -> Result<()>;

    /// Fetches the published itinerary behind a share token, with its
    /// packages and publisher details. No authentication involved.
    async fn shared_itinerary(&self, share_uuid: &str) -> Result<SharePayload>;

    /// Fetches the account's company details, if any are set.
    async fn company_details(&self) -> Result<Option<CompanyDetails>>;

    /// Creates the account's company details.
    async fn create_company_details(&self, details: &CompanyDetails) -> Result<CompanyDetails>;

    /// Replaces the account's company details by ID.
    async fn update_company_details(
        &self,
        id: u64,
        details: &CompanyDetails,
    ) -> Result<CompanyDetails>;

    /// Upserts company details: update when they carry an ID, create
    /// otherwise.
    async fn save_company_details(&self, details: &CompanyDetails) -> Result<CompanyDetails> {
        match details.id {
            Some(id) => self.update_company_details(id, details).await,
            None => self.create_company_details(details).await,
        }
    }

    /// Uploads one image, returning its storage path.
    async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String>;

    /// Uploads several images at once, returning their storage paths in
    /// order. The default just uploads one at a time.
    async fn upload_images(&self, files: Vec<(String, Vec<u8>)>) -> Result<Vec<String>> {
        let mut paths = Vec::with_capacity(files.len());
        for (filename, bytes) in files {
            paths.push(self.upload_image(&filename, bytes).await?);
        }
        Ok(paths)
    }

    /// Deletes an uploaded image by stored filename.
    async fn delete_image(&self, filename: &str) -> Result<()>;

    /// Fetches the signed-in user, validating the bearer token.
    async fn current_user(&self) -> Result<CurrentUser>;
}
