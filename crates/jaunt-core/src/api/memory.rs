//! In-memory implementation of the backend contract, for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::error::{AuthoringError, Result};
use crate::models::{CompanyDetails, Itinerary, Package, Visibility};

use super::types::{CurrentUser, SharePayload, ShareUser};
use super::TravelApi;

struct MemoryState {
    itineraries: HashMap<u64, Itinerary>,
    packages: HashMap<u64, Package>,
    company: Option<CompanyDetails>,
    uploaded_images: Vec<String>,
    deleted_images: Vec<String>,
    next_id: u64,
    /// Remaining itinerary writes to fail with a 500
    fail_itinerary_writes: u32,
    /// Remaining package writes to fail with a 500
    fail_package_writes: u32,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            itineraries: HashMap::new(),
            packages: HashMap::new(),
            company: None,
            uploaded_images: Vec::new(),
            deleted_images: Vec::new(),
            next_id: 1,
            fail_itinerary_writes: 0,
            fail_package_writes: 0,
        }
    }
}

impl MemoryState {
    fn assign_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// A faithful in-process stand-in for the backend.
///
/// Behaves like the real API for the flows the session exercises: IDs and
/// share tokens are assigned on create, updates replace whole resources, and
/// unknown IDs come back as not-found errors. Writes can be made to fail on
/// demand to exercise partial-save handling.
#[derive(Default)]
pub struct InMemoryApi {
    state: RwLock<MemoryState>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` itinerary writes fail with a server error.
    pub async fn fail_itinerary_writes(&self, count: u32) {
        self.state.write().await.fail_itinerary_writes = count;
    }

    /// Makes the next `count` package writes fail with a server error.
    pub async fn fail_package_writes(&self, count: u32) {
        self.state.write().await.fail_package_writes = count;
    }

    /// Number of stored itineraries.
    pub async fn itinerary_count(&self) -> usize {
        self.state.read().await.itineraries.len()
    }

    /// Number of stored packages.
    pub async fn package_count(&self) -> usize {
        self.state.read().await.packages.len()
    }

    /// A stored itinerary, by ID.
    pub async fn stored_itinerary(&self, id: u64) -> Option<Itinerary> {
        self.state.read().await.itineraries.get(&id).cloned()
    }

    /// All stored packages, in ID order.
    pub async fn stored_packages(&self) -> Vec<Package> {
        let state = self.state.read().await;
        let mut packages: Vec<Package> = state.packages.values().cloned().collect();
        packages.sort_by_key(|p| p.id);
        packages
    }

    /// Filenames deleted through the image endpoint, in call order.
    pub async fn deleted_images(&self) -> Vec<String> {
        self.state.read().await.deleted_images.clone()
    }

    /// Filenames uploaded through the image endpoint, in call order.
    pub async fn uploaded_images(&self) -> Vec<String> {
        self.state.read().await.uploaded_images.clone()
    }
}

#[async_trait]
impl TravelApi for InMemoryApi {
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>> {
        let state = self.state.read().await;
        let mut itineraries: Vec<Itinerary> = state.itineraries.values().cloned().collect();
        itineraries.sort_by_key(|i| i.id);
        Ok(itineraries)
    }

    async fn get_itinerary(&self, id: u64) -> Result<Itinerary> {
        self.state
            .read()
            .await
            .itineraries
            .get(&id)
            .cloned()
            .ok_or(AuthoringError::ItineraryNotFound { id })
    }

    async fn create_itinerary(&self, itinerary: &Itinerary) -> Result<Itinerary> {
        let mut state = self.state.write().await;
        if state.fail_itinerary_writes > 0 {
            state.fail_itinerary_writes -= 1;
            return Err(AuthoringError::Backend { status: 500 });
        }
        let id = state.assign_id();
        let now = Timestamp::now();
        let mut stored = itinerary.clone();
        stored.id = Some(id);
        stored.user_id = Some(1);
        stored.share_uuid = Some(format!("shr{id:06}"));
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        state.itineraries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_itinerary(&self, id: u64, itinerary: &Itinerary) -> Result<Itinerary> {
        let mut state = self.state.write().await;
        if state.fail_itinerary_writes > 0 {
            state.fail_itinerary_writes -= 1;
            return Err(AuthoringError::Backend { status: 500 });
        }
        let existing = state
            .itineraries
            .get(&id)
            .cloned()
            .ok_or(AuthoringError::ItineraryNotFound { id })?;
        // Whole-resource replacement; server-managed fields stay server-owned.
        let mut stored = itinerary.clone();
        stored.id = Some(id);
        stored.user_id = existing.user_id;
        stored.created_at = existing.created_at;
        stored.share_uuid = existing.share_uuid;
        stored.updated_at = Some(Timestamp::now());
        state.itineraries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_itinerary(&self, id: u64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .itineraries
            .remove(&id)
            .map(|_| ())
            .ok_or(AuthoringError::ItineraryNotFound { id })
    }

    async fn list_packages(&self) -> Result<Vec<Package>> {
        Ok(self.stored_packages().await)
    }

    async fn create_package(&self, package: &Package) -> Result<Package> {
        let mut state = self.state.write().await;
        if state.fail_package_writes > 0 {
            state.fail_package_writes -= 1;
            return Err(AuthoringError::Backend { status: 500 });
        }
        let id = state.assign_id();
        let mut stored = package.clone();
        stored.id = Some(id);
        state.packages.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_package(&self, id: u64, package: &Package) -> Result<Package> {
        let mut state = self.state.write().await;
        if state.fail_package_writes > 0 {
            state.fail_package_writes -= 1;
            return Err(AuthoringError::Backend { status: 500 });
        }
        if !state.packages.contains_key(&id) {
            return Err(AuthoringError::PackageNotFound { id });
        }
        let mut stored = package.clone();
        stored.id = Some(id);
        state.packages.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_package(&self, id: u64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .packages
            .remove(&id)
            .map(|_| ())
            .ok_or(AuthoringError::PackageNotFound { id })
    }

    async fn shared_itinerary(&self, share_uuid: &str) -> Result<SharePayload> {
        let state = self.state.read().await;
        let itinerary = state
            .itineraries
            .values()
            .find(|i| {
                i.visibility == Visibility::Published
                    && i.share_uuid.as_deref() == Some(share_uuid)
            })
            .cloned()
            .ok_or_else(|| AuthoringError::ShareUnavailable {
                token: share_uuid.to_string(),
            })?;
        let packages = state
            .packages
            .values()
            .filter(|p| p.itinerary_id == itinerary.id)
            .cloned()
            .collect();
        Ok(SharePayload {
            itinerary,
            packages,
            user: Some(ShareUser {
                company_details: state.company.clone(),
            }),
        })
    }

    async fn company_details(&self) -> Result<Option<CompanyDetails>> {
        Ok(self.state.read().await.company.clone())
    }

    async fn create_company_details(&self, details: &CompanyDetails) -> Result<CompanyDetails> {
        let mut state = self.state.write().await;
        let id = state.assign_id();
        let mut stored = details.clone();
        stored.id = Some(id);
        state.company = Some(stored.clone());
        Ok(stored)
    }

    async fn update_company_details(
        &self,
        id: u64,
        details: &CompanyDetails,
    ) -> Result<CompanyDetails> {
        let mut state = self.state.write().await;
        let mut stored = details.clone();
        stored.id = Some(id);
        state.company = Some(stored.clone());
        Ok(stored)
    }

    async fn upload_image(&self, filename: &str, _bytes: Vec<u8>) -> Result<String> {
        let mut state = self.state.write().await;
        state.uploaded_images.push(filename.to_string());
        Ok(format!("/storage/images/{filename}"))
    }

    async fn delete_image(&self, filename: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.deleted_images.push(filename.to_string());
        Ok(())
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        Ok(CurrentUser {
            id: 1,
            name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
        })
    }
}
