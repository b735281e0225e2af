use std::sync::Arc;

use jaunt_core::api::InMemoryApi;
use jaunt_core::params::NewItinerary;
use jaunt_core::{AuthoringSession, SessionBuilder};
use tempfile::TempDir;

/// Helper function to create an authoring session against a fresh
/// in-memory backend
pub fn create_test_session(title: &str) -> (TempDir, Arc<InMemoryApi>, AuthoringSession) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let scratch_path = temp_dir.path().join("package-scratch.json");
    let api = Arc::new(InMemoryApi::new());
    let session = SessionBuilder::new(api.clone())
        .with_scratch_path(Some(scratch_path))
        .start(NewItinerary {
            title: title.to_string(),
            cover_image: None,
        })
        .expect("Failed to start session");
    (temp_dir, api, session)
}
