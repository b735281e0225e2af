//! Tests for the authoring session and its save flow.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jiff::civil::date;
use jiff::Zoned;
use tempfile::TempDir;

use crate::api::InMemoryApi;
use crate::error::AuthoringError;
use crate::models::{EventDetails, Visibility, MAX_EVENT_IMAGES, PLACEHOLDER};
use crate::params::{EventForm, NewItinerary, PackageForm, SaveEvent};
use crate::validate::MAX_CONTENT_BYTES;
use crate::viewer;

use super::{AuthoringSession, SaveMode, SessionBuilder, SessionState};

fn test_environment() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let scratch = dir.path().join("package-scratch.json");
    (dir, scratch)
}

fn start_session(api: &Arc<InMemoryApi>, scratch: &Path) -> AuthoringSession {
    SessionBuilder::new(api.clone())
        .with_scratch_path(Some(scratch))
        .start(NewItinerary {
            title: "Goa Trip".to_string(),
            cover_image: None,
        })
        .expect("Failed to start session")
}

fn activity(title: &str) -> SaveEvent {
    SaveEvent {
        form: EventForm {
            title: title.to_string(),
            details: EventDetails::Activity { provider: None },
            ..Default::default()
        },
        editing: None,
    }
}

fn mumbai_package() -> PackageForm {
    PackageForm {
        start_location: "Mumbai".to_string(),
        price: 4999.0,
        people: Some(2),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_draft_save_records_identity() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    session
        .save_event(activity("Beach walk"))
        .expect("Failed to save event");

    let report = session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save draft");

    assert_eq!(report.itinerary.id, Some(1));
    assert_eq!(report.itinerary.visibility, Visibility::Draft);
    assert!(report.itinerary.share_uuid.is_some());
    assert!(report.content_bytes > 0);
    assert_eq!(session.document().itinerary().id, Some(1));
    assert_eq!(api.itinerary_count().await, 1);
}

#[tokio::test]
async fn test_blank_title_rejected_before_network() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.set_title("   ");

    let err = session
        .save(SaveMode::Draft)
        .await
        .expect_err("Blank title should not save");

    assert!(matches!(err, AuthoringError::Validation { .. }));
    assert_eq!(api.itinerary_count().await, 0);
}

#[tokio::test]
async fn test_publish_requires_content() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);

    let err = session
        .save(SaveMode::Publish)
        .await
        .expect_err("Empty itinerary should not publish");

    assert!(matches!(err, AuthoringError::Validation { .. }));
    assert_eq!(api.itinerary_count().await, 0);

    // The same itinerary is still fine as a draft.
    session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save empty draft");
    assert_eq!(api.itinerary_count().await, 1);
}

#[tokio::test]
async fn test_oversized_content_rejected_before_network() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();

    let mut params = activity("Notes dump");
    params.form.notes = Some("x".repeat(MAX_CONTENT_BYTES as usize));
    session.save_event(params).expect("Failed to save event");

    let err = session
        .save(SaveMode::Draft)
        .await
        .expect_err("Oversized content should not save");

    assert!(matches!(err, AuthoringError::ContentTooLarge { .. }));
    assert_eq!(api.itinerary_count().await, 0);
}

#[tokio::test]
async fn test_publish_is_one_way() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    session
        .save_event(activity("Beach walk"))
        .expect("Failed to save event");

    session
        .save(SaveMode::Publish)
        .await
        .expect("Failed to publish");
    let stored = api
        .stored_itinerary(1)
        .await
        .expect("Itinerary should be stored");
    assert!(stored.visibility.is_published());
    assert!(api.stored_packages().await[0].visibility.is_published());

    // A later draft save never demotes a published itinerary.
    let report = session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save after publishing");
    assert_eq!(report.itinerary.visibility, Visibility::Published);
    let stored = api
        .stored_itinerary(1)
        .await
        .expect("Itinerary should be stored");
    assert!(stored.visibility.is_published());
}

#[tokio::test]
async fn test_default_package_backfills_placeholders() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();

    session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save draft");

    let packages = api.stored_packages().await;
    assert_eq!(packages.len(), 1);
    let package = &packages[0];
    assert_eq!(package.itinerary_id, Some(1));
    assert_eq!(package.title, "Goa Trip");
    assert_eq!(package.start_location, PLACEHOLDER);
    assert_eq!(package.locations, vec![PLACEHOLDER.to_string()]);
    assert_eq!(package.inclusions, vec![PLACEHOLDER.to_string()]);
    assert_eq!(package.exclusions, vec![PLACEHOLDER.to_string()]);
    assert!(package.valid_till > Zoned::now().date());
}

#[tokio::test]
async fn test_staged_package_applied_on_save() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.stage_package(mumbai_package());
    assert!(session.pending_package().is_some());
    assert!(scratch.exists());

    session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save draft");

    let packages = api.stored_packages().await;
    assert_eq!(packages[0].start_location, "Mumbai");
    assert_eq!(packages[0].price, 4999.0);
    assert_eq!(packages[0].people, Some(2));
    // The staged form is consumed and its cache cleared.
    assert!(session.pending_package().is_none());
    assert!(!scratch.exists());
    assert!(session.linked_package().is_some());
}

#[tokio::test]
async fn test_package_failure_keeps_staged_form() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    session.stage_package(mumbai_package());
    api.fail_package_writes(1).await;

    let err = session
        .save(SaveMode::Draft)
        .await
        .expect_err("Package write should fail");
    match err {
        AuthoringError::PackagePersist { itinerary_id, .. } => assert_eq!(itinerary_id, 1),
        other => panic!("Unexpected error: {other}"),
    }

    // The itinerary write went through and its identity stuck.
    assert_eq!(api.itinerary_count().await, 1);
    assert_eq!(api.package_count().await, 0);
    assert_eq!(session.document().itinerary().id, Some(1));
    assert!(session.pending_package().is_some());

    // A retry updates the itinerary and creates the package.
    session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to retry save");
    assert_eq!(api.itinerary_count().await, 1);
    assert_eq!(api.package_count().await, 1);
    assert_eq!(api.stored_packages().await[0].start_location, "Mumbai");
    assert!(session.pending_package().is_none());
}

#[tokio::test]
async fn test_repeat_saves_update_in_place() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();

    let first = session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save draft");
    session.set_title("Goa Trip v2");
    let second = session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save again");

    assert_eq!(second.itinerary.id, first.itinerary.id);
    assert_eq!(second.package.id, first.package.id);
    assert_eq!(api.itinerary_count().await, 1);
    assert_eq!(api.package_count().await, 1);
    let stored = api
        .stored_itinerary(1)
        .await
        .expect("Itinerary should be stored");
    assert_eq!(stored.title, "Goa Trip v2");
}

#[tokio::test]
async fn test_library_copies_are_detached() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    let event_id = session
        .save_event(activity("Scuba diving"))
        .expect("Failed to save event");

    let item_id = session
        .add_to_library(event_id)
        .expect("Failed to add to library");
    let edit = {
        let (_, source) = session
            .document()
            .find_event(event_id)
            .expect("Event should exist");
        assert!(source.in_library);
        let mut form = EventForm::from_event(source);
        form.title = "Night scuba".to_string();
        form
    };
    session
        .save_event(SaveEvent {
            form: edit,
            editing: Some(event_id),
        })
        .expect("Failed to edit event");

    let copy_id = session
        .copy_from_library(item_id)
        .expect("Failed to copy from library");
    assert_ne!(copy_id, event_id);
    let (_, copy) = session
        .document()
        .find_event(copy_id)
        .expect("Copy should exist");
    // The library kept the original title; the copy starts outside it.
    assert_eq!(copy.title, "Scuba diving");
    assert!(!copy.in_library);
}

#[tokio::test]
async fn test_remove_event_releases_images() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    let event_id = session
        .save_event(activity("Beach walk"))
        .expect("Failed to save event");

    let path = session
        .attach_image(event_id, "beach.jpg", vec![1, 2, 3])
        .await
        .expect("Failed to attach image");
    assert_eq!(path, "/storage/images/beach.jpg");

    session
        .remove_event(event_id)
        .await
        .expect("Failed to remove event");
    assert_eq!(api.deleted_images().await, vec!["beach.jpg".to_string()]);
}

#[tokio::test]
async fn test_remove_day_releases_event_images() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    let day_id = session.add_day();
    let event_id = session
        .save_event(activity("Beach walk"))
        .expect("Failed to save event");
    session
        .attach_image(event_id, "beach.jpg", vec![1, 2, 3])
        .await
        .expect("Failed to attach image");

    session
        .remove_day(day_id)
        .await
        .expect("Failed to remove day");

    assert_eq!(session.document().itinerary().day_count(), 0);
    assert_eq!(api.deleted_images().await, vec!["beach.jpg".to_string()]);
}

#[tokio::test]
async fn test_attach_image_limit_blocks_upload() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();

    let mut params = activity("Gallery");
    params.form.images = (0..MAX_EVENT_IMAGES).map(|i| format!("img{i}.jpg")).collect();
    let event_id = session.save_event(params).expect("Failed to save event");

    let err = session
        .attach_image(event_id, "extra.jpg", vec![0])
        .await
        .expect_err("Sixth image should be refused");
    assert!(matches!(err, AuthoringError::TooManyImages { .. }));
    assert!(api.uploaded_images().await.is_empty());
}

#[tokio::test]
async fn test_day_mutations_report_misses() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    let day_id = session.add_day();

    assert!(session.set_day_title(day_id, "Arrival"));
    assert!(session.set_day_date(day_id, Some(date(2026, 9, 14))));
    assert!(!session.set_day_title(999, "Ghost"));
    assert!(!session.set_day_date(999, None));
}

#[tokio::test]
async fn test_state_round_trips_through_json() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    let event_id = session
        .save_event(activity("Scuba diving"))
        .expect("Failed to save event");
    session
        .add_to_library(event_id)
        .expect("Failed to add to library");
    session.stage_package(mumbai_package());

    let json = serde_json::to_string(&session.state()).expect("Failed to serialize state");
    let restored: SessionState =
        serde_json::from_str(&json).expect("Failed to deserialize state");
    let resumed = SessionBuilder::new(api.clone())
        .with_scratch_path(Some(&scratch))
        .resume(restored)
        .expect("Failed to resume session");

    assert_eq!(resumed.document().itinerary().title, "Goa Trip");
    assert_eq!(resumed.document().itinerary().event_count(), 1);
    assert_eq!(resumed.library().len(), 1);
    assert!(resumed.pending_package().is_some());
}

#[tokio::test]
async fn test_open_links_existing_package() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    {
        let mut session = start_session(&api, &scratch);
        session.add_day();
        session
            .save_event(activity("Beach walk"))
            .expect("Failed to save event");
        session
            .save(SaveMode::Publish)
            .await
            .expect("Failed to publish");
    }

    let mut reopened = SessionBuilder::new(api.clone())
        .with_scratch_path(Some(&scratch))
        .open(1)
        .await
        .expect("Failed to open itinerary");

    assert_eq!(reopened.document().itinerary().id, Some(1));
    assert!(reopened.linked_package().is_some());

    // Fresh IDs never collide with loaded content.
    reopened.add_day();
    let day_ids: Vec<u64> = reopened
        .document()
        .itinerary()
        .content
        .days
        .iter()
        .map(|day| day.id)
        .collect();
    assert_eq!(day_ids.len(), 2);
    assert_ne!(day_ids[0], day_ids[1]);
}

#[tokio::test]
async fn test_restore_cached_package_after_restart() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    {
        let mut session = start_session(&api, &scratch);
        session.stage_package(mumbai_package());
    }

    let mut session = start_session(&api, &scratch);
    assert!(session.pending_package().is_none());
    assert!(session.restore_cached_package());
    let form = session
        .pending_package()
        .expect("Cached form should be staged");
    assert_eq!(form.start_location, "Mumbai");
}

#[tokio::test]
async fn test_shared_view_follows_publication() {
    let (_dir, scratch) = test_environment();
    let api = Arc::new(InMemoryApi::new());
    let mut session = start_session(&api, &scratch);
    session.add_day();
    session
        .save_event(activity("Beach walk"))
        .expect("Failed to save event");

    session
        .save(SaveMode::Draft)
        .await
        .expect("Failed to save draft");
    let token = session
        .document()
        .itinerary()
        .share_uuid
        .clone()
        .expect("Draft save should assign a share token");

    // Drafts stay private even though the token exists.
    let err = viewer::fetch(api.as_ref(), &token)
        .await
        .expect_err("Draft should not be viewable");
    assert!(matches!(err, AuthoringError::ShareUnavailable { .. }));

    session
        .save(SaveMode::Publish)
        .await
        .expect("Failed to publish");
    let view = viewer::fetch(api.as_ref(), &token)
        .await
        .expect("Failed to fetch shared view");
    assert_eq!(view.itinerary.title, "Goa Trip");
    assert!(view.package.is_some());
}
