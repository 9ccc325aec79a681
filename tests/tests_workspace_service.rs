#![allow(clippy::unwrap_used)]

mod helpers;

use std::sync::Arc;

use aspekt::resolve::{FilesystemStrategy, NamespaceIndex, StrategyRepository};
use aspekt::workspace::ModelService;
use aspekt::ModelError;

use helpers::{WorkspaceFixture, aspect_source, parser, urn};

fn service(fixture: &WorkspaceFixture) -> ModelService {
    let index = Arc::new(NamespaceIndex::new(fixture.root()));
    let repository = Arc::new(StrategyRepository::new(vec![Arc::new(
        FilesystemStrategy::new(fixture.root(), parser()),
    ) as _]));
    ModelService::new(fixture.root(), parser(), repository, index)
}

#[test]
fn test_save_derives_path_from_declared_subject() {
    let fixture = WorkspaceFixture::new();
    let svc = service(&fixture);

    let saved = svc
        .save(&aspect_source("org.eclipse.examples", "1.0.0", "Movement", &[]))
        .unwrap();
    assert_eq!(saved.to_string(), urn("org.eclipse.examples", "1.0.0", "Movement"));
    assert!(
        fixture
            .model_path("org.eclipse.examples", "1.0.0", "Movement.ttl")
            .is_file()
    );
}

#[test]
fn test_save_shows_up_in_namespaces_without_explicit_refresh() {
    let fixture = WorkspaceFixture::new();
    let svc = service(&fixture);

    // Populate the cache first so the save has a snapshot to invalidate.
    assert!(svc.namespaces(false).is_empty());
    svc.save(&aspect_source("ns", "1.0.0", "Movement", &[])).unwrap();

    let snapshot = svc.namespaces(false);
    assert_eq!(
        snapshot.get("ns:1.0.0").unwrap(),
        &vec!["Movement.ttl".to_string()]
    );
}

#[test]
fn test_save_without_declared_subject_is_invalid() {
    let fixture = WorkspaceFixture::new();
    let err = service(&fixture)
        .save("urn:samm:ns:1.0.0#A urn:samm:ns:1.0.0#p \"55\"\n")
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidModel(_)));
}

#[test]
fn test_get_round_trips_a_saved_model() {
    let fixture = WorkspaceFixture::new();
    let svc = service(&fixture);

    let saved = svc.save(&aspect_source("ns", "1.0.0", "Movement", &[])).unwrap();
    let resolved = svc.get(&saved.to_string()).unwrap();
    assert_eq!(resolved.urn, saved);
}

#[test]
fn test_delete_removes_file_and_prunes_directories() {
    let fixture = WorkspaceFixture::new();
    let svc = service(&fixture);
    let movement = fixture.write_aspect("ns", "1.0.0", "Movement");

    svc.delete(&movement).unwrap();
    assert!(!fixture.model_path("ns", "1.0.0", "Movement.ttl").exists());
    assert!(!fixture.root().join("ns").exists(), "empty dirs are pruned");

    let err = svc.get(&movement).unwrap_err();
    assert!(matches!(err, ModelError::FileNotFound(_)));
}

#[test]
fn test_delete_keeps_non_empty_directories() {
    let fixture = WorkspaceFixture::new();
    let svc = service(&fixture);
    let movement = fixture.write_aspect("ns", "1.0.0", "Movement");
    fixture.write_aspect("ns", "1.0.0", "Velocity");

    svc.delete(&movement).unwrap();
    assert!(fixture.model_path("ns", "1.0.0", "Velocity.ttl").is_file());
}

#[test]
fn test_delete_missing_model_is_file_not_found() {
    let fixture = WorkspaceFixture::new();
    let err = service(&fixture)
        .delete(&urn("ns", "1.0.0", "Nowhere"))
        .unwrap_err();
    assert!(matches!(err, ModelError::FileNotFound(_)));
}
