#![allow(clippy::unwrap_used)]

mod helpers;

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use aspekt::batch::BatchControl;
use aspekt::migrate::MigrationOrchestrator;
use aspekt::resolve::{FilesystemStrategy, NamespaceIndex, StrategyRepository};
use aspekt::ModelError;

use helpers::{MIGRATION_STAMP, WorkspaceFixture, aspect_source, migrator, parser, urn};

fn orchestrator(fixture: &WorkspaceFixture) -> MigrationOrchestrator {
    let index = Arc::new(NamespaceIndex::new(fixture.root()));
    let repository = Arc::new(StrategyRepository::new(vec![Arc::new(
        FilesystemStrategy::new(fixture.root(), parser()),
    ) as _]));
    MigrationOrchestrator::new(fixture.root(), repository, migrator(), index)
}

#[test]
fn test_migrate_file_returns_migrated_content() {
    let fixture = WorkspaceFixture::new();
    let movement = fixture.write_aspect("ns", "1.0.0", "Movement");

    let migrated = orchestrator(&fixture).migrate_file(&movement).unwrap();
    assert!(migrated.starts_with(MIGRATION_STAMP));
}

#[test]
fn test_migrate_file_wraps_migrator_failure() {
    let fixture = WorkspaceFixture::new();
    fixture.write_model(
        "ns",
        "1.0.0",
        "Movement.ttl",
        &format!(
            "# unmigratable\n{}",
            aspect_source("ns", "1.0.0", "Movement", &[])
        ),
    );

    let err = orchestrator(&fixture)
        .migrate_file(&urn("ns", "1.0.0", "Movement"))
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidModel(_)));
}

#[test]
fn test_migrate_file_missing_model_raises() {
    let fixture = WorkspaceFixture::new();
    let err = orchestrator(&fixture)
        .migrate_file(&urn("ns", "1.0.0", "Nowhere"))
        .unwrap_err();
    assert!(matches!(err, ModelError::FileNotFound(_)));
}

#[test]
fn test_one_failure_never_stops_the_batch() {
    let fixture = WorkspaceFixture::new();
    for element in ["A", "B", "D", "E"] {
        fixture.write_aspect("ns", "1.0.0", element);
    }
    // C sorts into the middle of the namespace and fails to migrate.
    fixture.write_model(
        "ns",
        "1.0.0",
        "C.ttl",
        &format!("# unmigratable\n{}", aspect_source("ns", "1.0.0", "C", &[])),
    );

    let reports = orchestrator(&fixture).migrate_workspace(&BatchControl::new());
    assert_eq!(reports.len(), 1);
    let files = &reports[0].files;
    assert_eq!(files.len(), 5);
    assert_eq!(files.iter().filter(|f| !f.success).count(), 1);
    assert!(!files[2].success, "C.ttl is the failing file");
    // Files after the failure were still attempted and succeeded.
    assert!(files[3].success);
    assert!(files[4].success);
}

#[test]
fn test_successful_migration_rewrites_files() {
    let fixture = WorkspaceFixture::new();
    fixture.write_aspect("ns", "1.0.0", "Movement");

    let reports = orchestrator(&fixture).migrate_workspace(&BatchControl::new());
    assert!(reports[0].files[0].success);

    let content = fs::read_to_string(fixture.model_path("ns", "1.0.0", "Movement.ttl")).unwrap();
    assert!(content.starts_with(MIGRATION_STAMP));
}

#[test]
fn test_failed_file_is_left_untouched() {
    let fixture = WorkspaceFixture::new();
    let original = format!("# unmigratable\n{}", aspect_source("ns", "1.0.0", "C", &[]));
    fixture.write_model("ns", "1.0.0", "C.ttl", &original);

    orchestrator(&fixture).migrate_workspace(&BatchControl::new());
    let after = fs::read_to_string(fixture.model_path("ns", "1.0.0", "C.ttl")).unwrap();
    assert_eq!(after, original);
}

#[test]
fn test_reports_are_grouped_per_namespace() {
    let fixture = WorkspaceFixture::new();
    fixture.write_aspect("ns.one", "1.0.0", "A");
    fixture.write_aspect("ns.two", "2.0.0", "B");

    let reports = orchestrator(&fixture).migrate_workspace(&BatchControl::new());
    let keys: Vec<_> = reports.iter().map(|r| r.namespace.as_str()).collect();
    assert_eq!(keys, vec!["ns.one:1.0.0", "ns.two:2.0.0"]);
}

#[test]
fn test_cancellation_stops_before_the_next_file() {
    let fixture = WorkspaceFixture::new();
    fixture.write_aspect("ns", "1.0.0", "A");
    fixture.write_aspect("ns", "1.0.0", "B");

    let control = BatchControl::new();
    control.cancel_handle().cancel();
    let reports = orchestrator(&fixture).migrate_workspace(&control);
    assert!(reports.is_empty());
}

#[test]
fn test_passed_deadline_reports_current_file_failed() {
    let fixture = WorkspaceFixture::new();
    fixture.write_aspect("ns", "1.0.0", "A");
    fixture.write_aspect("ns", "1.0.0", "B");

    let control = BatchControl::with_deadline(Instant::now());
    let reports = orchestrator(&fixture).migrate_workspace(&control);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].files.len(), 1);
    assert!(!reports[0].files[0].success);
}
