//! Migration orchestration: single files raise, the workspace batch reports.

use std::path::PathBuf;
use std::sync::Arc;

use crate::base::{ModelUrn, SchemaPrefix, encode_urn};
use crate::base::constants::MODEL_EXTENSION;
use crate::batch::{BatchControl, FileOutcome};
use crate::core::ModelError;
use crate::core::file_io::atomic_write;
use crate::graph::ModelMigrator;
use crate::resolve::{NamespaceIndex, StrategyKind, StrategyRepository};

/// Per-namespace collection of migration outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMigrationReport {
    /// The `namespace:version` key.
    pub namespace: String,
    pub files: Vec<FileOutcome>,
}

/// Iterates the workspace and drives the external migrator per file.
pub struct MigrationOrchestrator {
    root: PathBuf,
    repository: Arc<StrategyRepository>,
    migrator: Arc<dyn ModelMigrator>,
    index: Arc<NamespaceIndex>,
}

impl MigrationOrchestrator {
    pub fn new(
        root: impl Into<PathBuf>,
        repository: Arc<StrategyRepository>,
        migrator: Arc<dyn ModelMigrator>,
        index: Arc<NamespaceIndex>,
    ) -> Self {
        Self {
            root: root.into(),
            repository,
            migrator,
            index,
        }
    }

    /// Migrates one model, returning the migrated content. Unlike the batch,
    /// this surfaces the first error to the caller.
    pub fn migrate_file(&self, urn: &str) -> Result<String, ModelError> {
        let strategy = self.repository.strategy(StrategyKind::Filesystem)?;
        let resolved = strategy.apply(urn)?;
        let migrated = self
            .migrator
            .migrate(&resolved.graph)
            .map_err(|e| ModelError::invalid_model(format!("migration of {urn} failed: {e}")))?;
        Ok(migrated.source().to_string())
    }

    /// Migrates every indexed file independently and writes migrated content
    /// back atomically. One file's failure never stops the batch; each file
    /// lands in the report as `{name, success}`. Cancellation stops before
    /// the next file; a passed deadline reports the current file failed and
    /// stops.
    pub fn migrate_workspace(&self, control: &BatchControl) -> Vec<NamespaceMigrationReport> {
        let snapshot = self.index.get(true);

        let mut reports = Vec::new();
        let mut stopped = false;
        for (key, filenames) in snapshot.iter() {
            let Some((namespace, version)) = key.split_once(':') else {
                continue;
            };
            let mut files = Vec::new();
            for filename in filenames {
                if control.is_cancelled() {
                    tracing::debug!("workspace migration cancelled");
                    stopped = true;
                    break;
                }
                if control.deadline_passed() {
                    files.push(FileOutcome::failed(filename.clone()));
                    stopped = true;
                    break;
                }
                let success = self.migrate_one(namespace, version, filename);
                files.push(FileOutcome {
                    name: filename.clone(),
                    success,
                });
            }
            if !files.is_empty() {
                reports.push(NamespaceMigrationReport {
                    namespace: key.clone(),
                    files,
                });
            }
            if stopped {
                break;
            }
        }
        reports
    }

    fn migrate_one(&self, namespace: &str, version: &str, filename: &str) -> bool {
        let stem = filename
            .strip_suffix(&format!(".{MODEL_EXTENSION}"))
            .unwrap_or(filename);
        let urn = match ModelUrn::new(SchemaPrefix::Samm, namespace, version, stem) {
            Ok(urn) => urn,
            Err(e) => {
                tracing::warn!(%namespace, %version, %filename, error = %e, "skipping unaddressable file");
                return false;
            }
        };

        match self.migrate_file(&urn.to_string()) {
            Ok(content) => {
                let path = self.root.join(encode_urn(&urn));
                match atomic_write(&path, content.as_bytes()) {
                    Ok(()) => {
                        self.index.invalidate(namespace, version);
                        true
                    }
                    Err(e) => {
                        tracing::warn!(%urn, error = %e, "failed to write migrated content");
                        false
                    }
                }
            }
            Err(e) => {
                tracing::warn!(%urn, error = %e, "migration failed");
                false
            }
        }
    }
}
