//! Single-model service facade: what an HTTP layer would call for
//! get/save/delete and the namespace mapping.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::base::{ModelLocation, ModelUrn, encode_urn};
use crate::core::ModelError;
use crate::core::file_io::atomic_write;
use crate::graph::{self, TurtleParser};
use crate::resolve::index::IndexSnapshot;
use crate::resolve::{NamespaceIndex, ResolvedModel, StrategyKind, StrategyRepository};

/// Operations over single persisted models. Every write invalidates the
/// namespace index key it touches.
pub struct ModelService {
    root: PathBuf,
    parser: Arc<dyn TurtleParser>,
    repository: Arc<StrategyRepository>,
    index: Arc<NamespaceIndex>,
}

impl ModelService {
    pub fn new(
        root: impl Into<PathBuf>,
        parser: Arc<dyn TurtleParser>,
        repository: Arc<StrategyRepository>,
        index: Arc<NamespaceIndex>,
    ) -> Self {
        Self {
            root: root.into(),
            parser,
            repository,
            index,
        }
    }

    /// Resolves a URN through the given strategy kind.
    pub fn resolve(&self, kind: StrategyKind, urn: &str) -> Result<ResolvedModel, ModelError> {
        self.repository.strategy(kind)?.apply(urn)
    }

    /// Resolves a URN against the persisted workspace.
    pub fn get(&self, urn: &str) -> Result<ResolvedModel, ModelError> {
        self.resolve(StrategyKind::Filesystem, urn)
    }

    /// The `namespace:version` → filenames mapping.
    pub fn namespaces(&self, refresh: bool) -> IndexSnapshot {
        self.index.get(refresh)
    }

    /// Persists model content at its conventional path. The subject URN is
    /// taken from the content's own declaration; the write is atomic.
    pub fn save(&self, content: &str) -> Result<ModelUrn, ModelError> {
        let parsed = self
            .parser
            .parse(content)
            .map_err(|e| ModelError::invalid_model(e.to_string()))?;
        let urn = graph::declared_urn(&parsed)?;

        let path = self.root.join(encode_urn(&urn));
        atomic_write(&path, content.as_bytes())
            .map_err(|e| ModelError::file_read(format!("{}: {e}", path.display())))?;
        self.index.invalidate(urn.namespace(), urn.version());
        tracing::debug!(%urn, "saved model");
        Ok(urn)
    }

    /// Deletes the model file a URN names and prunes now-empty directories.
    pub fn delete(&self, urn: &str) -> Result<(), ModelError> {
        let urn: ModelUrn = urn.parse()?;
        let location = ModelLocation::from_urn(&urn);
        let path = self.root.join(location.relative_path());
        if !path.is_file() {
            return Err(ModelError::file_not_found(format!(
                "no file for {urn} at {}",
                path.display()
            )));
        }
        fs::remove_file(&path)
            .map_err(|e| ModelError::file_read(format!("{}: {e}", path.display())))?;

        // Prune the version and namespace directories if they emptied out.
        let version_dir = self.root.join(location.namespace()).join(location.version());
        let _ = fs::remove_dir(&version_dir);
        let _ = fs::remove_dir(self.root.join(location.namespace()));

        self.index.invalidate(urn.namespace(), urn.version());
        tracing::debug!(%urn, "deleted model");
        Ok(())
    }
}
