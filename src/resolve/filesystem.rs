//! Filesystem-backed resolution.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::base::{ModelLocation, ModelUrn};
use crate::core::ModelError;
use crate::graph::TurtleParser;
use crate::resolve::strategy::{ResolutionStrategy, ResolvedModel, StrategyKind};

/// Resolves a URN against the persisted workspace tree.
pub struct FilesystemStrategy {
    root: PathBuf,
    parser: Arc<dyn TurtleParser>,
}

impl FilesystemStrategy {
    pub fn new(root: impl Into<PathBuf>, parser: Arc<dyn TurtleParser>) -> Self {
        Self {
            root: root.into(),
            parser,
        }
    }

    /// Loads and parses the file the URN's path names. The parsed content
    /// must actually define the requested subject; path and content can
    /// disagree when a file was renamed without updating its subject URI.
    pub(crate) fn load(&self, urn: &ModelUrn) -> Result<ResolvedModel, ModelError> {
        let location = ModelLocation::from_urn(urn);
        let path = self.root.join(location.relative_path());
        if !path.is_file() {
            return Err(ModelError::file_not_found(format!(
                "no file for {urn} at {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ModelError::file_read(format!("{}: {e}", path.display())))?;
        let graph = self
            .parser
            .parse(&content)
            .map_err(|e| ModelError::invalid_model(format!("{}: {e}", path.display())))?;

        if !graph.defines_subject(&urn.to_string()) {
            return Err(ModelError::urn_not_found(format!(
                "{} does not define {urn}",
                path.display()
            )));
        }

        Ok(ResolvedModel {
            urn: urn.clone(),
            graph,
            location: Some(location),
        })
    }
}

impl ResolutionStrategy for FilesystemStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Filesystem
    }

    fn apply(&self, urn: &str) -> Result<ResolvedModel, ModelError> {
        if urn.trim().is_empty() {
            return Err(ModelError::invalid_model("urn is not set"));
        }
        let urn: ModelUrn = urn.parse()?;
        self.load(&urn)
    }
}
