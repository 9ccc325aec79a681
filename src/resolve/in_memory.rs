//! Resolution against an unsaved editor buffer.

use std::sync::Arc;

use crate::base::ModelUrn;
use crate::core::ModelError;
use crate::graph::{self, TurtleParser};
use crate::resolve::filesystem::FilesystemStrategy;
use crate::resolve::strategy::{ResolutionStrategy, ResolvedModel, StrategyKind};

/// Wraps content that is not yet persisted.
///
/// An external reference always prefers what is already saved on disk; a
/// self-reference is served from the unsaved buffer. When both the buffer and
/// a stale on-disk file define the buffer's own subject, the buffer wins: it
/// is the freshest truth for the model being edited, while disk is the truth
/// for everything it depends on.
pub struct InMemoryStrategy {
    content: String,
    parser: Arc<dyn TurtleParser>,
    filesystem: Arc<FilesystemStrategy>,
}

impl InMemoryStrategy {
    pub fn new(
        content: impl Into<String>,
        parser: Arc<dyn TurtleParser>,
        filesystem: Arc<FilesystemStrategy>,
    ) -> Self {
        Self {
            content: content.into(),
            parser,
            filesystem,
        }
    }

    /// The URN the buffer declares as its own subject, if the buffer parses
    /// and declares one.
    fn own_subject(&self) -> Option<ModelUrn> {
        let parsed = self.parser.parse(&self.content).ok()?;
        graph::declared_urn(&parsed).ok()
    }
}

impl ResolutionStrategy for InMemoryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InMemory
    }

    fn apply(&self, urn: &str) -> Result<ResolvedModel, ModelError> {
        if urn.trim().is_empty() {
            return Err(ModelError::invalid_model("urn is not set"));
        }
        let requested: ModelUrn = urn.parse()?;

        // Disk candidate first: dependency references resolve to saved files.
        if let Ok(candidate) = self.filesystem.load(&requested) {
            if self.own_subject().as_ref() != Some(&requested) {
                return Ok(candidate);
            }
            tracing::debug!(%requested, "self-reference, serving from unsaved buffer");
        }

        let parsed = self
            .parser
            .parse(&self.content)
            .map_err(|e| ModelError::invalid_model(format!("unsaved content: {e}")))?;
        if parsed.defines_subject(urn) {
            Ok(ResolvedModel {
                urn: requested,
                graph: parsed,
                location: None,
            })
        } else {
            Err(ModelError::urn_not_found(format!(
                "unsaved content does not define {requested}"
            )))
        }
    }
}
