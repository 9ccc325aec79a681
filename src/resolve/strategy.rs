//! The resolution-strategy contract.

use std::fmt;

use crate::base::{ModelLocation, ModelUrn};
use crate::core::ModelError;
use crate::graph::Graph;

/// The closed set of resolution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Resolves against files persisted in the workspace.
    Filesystem,
    /// Resolves against an unsaved editor buffer, falling back to disk.
    InMemory,
    /// Resolves against the extracted entries of an open package archive.
    Package,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Filesystem => "filesystem",
            StrategyKind::InMemory => "in-memory",
            StrategyKind::Package => "package",
        };
        f.write_str(name)
    }
}

/// A successfully resolved model: the requested URN, its parsed graph, and
/// where it came from (`None` for unsaved buffers and package entries).
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub urn: ModelUrn,
    pub graph: Graph,
    pub location: Option<ModelLocation>,
}

/// Given a URN, produce the model content containing it.
pub trait ResolutionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn apply(&self, urn: &str) -> Result<ResolvedModel, ModelError>;
}

impl fmt::Debug for dyn ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionStrategy")
            .field("kind", &self.kind())
            .finish()
    }
}
