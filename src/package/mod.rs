//! Package service: bulk ZIP import, export, and workspace backup, built on
//! top of the resolution strategies.

mod backup;
mod import;
mod export;
mod report;

pub use report::{EntryStatus, FileValidationReport, MissingElement, ValidationEntry};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::graph::{AspectValidator, TurtleParser};
use crate::resolve::{NamespaceIndex, StrategyRepository};

/// Drives batched operations over the workspace. Per-file failures go into
/// the returned report; they never abort the batch.
pub struct PackageService {
    root: PathBuf,
    parser: Arc<dyn TurtleParser>,
    validator: Arc<dyn AspectValidator>,
    repository: Arc<StrategyRepository>,
    index: Arc<NamespaceIndex>,
}

impl PackageService {
    pub fn new(
        root: impl Into<PathBuf>,
        parser: Arc<dyn TurtleParser>,
        validator: Arc<dyn AspectValidator>,
        repository: Arc<StrategyRepository>,
        index: Arc<NamespaceIndex>,
    ) -> Self {
        Self {
            root: root.into(),
            parser,
            validator,
            repository,
            index,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
