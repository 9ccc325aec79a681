//! Resolution against the entries of an open package archive.

use std::io::{Cursor, Read};
use std::sync::Arc;

use indexmap::IndexMap;
use zip::ZipArchive;

use crate::base::constants::MODEL_EXTENSION;
use crate::base::{ModelLocation, ModelUrn};
use crate::core::ModelError;
use crate::graph::TurtleParser;
use crate::resolve::strategy::{ResolutionStrategy, ResolvedModel, StrategyKind};

/// Resolves a URN against entries already extracted from an archive, not the
/// live filesystem. Scoped to one open package.
pub struct PackageStrategy {
    entries: IndexMap<String, String>,
    parser: Arc<dyn TurtleParser>,
}

impl PackageStrategy {
    /// Builds a strategy over already-extracted entries, keyed by
    /// workspace-relative entry name.
    pub fn from_entries(entries: IndexMap<String, String>, parser: Arc<dyn TurtleParser>) -> Self {
        Self { entries, parser }
    }

    /// Extracts all model entries of a ZIP archive into memory.
    pub fn from_archive(bytes: &[u8], parser: Arc<dyn TurtleParser>) -> Result<Self, ModelError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ModelError::file_read(format!("failed to open archive: {e}")))?;

        let mut entries = IndexMap::new();
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| ModelError::file_read(format!("failed to read entry: {e}")))?;
            if entry.is_dir() || !entry.name().ends_with(&format!(".{MODEL_EXTENSION}")) {
                continue;
            }
            let name = entry.name().to_string();
            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .map_err(|e| ModelError::file_read(format!("{name}: {e}")))?;
            entries.insert(name, content);
        }
        Ok(Self::from_entries(entries, parser))
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ResolutionStrategy for PackageStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Package
    }

    fn apply(&self, urn: &str) -> Result<ResolvedModel, ModelError> {
        if urn.trim().is_empty() {
            return Err(ModelError::invalid_model("urn is not set"));
        }
        let requested: ModelUrn = urn.parse()?;
        let location = ModelLocation::from_urn(&requested);

        let content = self
            .entries
            .get(&location.entry_name())
            .ok_or_else(|| {
                ModelError::file_not_found(format!("no package entry for {requested}"))
            })?;
        let graph = self
            .parser
            .parse(content)
            .map_err(|e| ModelError::invalid_model(format!("{}: {e}", location.entry_name())))?;

        if !graph.defines_subject(urn) {
            return Err(ModelError::urn_not_found(format!(
                "package entry {} does not define {requested}",
                location.entry_name()
            )));
        }

        Ok(ResolvedModel {
            urn: requested,
            graph,
            location: Some(location),
        })
    }
}
