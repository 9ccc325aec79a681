//! Package export: the requested models plus their transitive reference
//! closure, written into a flat ZIP mirroring workspace-relative paths.

use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::base::constants::META_MODEL_NAMESPACE_PREFIX;
use crate::base::{ModelLocation, ModelUrn, decode_relative};
use crate::batch::BatchControl;
use crate::core::ModelError;
use crate::package::PackageService;
use crate::resolve::StrategyKind;

impl PackageService {
    /// Exports the given workspace-relative model filenames and every file
    /// they transitively depend on. Fails with `Generation` when any required
    /// dependency cannot be resolved.
    pub fn export(
        &self,
        filenames: &[String],
        control: &BatchControl,
    ) -> Result<Vec<u8>, ModelError> {
        let strategy = self.repository.strategy(StrategyKind::Filesystem)?;

        let mut queue: VecDeque<ModelUrn> = VecDeque::new();
        for name in filenames {
            let urn = decode_relative(Path::new(name))
                .map_err(|e| ModelError::generation(format!("requested file '{name}': {e}")))?;
            queue.push_back(urn);
        }

        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut entries: IndexMap<String, String> = IndexMap::new();
        while let Some(urn) = queue.pop_front() {
            if control.is_cancelled() {
                return Err(ModelError::generation("export cancelled"));
            }
            if control.deadline_passed() {
                return Err(ModelError::generation("export deadline exceeded"));
            }
            let urn_text = urn.to_string();
            if !visited.insert(urn_text.clone()) {
                continue;
            }

            let resolved = strategy.apply(&urn_text).map_err(|e| {
                ModelError::generation(format!("cannot resolve dependency {urn_text}: {e}"))
            })?;
            let location = ModelLocation::from_urn(&resolved.urn);
            entries.insert(location.entry_name(), resolved.graph.source().to_string());

            for reference in resolved.graph.referenced_urns() {
                let referenced: ModelUrn = reference.parse().map_err(|e| {
                    ModelError::generation(format!("reference '{reference}': {e}"))
                })?;
                if referenced.namespace().starts_with(META_MODEL_NAMESPACE_PREFIX) {
                    continue;
                }
                queue.push_back(referenced);
            }
        }

        tracing::debug!(files = entries.len(), "writing export archive");
        write_archive(&entries)
    }
}

fn write_archive(entries: &IndexMap<String, String>) -> Result<Vec<u8>, ModelError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        zip.start_file(name.as_str(), options)
            .map_err(|e| ModelError::generation(format!("failed to create entry {name}: {e}")))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| ModelError::generation(format!("failed to write entry {name}: {e}")))?;
    }
    zip.finish()
        .map_err(|e| ModelError::generation(format!("failed to finalize archive: {e}")))?;
    Ok(buffer.into_inner())
}
