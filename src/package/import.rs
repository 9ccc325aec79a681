//! Package import: validate every entry of an uploaded ZIP, then extract the
//! entries the caller confirms.

use std::io::{Cursor, Read};
use std::path::Path;

use rustc_hash::FxHashSet;
use zip::ZipArchive;

use crate::base::constants::{MODEL_EXTENSION, META_MODEL_NAMESPACE_PREFIX, PACKAGE_EXTENSION};
use crate::base::{ModelLocation, ModelUrn, decode_relative, encode_urn};
use crate::batch::{BatchControl, FileOutcome};
use crate::core::file_io::{atomic_write, has_extension};
use crate::core::ModelError;
use crate::graph::{Graph, Violation};
use crate::package::report::{
    EntryStatus, FileValidationReport, MissingElement, ValidationEntry,
};
use crate::package::PackageService;

struct EntryRecord {
    name: String,
    outcome: EntryOutcome,
}

enum EntryOutcome {
    Unreadable(String),
    BadLocation(String),
    Unparseable { location: ModelLocation, message: String },
    Parsed { location: ModelLocation, graph: Graph },
}

impl PackageService {
    /// Validates every model entry of an uploaded ZIP and classifies it as
    /// valid, invalid, or already defined. Nothing is written to the
    /// workspace; extraction happens in [`Self::write_entries`] for entries
    /// the caller confirms.
    pub fn import(
        &self,
        bytes: &[u8],
        upload_name: &str,
        control: &BatchControl,
    ) -> Result<FileValidationReport, ModelError> {
        if !has_extension(Path::new(upload_name), PACKAGE_EXTENSION) {
            return Err(ModelError::file_read(format!(
                "'{upload_name}' is not a package archive"
            )));
        }
        // ZIP files start with PK\x03\x04
        if bytes.len() < 4 || &bytes[0..4] != b"PK\x03\x04" {
            return Err(ModelError::file_read("upload is not a valid ZIP archive"));
        }

        let records = self.read_entries(bytes)?;
        let package_subjects = collect_subjects(&records);

        let mut report = FileValidationReport::new();
        for record in &records {
            if control.is_cancelled() || control.deadline_passed() {
                tracing::debug!("import validation aborted by caller");
                break;
            }
            self.classify(record, &package_subjects, &mut report);
        }
        Ok(report)
    }

    /// Extracts the confirmed entries into the live workspace. Each entry is
    /// all-or-nothing: bytes go to a scratch file that is renamed into place,
    /// so a crash mid-import never leaves a half-written model file. One
    /// entry's failure never stops the rest.
    pub fn write_entries(
        &self,
        bytes: &[u8],
        selected: &[String],
        control: &BatchControl,
    ) -> Result<Vec<FileOutcome>, ModelError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ModelError::file_read(format!("failed to open archive: {e}")))?;

        let mut outcomes = Vec::new();
        for name in selected {
            if control.is_cancelled() {
                tracing::debug!("import extraction cancelled, stopping before {name}");
                break;
            }
            if control.deadline_passed() {
                outcomes.push(FileOutcome::failed(name.clone()));
                break;
            }
            match self.extract_entry(&mut archive, name) {
                Ok(location) => {
                    self.index
                        .invalidate(location.namespace(), location.version());
                    outcomes.push(FileOutcome::succeeded(name.clone()));
                }
                Err(e) => {
                    tracing::warn!(%name, error = %e, "failed to extract package entry");
                    outcomes.push(FileOutcome::failed(name.clone()));
                }
            }
        }
        Ok(outcomes)
    }

    fn extract_entry(
        &self,
        archive: &mut ZipArchive<Cursor<&[u8]>>,
        name: &str,
    ) -> Result<ModelLocation, ModelError> {
        if !has_extension(Path::new(name), MODEL_EXTENSION) {
            return Err(ModelError::file_read(format!(
                "{name}: not a .{MODEL_EXTENSION} model file"
            )));
        }
        let mut entry = archive
            .by_name(name)
            .map_err(|e| ModelError::file_read(format!("{name}: {e}")))?;
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|e| ModelError::file_read(format!("{name}: {e}")))?;

        let urn = decode_relative(Path::new(name))?;
        let location = ModelLocation::from_urn(&urn);
        let target = self.root().join(location.relative_path());
        atomic_write(&target, content.as_bytes())
            .map_err(|e| ModelError::file_read(format!("{}: {e}", target.display())))?;
        Ok(location)
    }

    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<EntryRecord>, ModelError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ModelError::file_read(format!("failed to open archive: {e}")))?;

        let mut records = Vec::new();
        for i in 0..archive.len() {
            let mut entry = match archive.by_index(i) {
                Ok(entry) => entry,
                Err(e) => {
                    records.push(EntryRecord {
                        name: format!("entry #{i}"),
                        outcome: EntryOutcome::Unreadable(e.to_string()),
                    });
                    continue;
                }
            };
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();

            let mut content = String::new();
            if let Err(e) = entry.read_to_string(&mut content) {
                records.push(EntryRecord {
                    name,
                    outcome: EntryOutcome::Unreadable(e.to_string()),
                });
                continue;
            }

            // Only model files are importable; anything else is unresolvable.
            let outcome = if !has_extension(Path::new(&name), MODEL_EXTENSION) {
                EntryOutcome::BadLocation(format!(
                    "entry lacks the .{MODEL_EXTENSION} extension"
                ))
            } else {
                match decode_relative(Path::new(&name)) {
                    Err(e) => EntryOutcome::BadLocation(e.to_string()),
                    Ok(urn) => {
                        let location = ModelLocation::from_urn(&urn);
                        match self.parser.parse(&content) {
                            Ok(graph) => EntryOutcome::Parsed { location, graph },
                            Err(e) => EntryOutcome::Unparseable {
                                location,
                                message: e.to_string(),
                            },
                        }
                    }
                }
            };
            records.push(EntryRecord { name, outcome });
        }
        Ok(records)
    }

    fn classify(
        &self,
        record: &EntryRecord,
        package_subjects: &FxHashSet<String>,
        report: &mut FileValidationReport,
    ) {
        match &record.outcome {
            EntryOutcome::Unreadable(message) | EntryOutcome::BadLocation(message) => {
                report
                    .missing_elements
                    .push(MissingElement::unresolvable_entry(&record.name, message));
            }
            EntryOutcome::Unparseable { location, message } => {
                report.valid_files.push(ValidationEntry {
                    namespace: location.namespace_key(),
                    file_name: record.name.clone(),
                    status: EntryStatus::Invalid,
                    violations: vec![Violation::new(&record.name, message)],
                });
            }
            EntryOutcome::Parsed { location, graph } => {
                let violations = self.validator.validate(graph);
                let exists = self.root().join(location.relative_path()).is_file();
                let status = if exists {
                    EntryStatus::AlreadyDefined
                } else if violations.is_empty() {
                    EntryStatus::Valid
                } else {
                    EntryStatus::Invalid
                };
                tracing::trace!(entry = %record.name, ?status, "classified package entry");
                report.valid_files.push(ValidationEntry {
                    namespace: location.namespace_key(),
                    file_name: record.name.clone(),
                    status,
                    violations,
                });

                for reference in graph.referenced_urns() {
                    if package_subjects.contains(&reference) {
                        continue;
                    }
                    if self.resolves_on_disk(&reference) {
                        continue;
                    }
                    report
                        .missing_elements
                        .push(MissingElement::dangling_reference(&record.name, reference));
                }
            }
        }
    }

    /// Whether a referenced URN has a file at its conventional workspace
    /// path. Meta-model vocabulary is schema, not a workspace file.
    fn resolves_on_disk(&self, reference: &str) -> bool {
        let Ok(urn) = reference.parse::<ModelUrn>() else {
            return false;
        };
        if urn.namespace().starts_with(META_MODEL_NAMESPACE_PREFIX) {
            return true;
        }
        self.root().join(encode_urn(&urn)).is_file()
    }
}

fn collect_subjects(records: &[EntryRecord]) -> FxHashSet<String> {
    let mut subjects = FxHashSet::default();
    for record in records {
        if let EntryOutcome::Parsed { graph, .. } = &record.outcome {
            for statement in graph.statements() {
                subjects.insert(statement.subject.clone());
            }
        }
    }
    subjects
}
