//! Validation reports for package import.

use crate::graph::Violation;

/// Classification of one package entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Syntactically and semantically valid, target path free.
    Valid,
    /// Violations present (or content unparseable).
    Invalid,
    /// A file already exists at the computed workspace location. Flagged,
    /// never silently overwritten.
    AlreadyDefined,
}

/// Per-file validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationEntry {
    /// The `namespace:version` key the entry belongs to.
    pub namespace: String,
    pub file_name: String,
    pub status: EntryStatus,
    pub violations: Vec<Violation>,
}

/// An entry or reference that cannot be resolved: a reference inside the
/// package pointing outside both the package and the workspace, or an entry
/// that does not match the two-level convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingElement {
    /// The entry that carries the problem.
    pub file_name: String,
    /// The unresolved reference, when the problem is a dangling reference.
    pub urn: Option<String>,
    pub message: String,
}

impl MissingElement {
    pub fn unresolvable_entry(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            urn: None,
            message: message.into(),
        }
    }

    pub fn dangling_reference(file_name: impl Into<String>, urn: impl Into<String>) -> Self {
        let urn = urn.into();
        Self {
            file_name: file_name.into(),
            message: format!("references {urn} outside the package and workspace"),
            urn: Some(urn),
        }
    }
}

/// Aggregate report over all entries of a package, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValidationReport {
    pub valid_files: Vec<ValidationEntry>,
    pub missing_elements: Vec<MissingElement>,
}

impl FileValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenates two reports, preserving the order of both sides. No
    /// deduplication; merge is associative.
    pub fn merge(mut self, other: Self) -> Self {
        self.valid_files.extend(other.valid_files);
        self.missing_elements.extend(other.missing_elements);
        self
    }
}
