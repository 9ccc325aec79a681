//! URN↔path codec.
//!
//! Workspace layout is `<root>/<namespace>/<version>/<ElementName>.ttl`, two
//! directory levels below root and one file per element. `encode_urn` and
//! `decode_path` are pure inverses for any URN whose element name matches the
//! filename stem.

use std::path::{Component, Path, PathBuf};

use crate::base::constants::MODEL_EXTENSION;
use crate::base::{ModelUrn, SchemaPrefix};
use crate::core::ModelError;

/// Where a model element's file lives, relative to the workspace root.
/// `filename` is the stem, without the extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelLocation {
    namespace: String,
    version: String,
    filename: String,
}

impl ModelLocation {
    pub fn new(
        namespace: impl Into<String>,
        version: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            version: version.into(),
            filename: filename.into(),
        }
    }

    /// Derives the conventional location of a URN's file.
    pub fn from_urn(urn: &ModelUrn) -> Self {
        Self::new(urn.namespace(), urn.version(), urn.element_name())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The `namespace:version` key used by the namespace index.
    pub fn namespace_key(&self) -> String {
        format!("{}:{}", self.namespace, self.version)
    }

    /// Workspace-relative path of the model file.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.namespace)
            .join(&self.version)
            .join(format!("{}.{}", self.filename, MODEL_EXTENSION))
    }

    /// Forward-slash form of [`Self::relative_path`], as used for archive
    /// entry names.
    pub fn entry_name(&self) -> String {
        format!(
            "{}/{}/{}.{}",
            self.namespace, self.version, self.filename, MODEL_EXTENSION
        )
    }

    /// The URN this location names under the given schema prefix, assuming
    /// the element name matches the filename stem.
    pub fn to_urn(&self, prefix: SchemaPrefix) -> Result<ModelUrn, ModelError> {
        ModelUrn::new(prefix, &self.namespace, &self.version, &self.filename)
    }
}

/// Encodes a URN to its workspace-relative path.
pub fn encode_urn(urn: &ModelUrn) -> PathBuf {
    ModelLocation::from_urn(urn).relative_path()
}

/// Decodes a path under `root` back to the URN it names, using the current
/// schema prefix. Fails with `InvalidModel` when the path has fewer than
/// three segments under root or the filename carries no extension.
pub fn decode_path(path: &Path, root: &Path) -> Result<ModelUrn, ModelError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ModelError::invalid_model(format!("path {} is outside root", path.display())))?;
    decode_relative(relative)
}

/// Decodes a workspace-relative path (e.g. an archive entry name).
pub fn decode_relative(relative: &Path) -> Result<ModelUrn, ModelError> {
    let segments: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let [namespace, version, filename] = segments.as_slice() else {
        return Err(ModelError::invalid_model(format!(
            "path '{}' does not match the namespace/version/file convention",
            relative.display()
        )));
    };
    let Some((stem, _extension)) = filename.rsplit_once('.') else {
        return Err(ModelError::invalid_model(format!(
            "filename '{filename}' has no extension"
        )));
    };

    ModelUrn::new(SchemaPrefix::Samm, *namespace, *version, stem)
}
