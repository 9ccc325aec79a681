//! Shared constants for model files and the meta model.

/// File extension of persisted model files.
pub const MODEL_EXTENSION: &str = "ttl";

/// Extension of uploaded package archives.
pub const PACKAGE_EXTENSION: &str = "zip";

/// Full IRI of the `rdf:type` predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Meta-model type fragments that mark a statement's subject as the content's
/// own URN. The first `rdf:type` statement whose object carries one of these
/// fragments identifies the model.
pub const META_MODEL_TYPES: [&str; 4] = ["Aspect", "Property", "Entity", "Characteristic"];

/// Namespace prefix of the meta model itself. References into it name schema
/// vocabulary, not workspace files, and are excluded from dependency
/// closures.
pub const META_MODEL_NAMESPACE_PREFIX: &str = "org.eclipse.esmf.samm";
