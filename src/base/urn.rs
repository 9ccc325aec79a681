//! Model URNs.
//!
//! A model element is named by a URN of the form
//! `urn:<prefix>:<namespace>:<version>#<element>`, e.g.
//! `urn:samm:org.eclipse.examples:1.0.0#Movement`. The prefix distinguishes
//! schema generations and round-trips unchanged; it is never normalized.

use std::fmt;
use std::str::FromStr;

use crate::core::ModelError;

/// Schema generation prefix of a model URN.
///
/// `Samm` is the current generation, `Bamm` the legacy one. Both are carried
/// through resolution and packaging as distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaPrefix {
    /// Current schema generation (`urn:samm:...`).
    Samm,
    /// Legacy schema generation (`urn:bamm:...`).
    Bamm,
}

impl SchemaPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaPrefix::Samm => "samm",
            SchemaPrefix::Bamm => "bamm",
        }
    }
}

impl fmt::Display for SchemaPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaPrefix {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "samm" => Ok(SchemaPrefix::Samm),
            "bamm" => Ok(SchemaPrefix::Bamm),
            other => Err(ModelError::invalid_model(format!(
                "unknown schema prefix '{other}'"
            ))),
        }
    }
}

/// Structured form of a model URN. A value object, constructed per call and
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelUrn {
    schema_prefix: SchemaPrefix,
    namespace: String,
    version: String,
    element_name: String,
}

impl ModelUrn {
    /// Builds a URN from its four fields. Namespace, version, and element
    /// name must be non-empty.
    pub fn new(
        schema_prefix: SchemaPrefix,
        namespace: impl Into<String>,
        version: impl Into<String>,
        element_name: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let namespace = namespace.into();
        let version = version.into();
        let element_name = element_name.into();
        if namespace.is_empty() || version.is_empty() || element_name.is_empty() {
            return Err(ModelError::invalid_model(
                "urn requires non-empty namespace, version, and element name",
            ));
        }
        Ok(Self {
            schema_prefix,
            namespace,
            version,
            element_name,
        })
    }

    pub fn schema_prefix(&self) -> SchemaPrefix {
        self.schema_prefix
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The `namespace:version` key used by the namespace index.
    pub fn namespace_key(&self) -> String {
        format!("{}:{}", self.namespace, self.version)
    }
}

impl fmt::Display for ModelUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "urn:{}:{}:{}#{}",
            self.schema_prefix, self.namespace, self.version, self.element_name
        )
    }
}

impl FromStr for ModelUrn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ModelError::invalid_model(format!("malformed urn '{s}'"));

        let rest = s.strip_prefix("urn:").ok_or_else(malformed)?;
        let (prefix, rest) = rest.split_once(':').ok_or_else(malformed)?;
        let (body, element) = rest.split_once('#').ok_or_else(malformed)?;
        // Namespace segments may themselves contain dots but not colons; the
        // last colon-separated segment of the body is the version.
        let (namespace, version) = body.rsplit_once(':').ok_or_else(malformed)?;

        Self::new(prefix.parse()?, namespace, version, element)
    }
}
