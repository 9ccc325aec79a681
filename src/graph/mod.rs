//! Parsed-model value types and the seams to external collaborators.
//!
//! The Turtle parser, the semantic validator, and the cross-version migrator
//! are black boxes behind the traits in [`collaborators`]. This crate only
//! hands them content and interprets their outcomes; it never builds RDF
//! graphs or SHACL shapes itself.

mod collaborators;

pub use collaborators::{
    AspectValidator, MigrationFailure, ModelMigrator, ParseFailure, TurtleParser, Violation,
};

use crate::base::ModelUrn;
use crate::base::constants::{META_MODEL_TYPES, RDF_TYPE};
use crate::core::ModelError;

/// One statement of a parsed model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Statement {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// A parsed model as returned by the external parser.
///
/// Retains the source text it was parsed from so that callers can persist
/// what a collaborator hands back (e.g. migrated content) without this crate
/// owning a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    source: String,
    statements: Vec<Statement>,
}

impl Graph {
    pub fn new(source: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            source: source.into(),
            statements,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Whether any statement is about the given subject URN.
    pub fn defines_subject(&self, urn: &str) -> bool {
        self.statements.iter().any(|s| s.subject == urn)
    }

    /// Model URNs this graph mentions in object position, in first-seen
    /// order. Objects of `rdf:type` statements are meta-model types, not
    /// dependencies, and are skipped; so are the graph's own subjects.
    pub fn referenced_urns(&self) -> Vec<String> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut refs = Vec::new();
        for statement in &self.statements {
            if statement.predicate == RDF_TYPE {
                continue;
            }
            let object = statement.object.as_str();
            if !object.starts_with("urn:") || !object.contains('#') {
                continue;
            }
            if self.defines_subject(object) {
                continue;
            }
            if seen.insert(object.to_string()) {
                refs.push(object.to_string());
            }
        }
        refs
    }
}

/// The URN this content declares as its own subject: the subject of the first
/// `rdf:type` statement whose object carries a recognized meta-model type
/// fragment. Fails with `InvalidModel` when no statement matches.
pub fn declared_urn(graph: &Graph) -> Result<ModelUrn, ModelError> {
    for statement in graph.statements() {
        if statement.predicate != RDF_TYPE {
            continue;
        }
        let fragment = match statement.object.rsplit_once('#') {
            Some((_, fragment)) => fragment,
            None => continue,
        };
        if META_MODEL_TYPES.contains(&fragment) {
            return statement.subject.parse();
        }
    }
    Err(ModelError::invalid_model("urn cannot be found"))
}
