//! Trait seams for the external collaborators.

use thiserror::Error;

use super::Graph;

/// Failure reported by the external Turtle parser.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseFailure {
    pub message: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One semantic-validation finding from the external validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The focus node (usually a URN) the finding is about.
    pub focus: String,
    pub message: String,
}

impl Violation {
    pub fn new(focus: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            focus: focus.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by the external migrator.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct MigrationFailure {
    pub message: String,
}

impl MigrationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses Turtle content into a [`Graph`].
pub trait TurtleParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<Graph, ParseFailure>;
}

/// Validates a parsed model, returning all findings (empty = valid).
pub trait AspectValidator: Send + Sync {
    fn validate(&self, graph: &Graph) -> Vec<Violation>;
}

/// Migrates a parsed model to the current schema generation. The returned
/// graph's source text is the migrated content.
pub trait ModelMigrator: Send + Sync {
    fn migrate(&self, graph: &Graph) -> Result<Graph, MigrationFailure>;
}
