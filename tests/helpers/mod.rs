//! Shared test doubles: a line-oriented fake parser, a marker-driven fake
//! validator, a stamping fake migrator, and a tempdir workspace fixture.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use aspekt::base::constants::RDF_TYPE;
use aspekt::graph::{
    AspectValidator, Graph, MigrationFailure, ModelMigrator, ParseFailure, Statement,
    TurtleParser, Violation,
};

pub const META_ASPECT: &str = "urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#Aspect";
pub const META_PROPERTIES: &str = "urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#properties";

/// Parses one statement per line: `subject predicate object`, whitespace
/// separated, `#`-prefixed lines are comments. Stands in for the external
/// Turtle parser.
pub struct LineParser;

impl TurtleParser for LineParser {
    fn parse(&self, content: &str) -> Result<Graph, ParseFailure> {
        let mut statements = Vec::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(3, ' ');
            let (Some(subject), Some(predicate), Some(object)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseFailure::new(format!(
                    "line {}: expected three terms",
                    number + 1
                )));
            };
            statements.push(Statement::new(subject, predicate, object.trim()));
        }
        Ok(Graph::new(content, statements))
    }
}

/// Reports one violation per statement whose object is the literal `broken`.
/// Stands in for the external semantic validator.
pub struct MarkerValidator;

impl AspectValidator for MarkerValidator {
    fn validate(&self, graph: &Graph) -> Vec<Violation> {
        graph
            .statements()
            .iter()
            .filter(|s| s.object == "broken")
            .map(|s| Violation::new(&s.subject, "marked broken"))
            .collect()
    }
}

/// Prepends a migration stamp to the source; fails for content containing
/// `unmigratable`. Stands in for the external migrator.
pub struct StampMigrator;

pub const MIGRATION_STAMP: &str = "# migrated\n";

impl ModelMigrator for StampMigrator {
    fn migrate(&self, graph: &Graph) -> Result<Graph, MigrationFailure> {
        if graph.source().contains("unmigratable") {
            return Err(MigrationFailure::new("schema generation not supported"));
        }
        Ok(Graph::new(
            format!("{MIGRATION_STAMP}{}", graph.source()),
            graph.statements().to_vec(),
        ))
    }
}

pub fn parser() -> Arc<dyn TurtleParser> {
    Arc::new(LineParser)
}

pub fn validator() -> Arc<dyn AspectValidator> {
    Arc::new(MarkerValidator)
}

pub fn migrator() -> Arc<dyn ModelMigrator> {
    Arc::new(StampMigrator)
}

/// URN text for an element.
pub fn urn(namespace: &str, version: &str, element: &str) -> String {
    format!("urn:samm:{namespace}:{version}#{element}")
}

/// Model content declaring `element` as an Aspect, referencing `refs`.
pub fn aspect_source(namespace: &str, version: &str, element: &str, refs: &[&str]) -> String {
    let subject = urn(namespace, version, element);
    let mut source = format!("{subject} {RDF_TYPE} {META_ASPECT}\n");
    for reference in refs {
        source.push_str(&format!("{subject} {META_PROPERTIES} {reference}\n"));
    }
    source
}

/// A temporary workspace tree following `<root>/<namespace>/<version>/`.
pub struct WorkspaceFixture {
    dir: TempDir,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_model(&self, namespace: &str, version: &str, filename: &str, content: &str) {
        let dir = self.root().join(namespace).join(version);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(filename), content).unwrap();
    }

    /// Writes a well-formed aspect file and returns its URN text.
    pub fn write_aspect(&self, namespace: &str, version: &str, element: &str) -> String {
        self.write_model(
            namespace,
            version,
            &format!("{element}.ttl"),
            &aspect_source(namespace, version, element, &[]),
        );
        urn(namespace, version, element)
    }

    pub fn model_path(&self, namespace: &str, version: &str, filename: &str) -> PathBuf {
        self.root().join(namespace).join(version).join(filename)
    }
}

/// Builds an in-memory ZIP from `(entry name, content)` pairs.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(&mut buffer);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    buffer.into_inner()
}
