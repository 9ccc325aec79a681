//! # aspekt-base
//!
//! Core library for aspect model workspace resolution, packaging, and migration.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! workspace → ModelService facade (get/save/delete/namespaces)
//!   ↓
//! package   → ZIP import/export/backup built on the strategies
//! migrate   → workspace-wide migration orchestration
//!   ↓
//! resolve   → namespace index, resolution strategies, strategy repository
//!   ↓
//! graph     → parsed-model value types, collaborator trait seams
//!   ↓
//! base      → ModelUrn, ModelLocation, URN↔path codec
//!   ↓
//! core      → ModelError, atomic file IO
//! ```

// ============================================================================
// MODULES (dependency order: core → base → graph → resolve → package/migrate)
// ============================================================================

/// Foundation: error types, atomic file IO
pub mod core;

/// Identifiers: ModelUrn, ModelLocation, URN↔path codec
pub mod base;

/// Parsed-model value types and collaborator seams (parser, validator, migrator)
pub mod graph;

/// Namespace index, resolution strategies, strategy repository
pub mod resolve;

/// Package service: ZIP import, export, backup
pub mod package;

/// Migration orchestrator: single-file and workspace-wide migration
pub mod migrate;

/// Workspace model service facade
pub mod workspace;

/// Batch cancellation and per-file outcomes
pub mod batch;

// Re-export commonly needed items
pub use base::{ModelLocation, ModelUrn, SchemaPrefix};
pub use batch::{BatchControl, FileOutcome};
pub use crate::core::ModelError;
