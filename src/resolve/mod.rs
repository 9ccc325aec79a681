//! Locating model content: namespace index, resolution strategies, and the
//! strategy repository.

mod filesystem;
mod in_memory;
pub mod index;
mod package;
mod repository;
mod strategy;

pub use filesystem::FilesystemStrategy;
pub use in_memory::InMemoryStrategy;
pub use index::NamespaceIndex;
pub use package::PackageStrategy;
pub use repository::StrategyRepository;
pub use strategy::{ResolutionStrategy, ResolvedModel, StrategyKind};
