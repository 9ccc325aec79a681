mod error;
pub mod file_io;

pub use error::ModelError;
pub use file_io::{atomic_write, has_extension};
