pub mod constants;
mod location;
mod urn;

pub use location::{ModelLocation, decode_path, decode_relative, encode_urn};
pub use urn::{ModelUrn, SchemaPrefix};
