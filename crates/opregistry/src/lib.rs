//! A registry of compiled GraphQL operation descriptors.
//!
//! Descriptors are produced by an external, schema-aware build step and
//! registered once through an [`OperationRegistryBuilder`]. The built
//! [`OperationRegistry`] is immutable and can be shared freely between
//! threads: it resolves descriptors by name, validates and normalizes
//! variables for transmission, and decodes raw JSON responses into the
//! shape each operation declares.

mod config;
mod content_hash;
mod file_reader;
pub mod operation;
pub mod registry;
pub mod types;
mod value_path;

pub use config::RegistryConfig;
pub use config::UnknownVariablePolicy;
pub use content_hash::ContentHash;
pub use content_hash::ContentHashParseError;
pub use file_reader::ReadContentError;
pub use registry::OperationRegistry;
pub use registry::OperationRegistryBuilder;
pub use value_path::PathSegment;
pub use value_path::ValuePath;

#[cfg(test)]
mod test;
