//! cdcsink core
//!
//! Dialect-neutral domain model shared by every cdcsink crate:
//! portable type codes, target dialects, table descriptors, the
//! type mapping registry and the config file schema.

pub mod types;
pub mod dialect;
pub mod schema;
pub mod registry;
pub mod error;
pub mod config;

pub use types::TypeCode;
pub use dialect::Dialect;
pub use schema::{check_identifier, Column, TableDescriptor, TableDescriptorBuilder};
pub use registry::{TypeRegistry, RegistryError};
pub use error::SynthesisError;
pub use config::{Config, ConfigError, TypeOverrides};
