//! Schema dictionary loading
//!
//! This crate handles:
//! - Parsing the JSON schema dictionary
//! - Mapping persisted JDBC type codes onto portable type codes
//! - Partitioning columns into key, regular and LOB groups

pub mod dictionary;

pub use dictionary::{load, ColumnRecord, Dictionary, DictionaryError, TableRecord};
