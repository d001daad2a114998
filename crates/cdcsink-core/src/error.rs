//! Synthesis error types

use crate::dialect::Dialect;
use crate::types::TypeCode;

/// Reasons a table cannot be compiled into SQL
///
/// Synthesis is all-or-nothing: any of these aborts the whole table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("Table {table}: column {column} has type {type_code} which has no {dialect} mapping")]
    UnsupportedType {
        table: String,
        dialect: Dialect,
        column: String,
        type_code: TypeCode,
    },

    #[error("Table {table} has no primary key columns")]
    NoPrimaryKey { table: String },

    #[error("Table {table}: column {column} is declared more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("Table {table}: '{identifier}' is not a valid unquoted SQL identifier")]
    InvalidIdentifier { table: String, identifier: String },

    #[error("Table {table}: identifier '{identifier}' exceeds the {dialect} limit of {limit} bytes")]
    IdentifierTooLong {
        table: String,
        dialect: Dialect,
        identifier: String,
        limit: usize,
    },

    #[error("Table {table}: column {column} has scale {scale} which {dialect} cannot represent")]
    InvalidScale {
        table: String,
        dialect: Dialect,
        column: String,
        scale: i32,
    },
}

impl SynthesisError {
    /// Name of the table the error belongs to
    pub fn table(&self) -> &str {
        match self {
            Self::UnsupportedType { table, .. }
            | Self::NoPrimaryKey { table }
            | Self::DuplicateColumn { table, .. }
            | Self::InvalidIdentifier { table, .. }
            | Self::IdentifierTooLong { table, .. }
            | Self::InvalidScale { table, .. } => table,
        }
    }
}
