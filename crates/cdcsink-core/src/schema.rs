//! Table descriptors and columns

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::dialect::Dialect;
use crate::error::SynthesisError;
use crate::types::TypeCode;

/// A column of a replicated table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unquoted identifier)
    pub name: String,

    /// Portable type code
    pub type_code: TypeCode,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Scale for DECIMAL/NUMERIC columns
    #[serde(default)]
    pub numeric_scale: Option<i32>,
}

impl Column {
    /// Create a new nullable column without scale
    pub fn new(name: impl Into<String>, type_code: TypeCode) -> Self {
        Self {
            name: name.into(),
            type_code,
            nullable: true,
            numeric_scale: None,
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the column NOT NULL
    pub fn not_null(self) -> Self {
        self.with_nullable(false)
    }

    /// Set numeric scale
    pub fn with_scale(mut self, scale: i32) -> Self {
        self.numeric_scale = Some(scale);
        self
    }
}

/// Dialect-neutral description of one replicated table
///
/// Column order inside the primary key and regular groups is the
/// positional binding order of every generated statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    name: String,
    primary_key_columns: Vec<Column>,
    regular_columns: Vec<Column>,
    lob_columns: BTreeMap<String, Column>,
}

impl TableDescriptor {
    /// Start building a descriptor for the named table
    pub fn builder(name: impl Into<String>) -> TableDescriptorBuilder {
        TableDescriptorBuilder {
            name: name.into(),
            primary_key_columns: Vec::new(),
            regular_columns: Vec::new(),
            lob_columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_key_columns(&self) -> &[Column] {
        &self.primary_key_columns
    }

    /// Non-key, non-LOB columns
    pub fn regular_columns(&self) -> &[Column] {
        &self.regular_columns
    }

    pub fn lob_columns(&self) -> &BTreeMap<String, Column> {
        &self.lob_columns
    }

    /// True when every non-LOB column belongs to the primary key
    pub fn has_only_key_columns(&self) -> bool {
        self.regular_columns.is_empty()
    }

    /// All columns: key columns, then regular columns, then LOB columns
    pub fn all_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_key_columns
            .iter()
            .chain(self.regular_columns.iter())
            .chain(self.lob_columns.values())
    }

    /// Get column names in the same order as `all_columns`
    pub fn column_names(&self) -> Vec<&str> {
        self.all_columns().map(|c| c.name.as_str()).collect()
    }

    /// Check the structural preconditions of SQL synthesis
    ///
    /// Requires at least one key column, valid unquoted identifiers and
    /// names that are unique across all three groups (compared
    /// case-insensitively, as unquoted identifiers are).
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if !is_valid_identifier(&self.name) {
            return Err(SynthesisError::InvalidIdentifier {
                table: self.name.clone(),
                identifier: self.name.clone(),
            });
        }

        if self.primary_key_columns.is_empty() {
            return Err(SynthesisError::NoPrimaryKey {
                table: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for column in self.all_columns() {
            if !is_valid_identifier(&column.name) {
                return Err(SynthesisError::InvalidIdentifier {
                    table: self.name.clone(),
                    identifier: column.name.clone(),
                });
            }
            if !seen.insert(column.name.to_ascii_uppercase()) {
                return Err(SynthesisError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// [`TableDescriptor::validate`] plus the identifier rules of one dialect
    ///
    /// Rejects `#` outside Oracle and names longer than the dialect's
    /// identifier limit.
    pub fn validate_for(&self, dialect: Dialect) -> Result<(), SynthesisError> {
        self.validate()?;

        let names = std::iter::once(self.name.as_str()).chain(self.all_columns().map(|c| c.name.as_str()));
        for name in names {
            check_identifier(&self.name, name, dialect)?;
        }

        Ok(())
    }
}

/// Check one identifier of `table` against the rules of `dialect`
pub fn check_identifier(table: &str, identifier: &str, dialect: Dialect) -> Result<(), SynthesisError> {
    if !is_valid_identifier_for(identifier, dialect) {
        return Err(SynthesisError::InvalidIdentifier {
            table: table.to_string(),
            identifier: identifier.to_string(),
        });
    }

    let limit = dialect.max_identifier_len();
    if identifier.len() > limit {
        return Err(SynthesisError::IdentifierTooLong {
            table: table.to_string(),
            dialect,
            identifier: identifier.to_string(),
            limit,
        });
    }

    Ok(())
}

/// Builder for [`TableDescriptor`]
#[derive(Debug, Clone)]
pub struct TableDescriptorBuilder {
    name: String,
    primary_key_columns: Vec<Column>,
    regular_columns: Vec<Column>,
    lob_columns: Vec<Column>,
}

impl TableDescriptorBuilder {
    /// Append a primary key column
    pub fn key(mut self, column: Column) -> Self {
        self.primary_key_columns.push(column);
        self
    }

    /// Append a regular column
    pub fn column(mut self, column: Column) -> Self {
        self.regular_columns.push(column);
        self
    }

    /// Add a large-object column
    pub fn lob(mut self, column: Column) -> Self {
        self.lob_columns.push(column);
        self
    }

    /// Finish the descriptor and validate it
    pub fn build(self) -> Result<TableDescriptor, SynthesisError> {
        let table = self.name.clone();
        let mut lob_columns = BTreeMap::new();
        for column in self.lob_columns {
            if lob_columns.contains_key(&column.name) {
                return Err(SynthesisError::DuplicateColumn {
                    table,
                    column: column.name,
                });
            }
            lob_columns.insert(column.name.clone(), column);
        }

        let descriptor = TableDescriptor {
            name: self.name,
            primary_key_columns: self.primary_key_columns,
            regular_columns: self.regular_columns,
            lob_columns,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Shape of an unquoted identifier: a letter or `_`, then letters, digits,
/// `_`, `$` or `#`
///
/// This is the widest (Oracle) character set; use
/// [`is_valid_identifier_for`] before emitting SQL for a specific dialect.
/// Reserved words are not rejected: identifiers are emitted unquoted, so a
/// column named `KEY` or `LIMIT` passes here but breaks MySQL and
/// PostgreSQL statements.
pub fn is_valid_identifier(name: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$#]*$").expect("identifier pattern is valid"))
        .is_match(name)
}

/// Unquoted identifier characters accepted by `dialect`
pub fn is_valid_identifier_for(name: &str, dialect: Dialect) -> bool {
    is_valid_identifier(name) && (dialect.allows_hash_in_identifiers() || !name.contains('#'))
}
