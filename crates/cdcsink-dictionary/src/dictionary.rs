//! Schema dictionary parsing
//!
//! The dictionary is a JSON object keyed by numeric table id (as a
//! string), each value describing one replicated table and its columns
//! with `java.sql.Types` codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use cdcsink_core::{Column, SynthesisError, TableDescriptor, TypeCode};

/// Dictionary file contents, keyed by table id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    pub tables: BTreeMap<String, TableRecord>,
}

/// One table as persisted in the dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    /// Owning schema; informational only, identifiers are not qualified
    #[serde(default)]
    pub table_owner: Option<String>,

    pub table_name: String,

    /// Columns in source table order
    #[serde(default)]
    pub columns: Vec<ColumnRecord>,
}

/// One column as persisted in the dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRecord {
    pub column_name: String,

    /// `java.sql.Types` code
    pub jdbc_type: i32,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    #[serde(default)]
    pub data_scale: Option<i32>,

    #[serde(default)]
    pub part_of_pk: bool,
}

fn default_nullable() -> bool {
    true
}

impl Dictionary {
    /// Load dictionary from file
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DictionaryError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse dictionary from JSON string
    pub fn from_str(json: &str) -> Result<Self, DictionaryError> {
        serde_json::from_str(json).map_err(|e| DictionaryError::ParseError(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Convert every record into a validated table descriptor
    pub fn into_descriptors(self) -> Result<BTreeMap<u64, TableDescriptor>, DictionaryError> {
        self.tables
            .into_iter()
            .map(|(id, record)| -> Result<(u64, TableDescriptor), DictionaryError> {
                let table_id = id
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| DictionaryError::InvalidTableId(id.clone()))?;
                Ok((table_id, record.into_descriptor()?))
            })
            .collect()
    }
}

impl TableRecord {
    /// Partition columns into key, regular and LOB groups
    ///
    /// Key and regular columns keep file order. LOB columns never join the
    /// primary key.
    pub fn into_descriptor(self) -> Result<TableDescriptor, DictionaryError> {
        let mut builder = TableDescriptor::builder(self.table_name.clone());

        for record in self.columns {
            let type_code = TypeCode::from_jdbc_code(record.jdbc_type).ok_or_else(|| {
                DictionaryError::UnknownJdbcType {
                    table: self.table_name.clone(),
                    column: record.column_name.clone(),
                    jdbc_type: record.jdbc_type,
                }
            })?;

            let mut column = Column::new(record.column_name, type_code).with_nullable(record.nullable);
            if let Some(scale) = record.data_scale {
                column = column.with_scale(scale);
            }

            builder = if type_code.is_lob() {
                builder.lob(column)
            } else if record.part_of_pk {
                builder.key(column)
            } else {
                builder.column(column)
            };
        }

        Ok(builder.build()?)
    }
}

/// Read a dictionary file and build its table descriptors
pub fn load(path: &Path) -> Result<BTreeMap<u64, TableDescriptor>, DictionaryError> {
    let dictionary = Dictionary::from_file(path)?;
    let count = dictionary.len();
    let descriptors = dictionary.into_descriptors()?;

    tracing::info!(path = %path.display(), tables = count, "loaded schema dictionary");
    Ok(descriptors)
}

/// Dictionary errors
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse dictionary JSON: {0}")]
    ParseError(String),

    #[error("Table id '{0}' is not a non-negative integer")]
    InvalidTableId(String),

    #[error("Table {table}: column {column} has unsupported JDBC type {jdbc_type}")]
    UnknownJdbcType {
        table: String,
        column: String,
        jdbc_type: i32,
    },

    #[error(transparent)]
    Descriptor(#[from] SynthesisError),
}
