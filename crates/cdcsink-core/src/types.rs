//! Portable type codes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Portable SQL type code
///
/// Every variant maps one-to-one to a `java.sql.Types` constant, which is
/// how the schema dictionary persists column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCode {
    Boolean,
    #[serde(rename = "TINYINT")]
    TinyInt,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    Integer,
    #[serde(rename = "BIGINT")]
    BigInt,
    Float,
    Double,
    Decimal,
    Numeric,
    Date,
    Timestamp,
    TimestampWithTimezone,
    Varchar,
    Binary,
    Blob,
    Clob,
    Nclob,
}

impl TypeCode {
    /// All declared type codes, in declaration order
    pub const ALL: [TypeCode; 17] = [
        Self::Boolean,
        Self::TinyInt,
        Self::SmallInt,
        Self::Integer,
        Self::BigInt,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Numeric,
        Self::Date,
        Self::Timestamp,
        Self::TimestampWithTimezone,
        Self::Varchar,
        Self::Binary,
        Self::Blob,
        Self::Clob,
        Self::Nclob,
    ];

    /// Stable upper-case name, used in config files and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            Self::Varchar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::Blob => "BLOB",
            Self::Clob => "CLOB",
            Self::Nclob => "NCLOB",
        }
    }

    /// The `java.sql.Types` code for this type
    pub fn jdbc_code(&self) -> i32 {
        match self {
            Self::Boolean => 16,
            Self::TinyInt => -6,
            Self::SmallInt => 5,
            Self::Integer => 4,
            Self::BigInt => -5,
            Self::Float => 6,
            Self::Double => 8,
            Self::Decimal => 3,
            Self::Numeric => 2,
            Self::Date => 91,
            Self::Timestamp => 93,
            Self::TimestampWithTimezone => 2014,
            Self::Varchar => 12,
            Self::Binary => -2,
            Self::Blob => 2004,
            Self::Clob => 2005,
            Self::Nclob => 2011,
        }
    }

    /// Look up a type code from its `java.sql.Types` code
    pub fn from_jdbc_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.jdbc_code() == code)
    }

    /// Large-object types are replicated through a separate update path
    pub fn is_lob(&self) -> bool {
        matches!(self, Self::Blob | Self::Clob | Self::Nclob)
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("unknown type code '{}'", s))
    }
}
