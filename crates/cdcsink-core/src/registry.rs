//! Type mapping registry
//!
//! Immutable per-dialect tables mapping a [`TypeCode`] to the native
//! column type literal. Build one at startup and share it by reference.

use std::collections::BTreeMap;

use crate::config::TypeOverrides;
use crate::dialect::Dialect;
use crate::types::TypeCode;

/// Built-in MySQL/MariaDB mapping
const MYSQL_MAPPING: [(TypeCode, &str); 17] = [
    (TypeCode::Boolean, "tinyint"),
    (TypeCode::TinyInt, "tinyint"),
    (TypeCode::SmallInt, "smallint"),
    (TypeCode::Integer, "int"),
    (TypeCode::BigInt, "bigint"),
    (TypeCode::Float, "float"),
    (TypeCode::Double, "double"),
    (TypeCode::Decimal, "decimal"),
    (TypeCode::Numeric, "decimal"),
    (TypeCode::Date, "datetime"),
    (TypeCode::Timestamp, "timestamp"),
    (TypeCode::TimestampWithTimezone, "varchar(127)"),
    (TypeCode::Varchar, "varchar(255)"),
    (TypeCode::Binary, "varbinary(1000)"),
    (TypeCode::Blob, "longblob"),
    (TypeCode::Clob, "longtext"),
    (TypeCode::Nclob, "longtext"),
];

/// Built-in PostgreSQL mapping
///
/// BLOB maps to the `lo` extension type; see the large-object triggers
/// emitted by the DDL synthesizer.
const POSTGRESQL_MAPPING: [(TypeCode, &str); 17] = [
    (TypeCode::Boolean, "boolean"),
    (TypeCode::TinyInt, "smallint"),
    (TypeCode::SmallInt, "smallint"),
    (TypeCode::Integer, "integer"),
    (TypeCode::BigInt, "bigint"),
    (TypeCode::Float, "real"),
    (TypeCode::Double, "double precision"),
    (TypeCode::Decimal, "numeric"),
    (TypeCode::Numeric, "numeric"),
    (TypeCode::Date, "timestamp"),
    (TypeCode::Timestamp, "timestamp"),
    (TypeCode::TimestampWithTimezone, "timestamp with time zone"),
    (TypeCode::Varchar, "text"),
    (TypeCode::Binary, "bytea"),
    (TypeCode::Blob, "lo"),
    (TypeCode::Clob, "text"),
    (TypeCode::Nclob, "text"),
];

/// Built-in Oracle mapping
const ORACLE_MAPPING: [(TypeCode, &str); 17] = [
    (TypeCode::Boolean, "CHAR(1)"),
    (TypeCode::TinyInt, "NUMBER(3)"),
    (TypeCode::SmallInt, "NUMBER(5)"),
    (TypeCode::Integer, "NUMBER(10)"),
    (TypeCode::BigInt, "NUMBER(19)"),
    (TypeCode::Float, "BINARY_FLOAT"),
    (TypeCode::Double, "BINARY_DOUBLE"),
    (TypeCode::Decimal, "NUMBER"),
    (TypeCode::Numeric, "NUMBER"),
    (TypeCode::Date, "DATE"),
    (TypeCode::Timestamp, "TIMESTAMP"),
    (TypeCode::TimestampWithTimezone, "TIMESTAMP(9) WITH TIME ZONE"),
    (TypeCode::Varchar, "VARCHAR2(4000)"),
    (TypeCode::Binary, "RAW(2000)"),
    (TypeCode::Blob, "BLOB"),
    (TypeCode::Clob, "CLOB"),
    (TypeCode::Nclob, "NCLOB"),
];

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{dialect} type mapping is incomplete, missing: {}", join_codes(.missing))]
    Incomplete {
        dialect: Dialect,
        missing: Vec<TypeCode>,
    },

    #[error("Unknown type name '{name}' in [types.{dialect}]")]
    UnknownTypeName { dialect: Dialect, name: String },

    #[error("Empty type literal for {type_code} in [types.{dialect}]")]
    EmptyLiteral { dialect: Dialect, type_code: TypeCode },
}

fn join_codes(codes: &[TypeCode]) -> String {
    codes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Immutable dialect-keyed type mapping tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    mappings: BTreeMap<Dialect, BTreeMap<TypeCode, String>>,
}

impl TypeRegistry {
    /// The built-in mapping, total for every dialect and type code
    pub fn builtin() -> Self {
        let table = |entries: &[(TypeCode, &str)]| {
            entries
                .iter()
                .map(|(code, literal)| (*code, literal.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        let mut mappings = BTreeMap::new();
        mappings.insert(Dialect::MySql, table(&MYSQL_MAPPING));
        mappings.insert(Dialect::PostgreSql, table(&POSTGRESQL_MAPPING));
        mappings.insert(Dialect::Oracle, table(&ORACLE_MAPPING));
        Self { mappings }
    }

    /// Build a registry from explicit (possibly partial) mappings
    ///
    /// Call [`TypeRegistry::ensure_complete`] to reject gaps up front;
    /// otherwise a missing entry surfaces as an unsupported type error
    /// when a table using it is synthesized.
    pub fn from_mappings(mappings: BTreeMap<Dialect, BTreeMap<TypeCode, String>>) -> Self {
        Self { mappings }
    }

    /// The built-in mapping with literal overrides applied
    pub fn with_overrides(overrides: &TypeOverrides) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();

        for dialect in Dialect::ALL {
            for (name, literal) in overrides.for_dialect(dialect) {
                let type_code = name.parse::<TypeCode>().map_err(|_| RegistryError::UnknownTypeName {
                    dialect,
                    name: name.clone(),
                })?;

                let literal = literal.trim();
                if literal.is_empty() {
                    return Err(RegistryError::EmptyLiteral { dialect, type_code });
                }

                registry
                    .mappings
                    .entry(dialect)
                    .or_default()
                    .insert(type_code, literal.to_string());
            }
        }

        Ok(registry)
    }

    /// Native type literal for a type code, if the dialect declares one
    pub fn native_type(&self, dialect: Dialect, type_code: TypeCode) -> Option<&str> {
        self.mappings
            .get(&dialect)
            .and_then(|m| m.get(&type_code))
            .map(String::as_str)
            .filter(|literal| !literal.is_empty())
    }

    /// Verify that every dialect maps every declared type code
    pub fn ensure_complete(&self) -> Result<(), RegistryError> {
        for dialect in Dialect::ALL {
            let missing: Vec<TypeCode> = TypeCode::ALL
                .iter()
                .copied()
                .filter(|code| self.native_type(dialect, *code).is_none())
                .collect();

            if !missing.is_empty() {
                return Err(RegistryError::Incomplete { dialect, missing });
            }
        }
        Ok(())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
