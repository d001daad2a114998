//! SQL synthesis for the cdcsink replication sink
//!
//! This crate handles:
//! - Rendering columns with dialect-native types
//! - Generating CREATE TABLE statements and PostgreSQL large-object triggers
//! - Generating insert, upsert, update, delete and LOB update statements
//! - Publishing the positional bind order of every statement
//! - Verifying generated SQL with datafusion-sqlparser-rs
//!
//! ## Example
//!
//! ```rust
//! use cdcsink_core::{Column, Dialect, TableDescriptor, TypeCode, TypeRegistry};
//! use cdcsink_sql::SqlSynthesizer;
//!
//! let registry = TypeRegistry::builtin();
//! let table = TableDescriptor::builder("ORDERS")
//!     .key(Column::new("ID", TypeCode::BigInt))
//!     .column(Column::new("AMOUNT", TypeCode::Numeric).with_scale(2))
//!     .build()
//!     .unwrap();
//!
//! let sql = SqlSynthesizer::new(&registry).synthesize(&table, Dialect::PostgreSql).unwrap();
//! assert!(sql.dml.upsert().sql.ends_with("on conflict(ID) do update set AMOUNT=EXCLUDED.AMOUNT"));
//! ```

pub mod binding;
pub mod column;
pub mod strategy;
pub mod ddl;
pub mod dml;
pub mod synthesizer;
pub mod verify;

pub use binding::{BindParam, BindRole, BoundStatement, DdlStatements, SinkStatements, StatementKey};
pub use column::render_column;
pub use strategy::{strategy_for, DialectStrategy, MysqlStrategy, OracleStrategy, PostgresStrategy};
pub use ddl::create_table;
pub use dml::generate_sink_sql;
pub use synthesizer::{SqlSynthesizer, TableSql};
pub use verify::{SqlVerifier, VerifyError};
