//! Syntax verification of generated SQL using datafusion-sqlparser-rs
//!
//! The parser does not know every vendor extension the sink emits
//! (Oracle `FROM DUAL` merges, PostgreSQL `EXECUTE FUNCTION` triggers), so
//! verification failures are advisory and never block synthesis.

use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect as ParserDialect, GenericDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::{Parser, ParserError};

use cdcsink_core::Dialect;

use crate::binding::{DdlStatements, SinkStatements};

/// SQL parser configured for one target dialect
pub struct SqlVerifier {
    target: Dialect,

    /// Dialect used for DDL
    ddl: Box<dyn ParserDialect>,

    /// Dialect used for DML; `?` placeholders are JDBC-style, which the
    /// PostgreSQL tokenizer treats as an operator
    dml: Box<dyn ParserDialect>,
}

impl SqlVerifier {
    /// Create a verifier for a target dialect
    pub fn for_dialect(target: Dialect) -> Self {
        let (ddl, dml): (Box<dyn ParserDialect>, Box<dyn ParserDialect>) = match target {
            Dialect::MySql => (Box::new(MySqlDialect {}), Box::new(MySqlDialect {})),
            Dialect::PostgreSql => (Box::new(PostgreSqlDialect {}), Box::new(GenericDialect {})),
            Dialect::Oracle => (Box::new(GenericDialect {}), Box::new(GenericDialect {})),
        };

        Self { target, ddl, dml }
    }

    pub fn target(&self) -> Dialect {
        self.target
    }

    /// Parse one DDL statement
    pub fn parse_ddl(&self, label: &str, sql: &str) -> Result<Vec<Statement>, VerifyError> {
        parse(&*self.ddl, label, sql)
    }

    /// Parse one DML statement
    pub fn parse_dml(&self, label: &str, sql: &str) -> Result<Vec<Statement>, VerifyError> {
        parse(&*self.dml, label, sql)
    }

    /// Column names declared by a `CREATE TABLE` statement, in order
    pub fn create_table_columns(&self, sql: &str) -> Result<Vec<String>, VerifyError> {
        let statements = self.parse_ddl("CREATE TABLE", sql)?;

        match statements.first() {
            Some(Statement::CreateTable(create)) => Ok(create
                .columns
                .iter()
                .map(|c| c.name.value.clone())
                .collect()),
            _ => Err(VerifyError {
                statement: "CREATE TABLE".to_string(),
                sql: sql.to_string(),
                error: ParserError::ParserError("not a CREATE TABLE statement".to_string()),
            }),
        }
    }

    /// Verify all DDL statements, returning every failure
    pub fn verify_ddl(&self, ddl: &DdlStatements) -> Vec<VerifyError> {
        let mut errors = Vec::new();

        if let Err(e) = self.parse_ddl("CREATE TABLE", ddl.create_table()) {
            errors.push(e);
        }
        for (i, trigger) in ddl.triggers().iter().enumerate() {
            if let Err(e) = self.parse_ddl(&format!("TRIGGER #{}", i + 1), trigger) {
                errors.push(e);
            }
        }

        errors
    }

    /// Verify all DML statements, returning every failure
    pub fn verify_dml(&self, dml: &SinkStatements) -> Vec<VerifyError> {
        dml.iter()
            .filter_map(|(key, stmt)| self.parse_dml(key.tag(), &stmt.sql).err())
            .collect()
    }
}

fn parse(dialect: &dyn ParserDialect, label: &str, sql: &str) -> Result<Vec<Statement>, VerifyError> {
    Parser::parse_sql(dialect, sql).map_err(|error| VerifyError {
        statement: label.to_string(),
        sql: sql.to_string(),
        error,
    })
}

/// A generated statement the parser rejected
#[derive(Debug, thiserror::Error)]
#[error("{statement}: {error}")]
pub struct VerifyError {
    /// Operation tag or statement label
    pub statement: String,

    /// Statement text
    pub sql: String,

    /// Parser error from sqlparser
    pub error: ParserError,
}
