//! Dialect strategies (Strategy pattern)
//!
//! Every dialect-specific decision made during synthesis lives behind
//! [`DialectStrategy`]. Adding a target engine means adding one
//! implementation and one arm in [`strategy_for`].

use cdcsink_core::{check_identifier, Column, Dialect, SynthesisError, TableDescriptor, TypeCode, TypeRegistry};

use crate::binding::{BindParam, BindRole, BoundStatement};
use crate::dml::{column_list, insert_statement, placeholders};

/// MySQL scale for DECIMAL columns persisted without one
const DEFAULT_DECIMAL_SCALE: i32 = 0;

/// MySQL scale for NUMERIC columns persisted without one
const DEFAULT_NUMERIC_SCALE: i32 = 9;

/// MySQL maximum DECIMAL precision
const MYSQL_DECIMAL_PRECISION: i32 = 38;

/// MySQL maximum DECIMAL scale
const MYSQL_MAX_DECIMAL_SCALE: i32 = 30;

/// Dialect-specific pieces of DDL and DML synthesis
pub trait DialectStrategy: Send + Sync {
    /// The dialect this strategy renders
    fn dialect(&self) -> Dialect;

    /// Native column type for a column, or `None` when the registry has
    /// no mapping for its type code
    fn native_type(&self, registry: &TypeRegistry, column: &Column) -> Option<String> {
        registry
            .native_type(self.dialect(), column.type_code)
            .map(str::to_string)
    }

    /// Reject a column this dialect cannot render correctly
    fn check_column(
        &self,
        _registry: &TypeRegistry,
        _table: &str,
        _column: &Column,
    ) -> Result<(), SynthesisError> {
        Ok(())
    }

    /// Clause appended to the plain insert to turn it into an upsert
    ///
    /// `None` when the dialect upserts with a different statement shape,
    /// or when the table has no non-key columns to update.
    fn upsert_clause(&self, _table: &TableDescriptor) -> Option<String> {
        None
    }

    /// Row source of a MERGE-based upsert, carrying every bind parameter
    fn merge_subquery(&self, _table: &TableDescriptor) -> Option<BoundStatement> {
        None
    }

    /// Plain insert of key and regular columns
    fn insert_statement(&self, table: &TableDescriptor) -> BoundStatement {
        insert_statement(table)
    }

    /// Insert-or-update keyed by primary key
    fn upsert_statement(&self, table: &TableDescriptor) -> BoundStatement {
        let mut statement = self.insert_statement(table);
        if let Some(clause) = self.upsert_clause(table) {
            statement.sql.push_str(&clause);
        }
        statement
    }

    /// Auxiliary script managing an out-of-row large object column
    fn large_object_trigger(&self, _table: &str, _column: &Column) -> Option<String> {
        None
    }
}

/// Strategy for a dialect
pub fn strategy_for(dialect: Dialect) -> &'static dyn DialectStrategy {
    match dialect {
        Dialect::MySql => &MysqlStrategy,
        Dialect::PostgreSql => &PostgresStrategy,
        Dialect::Oracle => &OracleStrategy,
    }
}

/// MySQL/MariaDB: `INSERT ... ON DUPLICATE KEY UPDATE`
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlStrategy;

impl DialectStrategy for MysqlStrategy {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn check_column(
        &self,
        registry: &TypeRegistry,
        table: &str,
        column: &Column,
    ) -> Result<(), SynthesisError> {
        let scaled = matches!(column.type_code, TypeCode::Decimal | TypeCode::Numeric)
            && registry
                .native_type(Dialect::MySql, column.type_code)
                .is_some_and(|base| !base.contains('('));

        match column.numeric_scale {
            Some(scale) if scaled && !(0..=MYSQL_MAX_DECIMAL_SCALE).contains(&scale) => {
                Err(SynthesisError::InvalidScale {
                    table: table.to_string(),
                    dialect: Dialect::MySql,
                    column: column.name.clone(),
                    scale,
                })
            }
            _ => Ok(()),
        }
    }

    fn native_type(&self, registry: &TypeRegistry, column: &Column) -> Option<String> {
        let base = registry.native_type(Dialect::MySql, column.type_code)?;
        let default_scale = match column.type_code {
            TypeCode::Decimal => DEFAULT_DECIMAL_SCALE,
            TypeCode::Numeric => DEFAULT_NUMERIC_SCALE,
            _ => return Some(base.to_string()),
        };

        // Overridden literals that already carry precision are used as-is
        if base.contains('(') {
            return Some(base.to_string());
        }

        let scale = column.numeric_scale.unwrap_or(default_scale);
        Some(format!("{}({},{})", base, MYSQL_DECIMAL_PRECISION, scale))
    }

    fn upsert_clause(&self, table: &TableDescriptor) -> Option<String> {
        if table.has_only_key_columns() {
            return None;
        }

        let assignments = table
            .regular_columns()
            .iter()
            .map(|c| format!("{}=VALUES({})", c.name, c.name))
            .collect::<Vec<_>>()
            .join(",");

        Some(format!(" on duplicate key update {}", assignments))
    }
}

/// PostgreSQL: `INSERT ... ON CONFLICT DO UPDATE`, `lo` large objects
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresStrategy;

impl DialectStrategy for PostgresStrategy {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSql
    }

    fn upsert_clause(&self, table: &TableDescriptor) -> Option<String> {
        if table.has_only_key_columns() {
            return None;
        }

        let assignments = table
            .regular_columns()
            .iter()
            .map(|c| format!("{}=EXCLUDED.{}", c.name, c.name))
            .collect::<Vec<_>>()
            .join(",");

        Some(format!(
            " on conflict({}) do update set {}",
            column_list(table.primary_key_columns()),
            assignments
        ))
    }

    /// The `lo_manage` trigger name must fit the identifier limit, or
    /// PostgreSQL truncates it and long names collide
    fn check_column(
        &self,
        _registry: &TypeRegistry,
        table: &str,
        column: &Column,
    ) -> Result<(), SynthesisError> {
        if column.type_code != TypeCode::Blob {
            return Ok(());
        }
        check_identifier(table, &lo_trigger_name(table, &column.name), Dialect::PostgreSql)
    }

    fn large_object_trigger(&self, table: &str, column: &Column) -> Option<String> {
        if column.type_code != TypeCode::Blob {
            return None;
        }

        Some(format!(
            "CREATE TRIGGER {name} BEFORE UPDATE OR DELETE ON {table}\n\tFOR EACH ROW EXECUTE FUNCTION lo_manage({column})",
            name = lo_trigger_name(table, &column.name),
            table = table,
            column = column.name
        ))
    }
}

fn lo_trigger_name(table: &str, column: &str) -> String {
    format!("t_lo_{}_{}", table, column)
}

/// Oracle: `MERGE INTO ... USING (SELECT ... FROM DUAL)`
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleStrategy;

/// Alias of the bind-parameter row source in the MERGE statement
const MERGE_SOURCE_ALIAS: &str = "ORACDC";

/// Alias of the destination table in the MERGE statement
const MERGE_TARGET_ALIAS: &str = "D";

impl DialectStrategy for OracleStrategy {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn merge_subquery(&self, table: &TableDescriptor) -> Option<BoundStatement> {
        if table.has_only_key_columns() {
            return None;
        }

        let keys = table
            .primary_key_columns()
            .iter()
            .map(|c| (c, BindRole::Key));
        let values = table.regular_columns().iter().map(|c| (c, BindRole::Value));

        let (selects, params): (Vec<String>, Vec<BindParam>) = keys
            .chain(values)
            .map(|(c, role)| (format!("? as {}", c.name), BindParam::new(c.name.clone(), role)))
            .unzip();

        Some(BoundStatement::new(
            format!("(select {} from DUAL) {}", selects.join(","), MERGE_SOURCE_ALIAS),
            params,
        ))
    }

    fn insert_statement(&self, table: &TableDescriptor) -> BoundStatement {
        let statement = insert_statement(table);
        BoundStatement::new(
            format!(
                "insert into {}({})\nvalues({})",
                table.name(),
                column_list(table.primary_key_columns().iter().chain(table.regular_columns())),
                placeholders(statement.params.len())
            ),
            statement.params,
        )
    }

    fn upsert_statement(&self, table: &TableDescriptor) -> BoundStatement {
        let Some(source) = self.merge_subquery(table) else {
            return self.insert_statement(table);
        };

        let on = table
            .primary_key_columns()
            .iter()
            .map(|c| format!("{t}.{c}={s}.{c}", t = MERGE_TARGET_ALIAS, s = MERGE_SOURCE_ALIAS, c = c.name))
            .collect::<Vec<_>>()
            .join(" and ");

        let set = table
            .regular_columns()
            .iter()
            .map(|c| format!("{t}.{c}={s}.{c}", t = MERGE_TARGET_ALIAS, s = MERGE_SOURCE_ALIAS, c = c.name))
            .collect::<Vec<_>>()
            .join(",");

        let all = || table.primary_key_columns().iter().chain(table.regular_columns());
        let values = all()
            .map(|c| format!("{}.{}", MERGE_SOURCE_ALIAS, c.name))
            .collect::<Vec<_>>()
            .join(",");

        let sql = format!(
            "merge into {table} {t} using\n{source}\non ({on})\nwhen matched then update\nset {set}\nwhen not matched then\ninsert({columns})\nvalues({values})",
            table = table.name(),
            t = MERGE_TARGET_ALIAS,
            source = source.sql,
            on = on,
            set = set,
            columns = column_list(all()),
            values = values,
        );

        BoundStatement::new(sql, source.params)
    }
}
