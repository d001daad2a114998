//! CREATE TABLE synthesis

use cdcsink_core::{Dialect, SynthesisError, TableDescriptor, TypeRegistry};

use crate::binding::DdlStatements;
use crate::column::render_column;
use crate::dml::column_list;
use crate::strategy::strategy_for;

/// Build the `CREATE TABLE` statement for a table
///
/// Key columns come first and are always `not null`, followed by regular
/// columns, LOB columns and the named primary key constraint. PostgreSQL
/// BLOB columns additionally get a `lo_manage` trigger, returned as
/// separate statements after the `CREATE TABLE`.
pub fn create_table(
    registry: &TypeRegistry,
    table: &TableDescriptor,
    dialect: Dialect,
) -> Result<DdlStatements, SynthesisError> {
    table.validate_for(dialect)?;

    let strategy = strategy_for(dialect);
    let name = table.name();

    let mut sql = String::with_capacity(256);
    sql.push_str("create table ");
    sql.push_str(name);
    sql.push_str("(\n");

    let keys = table
        .primary_key_columns()
        .iter()
        .map(|c| render_column(strategy, registry, name, c, true).map(|r| format!("  {}", r)))
        .collect::<Result<Vec<_>, _>>()?;
    sql.push_str(&keys.join(",\n"));

    for column in table.regular_columns() {
        sql.push_str(",\n  ");
        sql.push_str(&render_column(strategy, registry, name, column, !column.nullable)?);
    }

    let mut triggers = Vec::new();
    for column in table.lob_columns().values() {
        // LOB content is bound after the row exists, so the column must accept NULL
        sql.push_str(",\n  ");
        sql.push_str(&render_column(strategy, registry, name, column, false)?);

        if let Some(trigger) = strategy.large_object_trigger(name, column) {
            triggers.push(trigger);
        }
    }

    sql.push_str(",\n  constraint ");
    sql.push_str(name);
    sql.push_str("_PK primary key(");
    sql.push_str(&column_list(table.primary_key_columns()));
    sql.push_str(")\n)");

    Ok(DdlStatements::new(sql, triggers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcsink_core::{Column, TypeCode};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn composite_key_layout() {
        let table = TableDescriptor::builder("LINES")
            .key(Column::new("ORDER_ID", TypeCode::BigInt))
            .key(Column::new("LINE_NO", TypeCode::Integer).with_nullable(true))
            .column(Column::new("SKU", TypeCode::Varchar).not_null())
            .column(Column::new("QTY", TypeCode::Integer))
            .build()
            .unwrap();

        let ddl = create_table(&TypeRegistry::builtin(), &table, Dialect::PostgreSql).unwrap();
        assert_eq!(ddl.len(), 1);
        assert_eq!(
            ddl.create_table(),
            "create table LINES(\n  ORDER_ID bigint not null,\n  LINE_NO integer not null,\n  SKU text not null,\n  QTY integer,\n  constraint LINES_PK primary key(ORDER_ID,LINE_NO)\n)"
        );
    }

    #[test]
    fn lob_columns_are_nullable_and_sorted() {
        let table = TableDescriptor::builder("DOCS")
            .key(Column::new("ID", TypeCode::Integer))
            .lob(Column::new("SCAN", TypeCode::Blob).not_null())
            .lob(Column::new("BODY", TypeCode::Clob))
            .build()
            .unwrap();

        let ddl = create_table(&TypeRegistry::builtin(), &table, Dialect::Oracle).unwrap();
        assert_eq!(
            ddl.create_table(),
            "create table DOCS(\n  ID NUMBER(10) not null,\n  BODY CLOB,\n  SCAN BLOB,\n  constraint DOCS_PK primary key(ID)\n)"
        );
        assert!(ddl.triggers().is_empty());
    }

    #[test]
    fn postgres_blob_triggers_follow_lob_order() {
        let table = TableDescriptor::builder("MEDIA")
            .key(Column::new("ID", TypeCode::Integer))
            .lob(Column::new("VIDEO", TypeCode::Blob))
            .lob(Column::new("CAPTION", TypeCode::Clob))
            .lob(Column::new("AUDIO", TypeCode::Blob))
            .build()
            .unwrap();

        let ddl = create_table(&TypeRegistry::builtin(), &table, Dialect::PostgreSql).unwrap();
        let statements = ddl.statements();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("create table MEDIA("));
        assert!(statements[0].contains("AUDIO lo,\n  CAPTION text,\n  VIDEO lo"));
        assert!(!statements[0].contains("TRIGGER"));
        assert!(statements[1].starts_with("CREATE TRIGGER t_lo_MEDIA_AUDIO "));
        assert!(statements[2].starts_with("CREATE TRIGGER t_lo_MEDIA_VIDEO "));
    }

    #[test]
    fn unmapped_lob_type_fails_whole_table() {
        let mut postgres = BTreeMap::new();
        postgres.insert(TypeCode::Integer, "integer".to_string());
        let mut mappings = BTreeMap::new();
        mappings.insert(Dialect::PostgreSql, postgres);
        let registry = TypeRegistry::from_mappings(mappings);

        let table = TableDescriptor::builder("DOCS")
            .key(Column::new("ID", TypeCode::Integer))
            .lob(Column::new("SCAN", TypeCode::Blob))
            .build()
            .unwrap();

        let err = create_table(&registry, &table, Dialect::PostgreSql).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::UnsupportedType { type_code: TypeCode::Blob, .. }
        ));
    }

    #[test]
    fn hash_in_identifier_only_for_oracle() {
        let table = TableDescriptor::builder("ORDERS")
            .key(Column::new("ORDER#", TypeCode::Integer))
            .column(Column::new("AMOUNT", TypeCode::Decimal).with_scale(2))
            .build()
            .unwrap();
        let registry = TypeRegistry::builtin();

        let ddl = create_table(&registry, &table, Dialect::Oracle).unwrap();
        assert!(ddl.create_table().contains("  ORDER# NUMBER(10) not null,\n"));

        for dialect in [Dialect::MySql, Dialect::PostgreSql] {
            let err = create_table(&registry, &table, dialect).unwrap_err();
            assert!(
                matches!(err, SynthesisError::InvalidIdentifier { ref identifier, .. } if identifier == "ORDER#"),
                "{}",
                dialect
            );
        }
    }

    #[test]
    fn mysql_scale_out_of_range_fails_table() {
        let table = TableDescriptor::builder("LEDGER")
            .key(Column::new("ID", TypeCode::Integer))
            .column(Column::new("AMT", TypeCode::Numeric).with_scale(-2))
            .build()
            .unwrap();
        let registry = TypeRegistry::builtin();

        let err = create_table(&registry, &table, Dialect::MySql).unwrap_err();
        assert_eq!(err.to_string(), "Table LEDGER: column AMT has scale -2 which mysql cannot represent");
        assert!(create_table(&registry, &table, Dialect::Oracle).is_ok());
    }
}
