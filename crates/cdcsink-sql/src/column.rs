//! Column rendering shared by the DDL and DML synthesizers

use cdcsink_core::{Column, SynthesisError, TableDescriptor, TypeRegistry};

use crate::strategy::DialectStrategy;

/// Render `<name> <native-type>[ not null]`
///
/// `not_null` is decided by the caller: key columns always pass `true`,
/// LOB columns always pass `false`.
pub fn render_column(
    strategy: &dyn DialectStrategy,
    registry: &TypeRegistry,
    table: &str,
    column: &Column,
    not_null: bool,
) -> Result<String, SynthesisError> {
    let native = native_type(strategy, registry, table, column)?;

    let mut rendered = String::with_capacity(column.name.len() + native.len() + 10);
    rendered.push_str(&column.name);
    rendered.push(' ');
    rendered.push_str(&native);
    if not_null {
        rendered.push_str(" not null");
    }
    Ok(rendered)
}

/// Native type of a column, failing when the dialect has no mapping or
/// cannot represent the column
pub fn native_type(
    strategy: &dyn DialectStrategy,
    registry: &TypeRegistry,
    table: &str,
    column: &Column,
) -> Result<String, SynthesisError> {
    strategy.check_column(registry, table, column)?;

    strategy
        .native_type(registry, column)
        .filter(|native| !native.is_empty())
        .ok_or_else(|| SynthesisError::UnsupportedType {
            table: table.to_string(),
            dialect: strategy.dialect(),
            column: column.name.clone(),
            type_code: column.type_code,
        })
}

/// Check that every column of the table has a native type
pub fn ensure_mapped(
    strategy: &dyn DialectStrategy,
    registry: &TypeRegistry,
    table: &TableDescriptor,
) -> Result<(), SynthesisError> {
    for column in table.all_columns() {
        native_type(strategy, registry, table.name(), column)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{strategy_for, MysqlStrategy, OracleStrategy};
    use cdcsink_core::{Dialect, TypeCode};
    use std::collections::BTreeMap;

    #[test]
    fn renders_nullability_suffix() {
        let registry = TypeRegistry::builtin();
        let column = Column::new("NAME", TypeCode::Varchar);

        assert_eq!(
            render_column(&MysqlStrategy, &registry, "T", &column, false).unwrap(),
            "NAME varchar(255)"
        );
        assert_eq!(
            render_column(&OracleStrategy, &registry, "T", &column, true).unwrap(),
            "NAME VARCHAR2(4000) not null"
        );
    }

    #[test]
    fn unmapped_type_is_an_error() {
        let mut oracle = BTreeMap::new();
        oracle.insert(TypeCode::Integer, "NUMBER(10)".to_string());
        let mut mappings = BTreeMap::new();
        mappings.insert(Dialect::Oracle, oracle);
        let registry = TypeRegistry::from_mappings(mappings);

        let column = Column::new("PAYLOAD", TypeCode::Blob);
        let err = render_column(strategy_for(Dialect::Oracle), &registry, "DOCS", &column, false)
            .unwrap_err();

        assert_eq!(
            err,
            SynthesisError::UnsupportedType {
                table: "DOCS".to_string(),
                dialect: Dialect::Oracle,
                column: "PAYLOAD".to_string(),
                type_code: TypeCode::Blob,
            }
        );
    }

    #[test]
    fn ensure_mapped_checks_every_group() {
        let mut mysql = BTreeMap::new();
        mysql.insert(TypeCode::Integer, "int".to_string());
        let mut mappings = BTreeMap::new();
        mappings.insert(Dialect::MySql, mysql);
        let registry = TypeRegistry::from_mappings(mappings);

        let table = TableDescriptor::builder("DOCS")
            .key(Column::new("ID", TypeCode::Integer))
            .lob(Column::new("BODY", TypeCode::Clob))
            .build()
            .unwrap();

        let err = ensure_mapped(strategy_for(Dialect::MySql), &registry, &table).unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedType { ref column, .. } if column == "BODY"));
    }
}
