//! Sink DML synthesis
//!
//! Bind order contract, identical for every dialect:
//! - INSERT / UPSERT: key columns, then regular columns
//! - UPDATE: regular columns, then key columns
//! - DELETE: key columns
//! - LOB update: the LOB column, then key columns

use std::collections::BTreeMap;

use cdcsink_core::{Column, Dialect, SynthesisError, TableDescriptor, TypeRegistry};

use crate::binding::{BindParam, BindRole, BoundStatement, SinkStatements};
use crate::column::ensure_mapped;
use crate::strategy::strategy_for;

/// Build every DML statement the sink needs for a table
pub fn generate_sink_sql(
    registry: &TypeRegistry,
    table: &TableDescriptor,
    dialect: Dialect,
) -> Result<SinkStatements, SynthesisError> {
    table.validate_for(dialect)?;

    let strategy = strategy_for(dialect);
    ensure_mapped(strategy, registry, table)?;

    let name = table.name();
    let key_where = key_where_clause(table);

    let update = if table.has_only_key_columns() {
        None
    } else {
        let set = table
            .regular_columns()
            .iter()
            .map(|c| format!("{}=?", c.name))
            .collect::<Vec<_>>()
            .join(",");

        let mut params = bind_params(table.regular_columns(), BindRole::Value);
        params.extend(key_where.params.iter().cloned());

        Some(BoundStatement::new(
            format!("update {} set {}{}", name, set, key_where.sql),
            params,
        ))
    };

    let delete = BoundStatement::new(
        format!("delete from {}{}", name, key_where.sql),
        key_where.params.clone(),
    );

    let lobs = table
        .lob_columns()
        .values()
        .map(|column| {
            let mut params = vec![BindParam::new(column.name.clone(), BindRole::Lob)];
            params.extend(key_where.params.iter().cloned());
            let statement = BoundStatement::new(
                format!("update {} set {}=?{}", name, column.name, key_where.sql),
                params,
            );
            (column.name.clone(), statement)
        })
        .collect::<BTreeMap<_, _>>();

    Ok(SinkStatements {
        table: name.to_string(),
        dialect,
        insert: strategy.insert_statement(table),
        upsert: strategy.upsert_statement(table),
        update,
        delete,
        lobs,
    })
}

/// ` where K1=? and K2=?` over the key columns in declaration order
pub(crate) fn key_where_clause(table: &TableDescriptor) -> BoundStatement {
    let predicates = table
        .primary_key_columns()
        .iter()
        .map(|c| format!("{}=?", c.name))
        .collect::<Vec<_>>()
        .join(" and ");

    BoundStatement::new(
        format!(" where {}", predicates),
        bind_params(table.primary_key_columns(), BindRole::Key),
    )
}

/// `insert into T(keys...,values...) values(?,...)`
pub(crate) fn insert_statement(table: &TableDescriptor) -> BoundStatement {
    let mut params = bind_params(table.primary_key_columns(), BindRole::Key);
    params.extend(bind_params(table.regular_columns(), BindRole::Value));

    let columns = column_list(
        table
            .primary_key_columns()
            .iter()
            .chain(table.regular_columns()),
    );

    BoundStatement::new(
        format!(
            "insert into {}({}) values({})",
            table.name(),
            columns,
            placeholders(params.len())
        ),
        params,
    )
}

/// Comma separated column names
pub(crate) fn column_list<'a>(columns: impl IntoIterator<Item = &'a Column>) -> String {
    columns
        .into_iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// `?,?,...` with `count` placeholders
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn bind_params(columns: &[Column], role: BindRole) -> Vec<BindParam> {
    columns
        .iter()
        .map(|c| BindParam::new(c.name.clone(), role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcsink_core::TypeCode;
    use pretty_assertions::assert_eq;

    fn accounts() -> TableDescriptor {
        TableDescriptor::builder("ACCOUNTS")
            .key(Column::new("BANK", TypeCode::Integer))
            .key(Column::new("NO", TypeCode::Varchar))
            .column(Column::new("OWNER", TypeCode::Varchar))
            .column(Column::new("BALANCE", TypeCode::Decimal).with_scale(2))
            .lob(Column::new("CONTRACT", TypeCode::Blob))
            .build()
            .unwrap()
    }

    #[test]
    fn where_clause_over_composite_key() {
        let clause = key_where_clause(&accounts());
        assert_eq!(clause.sql, " where BANK=? and NO=?");
        assert_eq!(clause.bind_columns(), vec!["BANK", "NO"]);
    }

    #[test]
    fn update_binds_values_then_keys() {
        let dml = generate_sink_sql(&TypeRegistry::builtin(), &accounts(), Dialect::MySql).unwrap();
        let update = dml.update().unwrap();

        assert_eq!(update.sql, "update ACCOUNTS set OWNER=?,BALANCE=? where BANK=? and NO=?");
        assert_eq!(update.bind_columns(), vec!["OWNER", "BALANCE", "BANK", "NO"]);
        assert_eq!(update.params[0].role, BindRole::Value);
        assert_eq!(update.params[3].role, BindRole::Key);
    }

    #[test]
    fn delete_binds_only_keys() {
        let dml = generate_sink_sql(&TypeRegistry::builtin(), &accounts(), Dialect::Oracle).unwrap();
        assert_eq!(dml.delete().sql, "delete from ACCOUNTS where BANK=? and NO=?");
        assert!(dml.delete().params.iter().all(|p| p.role == BindRole::Key));
    }

    #[test]
    fn lob_update_per_column() {
        let dml = generate_sink_sql(&TypeRegistry::builtin(), &accounts(), Dialect::PostgreSql).unwrap();
        let lob = dml.lob("CONTRACT").unwrap();

        assert_eq!(lob.sql, "update ACCOUNTS set CONTRACT=? where BANK=? and NO=?");
        assert_eq!(
            lob.params,
            vec![
                BindParam::new("CONTRACT", BindRole::Lob),
                BindParam::new("BANK", BindRole::Key),
                BindParam::new("NO", BindRole::Key),
            ]
        );
    }

    #[test]
    fn insert_excludes_lob_columns() {
        let dml = generate_sink_sql(&TypeRegistry::builtin(), &accounts(), Dialect::MySql).unwrap();
        assert_eq!(
            dml.insert().sql,
            "insert into ACCOUNTS(BANK,NO,OWNER,BALANCE) values(?,?,?,?)"
        );
    }

    #[test]
    fn key_only_table_has_no_update() {
        let table = TableDescriptor::builder("TAGS")
            .key(Column::new("NAME", TypeCode::Varchar))
            .lob(Column::new("ICON", TypeCode::Blob))
            .build()
            .unwrap();

        let dml = generate_sink_sql(&TypeRegistry::builtin(), &table, Dialect::MySql).unwrap();
        assert!(dml.update().is_none());
        let tags: Vec<_> = dml.to_tag_map().into_keys().collect();
        assert_eq!(tags, vec!["DELETE", "ICON", "INSERT", "UPSERT"]);
    }

    #[test]
    fn placeholders_match_bind_params() {
        for dialect in Dialect::ALL {
            let dml = generate_sink_sql(&TypeRegistry::builtin(), &accounts(), dialect).unwrap();
            for (key, stmt) in dml.iter() {
                assert_eq!(
                    stmt.placeholder_count(),
                    stmt.params.len(),
                    "{} {} has mismatched placeholders",
                    dialect,
                    key
                );
            }
        }
    }

    #[test]
    fn dialect_identifier_rules_apply_to_dml() {
        let table = TableDescriptor::builder("ORDERS")
            .key(Column::new("ORDER#", TypeCode::Integer))
            .column(Column::new("AMOUNT", TypeCode::Decimal).with_scale(40))
            .build()
            .unwrap();
        let registry = TypeRegistry::builtin();

        assert!(generate_sink_sql(&registry, &table, Dialect::Oracle).is_ok());
        assert!(matches!(
            generate_sink_sql(&registry, &table, Dialect::PostgreSql).unwrap_err(),
            SynthesisError::InvalidIdentifier { .. }
        ));
        assert!(matches!(
            generate_sink_sql(&registry, &table, Dialect::MySql).unwrap_err(),
            SynthesisError::InvalidIdentifier { .. }
        ));

        let renamed = TableDescriptor::builder("ORDERS")
            .key(Column::new("ORDER_NO", TypeCode::Integer))
            .column(Column::new("AMOUNT", TypeCode::Decimal).with_scale(40))
            .build()
            .unwrap();
        assert!(matches!(
            generate_sink_sql(&registry, &renamed, Dialect::MySql).unwrap_err(),
            SynthesisError::InvalidScale { scale: 40, .. }
        ));
    }
}
