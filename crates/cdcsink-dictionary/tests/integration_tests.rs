//! Integration tests for loading a dictionary and synthesizing its tables

mod fixtures;

use cdcsink_core::{Dialect, TypeRegistry};
use cdcsink_dictionary::{load, DictionaryError};
use cdcsink_sql::SqlSynthesizer;
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn load_scott_dictionary() {
    let file = fixtures::dictionary_file(fixtures::SCOTT_DICTIONARY);
    let tables = load(file.path()).unwrap();

    let ids: Vec<_> = tables.keys().copied().collect();
    assert_eq!(ids, vec![23456, 23460]);

    let emp = &tables[&23460];
    assert_eq!(emp.column_names(), vec!["EMPNO", "ENAME", "SAL", "HIREDATE", "RESUME"]);
    assert_eq!(emp.regular_columns()[1].numeric_scale, Some(2));
}

#[test]
fn loaded_tables_synthesize() {
    let file = fixtures::dictionary_file(fixtures::SCOTT_DICTIONARY);
    let tables = load(file.path()).unwrap();
    let registry = TypeRegistry::builtin();
    let synthesizer = SqlSynthesizer::new(&registry);

    let emp = &tables[&23460];
    let ddl = synthesizer.create_table(emp, Dialect::MySql).unwrap();
    assert_eq!(
        ddl.create_table(),
        "create table EMP(\n  EMPNO decimal(38,0) not null,\n  ENAME varchar(255),\n  SAL decimal(38,2),\n  HIREDATE datetime,\n  RESUME longtext,\n  constraint EMP_PK primary key(EMPNO)\n)"
    );

    let dml = synthesizer.generate_sink_sql(emp, Dialect::Oracle).unwrap();
    assert_eq!(dml.lob("RESUME").unwrap().sql, "update EMP set RESUME=? where EMPNO=?");
    assert_eq!(dml.upsert().bind_columns(), vec!["EMPNO", "ENAME", "SAL", "HIREDATE"]);
}

#[test]
fn missing_file() {
    let err = load(Path::new("/nonexistent/cdcsink/dictionary.json")).unwrap_err();
    assert!(matches!(err, DictionaryError::IoError(..)));
}

#[test]
fn invalid_identifier_in_dictionary() {
    let file = fixtures::dictionary_file(
        r#"{ "5": { "tableName": "BAD NAME", "columns": [
            { "columnName": "ID", "jdbcType": 4, "partOfPk": true }
        ] } }"#,
    );

    let err = load(file.path()).unwrap_err();
    assert!(matches!(err, DictionaryError::Descriptor(_)));
}
