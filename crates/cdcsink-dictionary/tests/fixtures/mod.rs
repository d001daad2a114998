//! Dictionary files shared by the loader integration tests

use std::io::Write;

use tempfile::NamedTempFile;

/// Two tables: a classic department table and an employee table with a CLOB
pub const SCOTT_DICTIONARY: &str = r#"{
    "23456": {
        "tableOwner": "SCOTT",
        "tableName": "DEPT",
        "columns": [
            { "columnName": "DEPTNO", "jdbcType": 2, "nullable": false, "dataScale": 0, "partOfPk": true },
            { "columnName": "DNAME", "jdbcType": 12, "nullable": true, "partOfPk": false },
            { "columnName": "LOC", "jdbcType": 12, "nullable": true, "partOfPk": false }
        ]
    },
    "23460": {
        "tableOwner": "SCOTT",
        "tableName": "EMP",
        "columns": [
            { "columnName": "EMPNO", "jdbcType": 2, "nullable": false, "dataScale": 0, "partOfPk": true },
            { "columnName": "ENAME", "jdbcType": 12, "nullable": true, "partOfPk": false },
            { "columnName": "SAL", "jdbcType": 2, "nullable": true, "dataScale": 2, "partOfPk": false },
            { "columnName": "HIREDATE", "jdbcType": 91, "nullable": true, "partOfPk": false },
            { "columnName": "RESUME", "jdbcType": 2005, "nullable": true, "partOfPk": false }
        ]
    }
}"#;

/// Write JSON to a temporary dictionary file
pub fn dictionary_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
