//! Generated statements and their positional bind order

use std::collections::BTreeMap;

use cdcsink_core::Dialect;

/// What a bound `?` placeholder carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindRole {
    /// Primary key column value
    Key,

    /// Regular (non-key, non-LOB) column value
    Value,

    /// Large-object content
    Lob,
}

/// One positional parameter of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindParam {
    /// Column whose value is bound
    pub column: String,

    /// Role of the value
    pub role: BindRole,
}

impl BindParam {
    pub fn new(column: impl Into<String>, role: BindRole) -> Self {
        Self {
            column: column.into(),
            role,
        }
    }
}

/// Parameterized SQL text plus the order its `?` placeholders bind in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundStatement {
    /// Statement text
    pub sql: String,

    /// One entry per `?`, in placeholder order
    pub params: Vec<BindParam>,
}

impl BoundStatement {
    pub fn new(sql: impl Into<String>, params: Vec<BindParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Number of `?` placeholders in the text
    ///
    /// Identifiers are validated before synthesis and never contain `?`.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Column names in bind order
    pub fn bind_columns(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.column.as_str()).collect()
    }
}

/// Key of a generated DML statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatementKey {
    Insert,
    Upsert,
    Update,
    Delete,
    /// Standalone update of one LOB column
    Lob(String),
}

impl StatementKey {
    /// Operation tag (`INSERT`, `UPSERT`, ...) or the LOB column name
    pub fn tag(&self) -> &str {
        match self {
            Self::Insert => "INSERT",
            Self::Upsert => "UPSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Lob(column) => column,
        }
    }
}

impl std::fmt::Display for StatementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// DDL output: `CREATE TABLE` followed by any auxiliary scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdlStatements {
    create_table: String,
    triggers: Vec<String>,
}

impl DdlStatements {
    pub(crate) fn new(create_table: String, triggers: Vec<String>) -> Self {
        Self {
            create_table,
            triggers,
        }
    }

    /// The `CREATE TABLE` statement
    pub fn create_table(&self) -> &str {
        &self.create_table
    }

    /// PostgreSQL large-object trigger scripts, in LOB column order
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// All statements; index 0 is always `CREATE TABLE`
    pub fn statements(&self) -> Vec<&str> {
        std::iter::once(self.create_table.as_str())
            .chain(self.triggers.iter().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        1 + self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// DML output for one table and dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkStatements {
    pub(crate) table: String,
    pub(crate) dialect: Dialect,
    pub(crate) insert: BoundStatement,
    pub(crate) upsert: BoundStatement,
    pub(crate) update: Option<BoundStatement>,
    pub(crate) delete: BoundStatement,
    pub(crate) lobs: BTreeMap<String, BoundStatement>,
}

impl SinkStatements {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Plain insert (key columns, then regular columns)
    pub fn insert(&self) -> &BoundStatement {
        &self.insert
    }

    /// Insert-or-update keyed by primary key
    pub fn upsert(&self) -> &BoundStatement {
        &self.upsert
    }

    /// Update of regular columns; absent when the table has none
    pub fn update(&self) -> Option<&BoundStatement> {
        self.update.as_ref()
    }

    pub fn delete(&self) -> &BoundStatement {
        &self.delete
    }

    /// Standalone update for one LOB column
    pub fn lob(&self, column: &str) -> Option<&BoundStatement> {
        self.lobs.get(column)
    }

    /// Look up a statement by key
    pub fn get(&self, key: &StatementKey) -> Option<&BoundStatement> {
        match key {
            StatementKey::Insert => Some(&self.insert),
            StatementKey::Upsert => Some(&self.upsert),
            StatementKey::Update => self.update.as_ref(),
            StatementKey::Delete => Some(&self.delete),
            StatementKey::Lob(column) => self.lobs.get(column),
        }
    }

    /// All statements in key order
    pub fn iter(&self) -> impl Iterator<Item = (StatementKey, &BoundStatement)> {
        [
            (StatementKey::Insert, Some(&self.insert)),
            (StatementKey::Upsert, Some(&self.upsert)),
            (StatementKey::Update, self.update.as_ref()),
            (StatementKey::Delete, Some(&self.delete)),
        ]
        .into_iter()
        .filter_map(|(key, stmt)| stmt.map(|s| (key, s)))
        .chain(
            self.lobs
                .iter()
                .map(|(column, stmt)| (StatementKey::Lob(column.clone()), stmt)),
        )
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Statement text keyed by operation tag or LOB column name
    pub fn to_tag_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(key, stmt)| (key.tag().to_string(), stmt.sql.clone()))
            .collect()
    }
}
