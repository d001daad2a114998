//! Target SQL dialects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target relational engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL and MariaDB
    #[serde(alias = "mariadb")]
    MySql,

    /// PostgreSQL
    #[serde(alias = "postgres", alias = "pg")]
    PostgreSql,

    /// Oracle Database
    Oracle,
}

impl Dialect {
    /// All supported dialects
    pub const ALL: [Dialect; 3] = [Self::MySql, Self::PostgreSql, Self::Oracle];

    /// Stable lower-case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Oracle => "oracle",
        }
    }

    /// Longest unquoted identifier the engine accepts, in bytes
    ///
    /// PostgreSQL silently truncates longer names, so they are rejected
    /// rather than generated. Oracle uses the 12.2+ limit.
    pub fn max_identifier_len(&self) -> usize {
        match self {
            Self::MySql => 64,
            Self::PostgreSql => 63,
            Self::Oracle => 128,
        }
    }

    /// Whether `#` may appear in an unquoted identifier
    ///
    /// MySQL starts a comment at `#` and PostgreSQL parses it as an operator.
    pub fn allows_hash_in_identifiers(&self) -> bool {
        matches!(self, Self::Oracle)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::MySql
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "oracle" => Ok(Self::Oracle),
            other => Err(format!(
                "unsupported dialect '{}'. Supported: mysql, postgresql, oracle",
                other
            )),
        }
    }
}
