//! Entry point bundling the registry with both synthesizers

use cdcsink_core::{Dialect, SynthesisError, TableDescriptor, TypeRegistry};

use crate::binding::{DdlStatements, SinkStatements};
use crate::{ddl, dml};

/// DDL and DML generated for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSql {
    pub ddl: DdlStatements,
    pub dml: SinkStatements,
}

/// Compiles table descriptors into SQL against a shared type registry
///
/// Holds no state besides the borrowed registry; safe to share between
/// threads and to call repeatedly.
#[derive(Debug, Clone, Copy)]
pub struct SqlSynthesizer<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> SqlSynthesizer<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// `CREATE TABLE` plus auxiliary scripts
    pub fn create_table(
        &self,
        table: &TableDescriptor,
        dialect: Dialect,
    ) -> Result<DdlStatements, SynthesisError> {
        let ddl = ddl::create_table(self.registry, table, dialect)?;
        tracing::debug!(table = table.name(), %dialect, statements = ddl.len(), "generated DDL");
        Ok(ddl)
    }

    /// Insert, upsert, update, delete and per-LOB statements
    pub fn generate_sink_sql(
        &self,
        table: &TableDescriptor,
        dialect: Dialect,
    ) -> Result<SinkStatements, SynthesisError> {
        let dml = dml::generate_sink_sql(self.registry, table, dialect)?;
        tracing::debug!(table = table.name(), %dialect, statements = dml.len(), "generated DML");
        Ok(dml)
    }

    /// Both DDL and DML; fails without partial output if either fails
    pub fn synthesize(&self, table: &TableDescriptor, dialect: Dialect) -> Result<TableSql, SynthesisError> {
        let ddl = self.create_table(table, dialect)?;
        let dml = self.generate_sink_sql(table, dialect)?;
        Ok(TableSql { ddl, dml })
    }
}
