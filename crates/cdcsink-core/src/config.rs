//! Configuration schema (cdcsink.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::dialect::Dialect;
use crate::registry::{RegistryError, TypeRegistry};

/// Per-dialect type literal overrides, keyed by type code name
///
/// ```toml
/// [types.mysql]
/// VARCHAR = "varchar(1024)"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeOverrides {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub mysql: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub postgresql: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub oracle: HashMap<String, String>,
}

impl TypeOverrides {
    /// Overrides declared for one dialect
    pub fn for_dialect(&self, dialect: Dialect) -> &HashMap<String, String> {
        match dialect {
            Dialect::MySql => &self.mysql,
            Dialect::PostgreSql => &self.postgresql,
            Dialect::Oracle => &self.oracle,
        }
    }

    /// Check if no overrides are declared
    pub fn is_empty(&self) -> bool {
        self.mysql.is_empty() && self.postgresql.is_empty() && self.oracle.is_empty()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Target dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Schema dictionary file (relative paths resolve against `project_root`)
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    /// Type literal overrides
    #[serde(default, skip_serializing_if = "TypeOverrides::is_empty")]
    pub types: TypeOverrides,

    /// Directory containing the config file
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            dictionary: None,
            types: TypeOverrides::default(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.project_root = std::env::current_dir().unwrap_or_default();
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Dictionary path resolved against the project root
    pub fn dictionary_path(&self) -> Option<PathBuf> {
        self.dictionary.as_ref().map(|p| {
            if p.is_relative() {
                self.project_root.join(p)
            } else {
                p.clone()
            }
        })
    }

    /// Build the type registry described by this config
    pub fn registry(&self) -> Result<TypeRegistry, RegistryError> {
        let registry = TypeRegistry::with_overrides(&self.types)?;
        registry.ensure_complete()?;
        Ok(registry)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
