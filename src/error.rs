//! Catalog error model and mapping helpers.
//!
//! Everything except `NotFound` and `UnknownTable` describes a malformed
//! static declaration and aborts catalog bootstrap. Those two are normal
//! lookup outcomes.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogError {
    #[error("invalid column path '{input}': {reason}")]
    InvalidPath { input: String, reason: String },

    #[error("duplicate column '{path}' in table {table}")]
    DuplicatePath { table: String, path: String },

    #[error("column '{path}' belongs to table {owner}, not {table}")]
    ForeignReference { table: String, owner: String, path: String },

    #[error("column '{path}' in table {table} has no enclosing object column")]
    OrphanPath { table: String, path: String },

    #[error("key column '{path}' is not a column of table {table}")]
    UnknownKeyPath { table: String, path: String },

    #[error("key column '{path}' is declared more than once for table {table}")]
    DuplicateKeyPath { table: String, path: String },

    #[error("settings leaf '{path}' has no declared type")]
    MissingLeafType { path: String },

    #[error("unknown data type '{name}'")]
    UnknownDataType { name: String },

    #[error("column '{path}' not found in table {table}")]
    NotFound { table: String, path: String },

    #[error("system table '{name}' not found")]
    UnknownTable { name: String },

    #[error("system table {name} is defined more than once")]
    DuplicateTable { name: String },

    #[error("invalid table definition in {source_name}: {message}")]
    InvalidDefinition { source_name: String, message: String },
}

impl CatalogError {
    pub fn invalid_path(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidPath { input: input.into(), reason: reason.into() }
    }

    pub fn invalid_definition(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::InvalidDefinition { source_name: source_name.into(), message: message.into() }
    }

    pub fn code_str(&self) -> &'static str {
        match self {
            CatalogError::InvalidPath { .. } => "invalid_path",
            CatalogError::DuplicatePath { .. } => "duplicate_path",
            CatalogError::ForeignReference { .. } => "foreign_reference",
            CatalogError::OrphanPath { .. } => "orphan_path",
            CatalogError::UnknownKeyPath { .. } => "unknown_key_path",
            CatalogError::DuplicateKeyPath { .. } => "duplicate_key_path",
            CatalogError::MissingLeafType { .. } => "missing_leaf_type",
            CatalogError::UnknownDataType { .. } => "unknown_data_type",
            CatalogError::NotFound { .. } => "not_found",
            CatalogError::UnknownTable { .. } => "unknown_table",
            CatalogError::DuplicateTable { .. } => "duplicate_table",
            CatalogError::InvalidDefinition { .. } => "invalid_definition",
        }
    }

    /// False for the lookup misses a query can legitimately produce.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CatalogError::NotFound { .. } | CatalogError::UnknownTable { .. })
    }

    /// SQLSTATE reported when the error reaches a SQL client.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "42703",     // undefined_column
            CatalogError::UnknownTable { .. } => "42P01", // undefined_table
            CatalogError::DuplicatePath { .. } | CatalogError::DuplicateKeyPath { .. } => "42701", // duplicate_column
            CatalogError::DuplicateTable { .. } => "42P07", // duplicate_table
            CatalogError::UnknownDataType { .. } => "42704", // undefined_object
            _ => "XX000",
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
