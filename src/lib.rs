//! sysmeta: typed metadata for system catalog tables.
//!
//! Nested per-table settings are flattened into addressable columns, and
//! each table's columns are kept in a stable path order with an ordered key.

pub mod config;
pub mod error;
pub mod ident;
pub mod system_catalog;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use ident::{ColumnPath, TableIdentity};
pub use system_catalog::{ColumnReference, RowGranularity, SystemCatalog, TableDefinition, TableSchema};
pub use types::DataType;
