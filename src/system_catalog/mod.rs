//! System catalog tables: typed column descriptions for the built-in
//! introspection views, and the process-wide registry holding them.

pub mod definition;
pub mod information_schema;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod settings_tree;

pub use definition::TableDefinition;
pub use reference::{ColumnReference, RowGranularity};
pub use registry::SystemCatalog;
pub use schema::{DescribeRow, TableSchema};
pub use settings_tree::{ColumnDecl, SettingsNode, SettingsTreeProjector};
