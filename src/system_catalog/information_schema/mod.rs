pub mod schemata;
pub mod table_partitions;
pub mod table_settings;
pub mod tables;

use crate::system_catalog::definition::TableDefinition;

/// Built-in information_schema tables.
pub fn definitions() -> Vec<TableDefinition> {
    vec![
        schemata::definition(),
        tables::definition(),
        table_partitions::definition(),
    ]
}
