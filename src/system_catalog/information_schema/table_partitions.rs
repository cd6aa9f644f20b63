use crate::ident::TableIdentity;
use crate::system_catalog::definition::TableDefinition;
use crate::system_catalog::information_schema::table_settings;
use crate::system_catalog::settings_tree::ColumnDecl;
use crate::types::DataType;

pub const NAME: &str = "table_partitions";

const COLS: &[ColumnDecl] = &[
    ColumnDecl::leaf("table_name", DataType::String),
    ColumnDecl::leaf("schema_name", DataType::String),
    ColumnDecl::leaf("partition_ident", DataType::String),
    // partition column values keyed by column name; the shape depends on the table
    ColumnDecl::leaf("values", DataType::Object),
    ColumnDecl::leaf("number_of_shards", DataType::Integer),
    ColumnDecl::leaf("number_of_replicas", DataType::String),
    table_settings::DECL,
];

/// Declared without a primary key.
pub fn definition() -> TableDefinition {
    TableDefinition::from_decls(TableIdentity::information_schema(NAME), COLS)
}
