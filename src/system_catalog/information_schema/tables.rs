use crate::ident::TableIdentity;
use crate::system_catalog::definition::TableDefinition;
use crate::system_catalog::information_schema::table_settings;
use crate::system_catalog::settings_tree::ColumnDecl;
use crate::types::DataType;

pub const NAME: &str = "tables";

const COLS: &[ColumnDecl] = &[
    ColumnDecl::leaf("schema_name", DataType::String),
    ColumnDecl::leaf("table_name", DataType::String),
    ColumnDecl::leaf("number_of_shards", DataType::Integer),
    ColumnDecl::leaf("number_of_replicas", DataType::String),
    ColumnDecl::leaf("clustered_by", DataType::String),
    ColumnDecl::leaf("partitioned_by", DataType::String),
    ColumnDecl::leaf("blobs_path", DataType::String),
    table_settings::DECL,
];

pub fn definition() -> TableDefinition {
    TableDefinition::from_decls(TableIdentity::information_schema(NAME), COLS)
        .with_primary_key(["schema_name", "table_name"])
}
