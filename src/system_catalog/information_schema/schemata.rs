use crate::ident::TableIdentity;
use crate::system_catalog::definition::TableDefinition;
use crate::system_catalog::settings_tree::ColumnDecl;
use crate::types::DataType;

pub const NAME: &str = "schemata";

const COLS: &[ColumnDecl] = &[ColumnDecl::leaf("schema_name", DataType::String)];

pub fn definition() -> TableDefinition {
    TableDefinition::from_decls(TableIdentity::information_schema(NAME), COLS).with_primary_key(["schema_name"])
}
