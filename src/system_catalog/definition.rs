//! Declarative system table definitions.
//!
//! A definition only says which columns a table has and which of them form
//! its key; `build()` is the same for every table.

use serde::Deserialize;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::ident::{ColumnPath, TableIdentity};
use crate::system_catalog::reference::RowGranularity;
use crate::system_catalog::schema::TableSchema;
use crate::system_catalog::settings_tree::{
    json_members, named_nodes, ordered_members, ColumnDecl, JsonNode, SettingsNode, SettingsTreeProjector,
};

#[derive(Debug, Clone)]
pub struct TableDefinition {
    ident: TableIdentity,
    granularity: RowGranularity,
    columns: Vec<(String, SettingsNode)>,
    primary_key: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionFile {
    schema: String,
    name: String,
    #[serde(default)]
    granularity: RowGranularity,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(deserialize_with = "ordered_members")]
    columns: Vec<(String, JsonNode)>,
}

impl TableDefinition {
    pub fn new(ident: TableIdentity, columns: Vec<(String, SettingsNode)>) -> Self {
        Self { ident, granularity: RowGranularity::Doc, columns, primary_key: Vec::new() }
    }

    pub fn from_decls(ident: TableIdentity, decls: &[ColumnDecl]) -> Self {
        Self::new(ident, named_nodes(decls))
    }

    pub fn with_granularity(mut self, granularity: RowGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Key columns as dotted paths, in precedence order.
    pub fn with_primary_key<I, S>(mut self, key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = key.into_iter().map(Into::into).collect();
        self
    }

    pub fn ident(&self) -> &TableIdentity { &self.ident }
    pub fn granularity(&self) -> RowGranularity { self.granularity }
    pub fn columns(&self) -> &[(String, SettingsNode)] { &self.columns }

    pub fn build(&self) -> CatalogResult<TableSchema> {
        let projector = SettingsTreeProjector::new(self.ident.clone(), self.granularity);
        let references = projector.project_columns(&self.columns)?;
        let key = self
            .primary_key
            .iter()
            .map(|k| ColumnPath::parse(k))
            .collect::<CatalogResult<Vec<_>>>()?;
        TableSchema::build(self.ident.clone(), references, key)
    }

    pub fn from_json_str(source_name: &str, text: &str) -> CatalogResult<Self> {
        let file: DefinitionFile = serde_json::from_str(text)
            .map_err(|e| CatalogError::invalid_definition(source_name, e.to_string()))?;
        let columns = json_members(file.columns)?;
        Ok(TableDefinition::new(TableIdentity::new(file.schema, file.name), columns)
            .with_granularity(file.granularity)
            .with_primary_key(file.primary_key))
    }

    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::invalid_definition(source_name.as_str(), e.to_string()))?;
        Self::from_json_str(&source_name, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    const COLS: &[ColumnDecl] = &[
        ColumnDecl::leaf("table_name", DataType::String),
        ColumnDecl::leaf("schema_name", DataType::String),
        ColumnDecl::leaf("number_of_shards", DataType::Integer),
    ];

    #[test]
    fn builds_through_projector() {
        let schema = TableDefinition::from_decls(TableIdentity::information_schema("tables"), COLS)
            .with_primary_key(["schema_name", "table_name"])
            .build()
            .unwrap();
        let cols: Vec<String> = schema.columns().map(|c| c.path().to_string()).collect();
        assert_eq!(cols, vec!["number_of_shards", "schema_name", "table_name"]);
        let keys: Vec<String> = schema.key_columns().map(|c| c.path().to_string()).collect();
        assert_eq!(keys, vec!["schema_name", "table_name"]);
    }

    #[test]
    fn malformed_key_path_fails_build() {
        let def = TableDefinition::from_decls(TableIdentity::information_schema("tables"), COLS).with_primary_key(["schema_name."]);
        assert!(matches!(def.build(), Err(CatalogError::InvalidPath { .. })));
    }

    #[test]
    fn json_definition() {
        let text = r#"{
            "schema": "sys",
            "name": "shards",
            "granularity": "shard",
            "primary_key": ["id"],
            "columns": { "id": "integer", "recovery": { "stage": "string", "size": { "used": "long" } } }
        }"#;
        let def = TableDefinition::from_json_str("shards.json", text).unwrap();
        assert_eq!(def.ident(), &TableIdentity::new("sys", "shards"));
        assert_eq!(def.granularity(), RowGranularity::Shard);
        let schema = def.build().unwrap();
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.resolve_str("recovery.size.used").unwrap().data_type(), DataType::Long);
        assert!(schema.columns().all(|c| c.granularity() == RowGranularity::Shard));
    }

    #[test]
    fn json_definition_rejects_unknown_fields() {
        let text = r#"{ "schema": "sys", "name": "x", "columns": {}, "extra": 1 }"#;
        let err = TableDefinition::from_json_str("x.json", text).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDefinition { ref source_name, .. } if source_name == "x.json"));
    }
}
