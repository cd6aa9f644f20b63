use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::ident::{normalize_identifier, TableIdentity, INFORMATION_SCHEMA};
use crate::system_catalog::definition::TableDefinition;
use crate::system_catalog::information_schema;
use crate::system_catalog::schema::TableSchema;
use crate::types::DataType;

/// All system tables known to one process, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct SystemCatalog {
    tables: BTreeMap<TableIdentity, Arc<TableSchema>>,
}

/// One row of the information_schema.columns listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRow {
    pub table_schema: String,
    pub table_name: String,
    pub column_name: String,
    pub ordinal_position: u32,
    pub data_type: DataType,
}

impl SystemCatalog {
    pub fn empty() -> Self { Self::default() }

    pub fn from_definitions<I>(definitions: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = TableDefinition>,
    {
        let mut catalog = Self::empty();
        for def in definitions {
            catalog.insert(def.build()?)?;
        }
        Ok(catalog)
    }

    pub fn builtin() -> CatalogResult<Self> {
        Self::from_definitions(information_schema::definitions())
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let mut definitions = if config.include_builtin { information_schema::definitions() } else { Vec::new() };
        for file in config.definition_files()? {
            match TableDefinition::from_file(&file) {
                Ok(def) => definitions.push(def),
                Err(e) => {
                    warn!(target: "sysmeta::catalog", "rejecting definition {}: {}", file.display(), e);
                    return Err(e);
                }
            }
        }
        Self::from_definitions(definitions)
    }

    pub fn insert(&mut self, schema: TableSchema) -> CatalogResult<()> {
        let ident = schema.ident().clone();
        if self.tables.contains_key(&ident) {
            return Err(CatalogError::DuplicateTable { name: ident.fqn() });
        }
        self.tables.insert(ident, Arc::new(schema));
        Ok(())
    }

    pub fn len(&self) -> usize { self.tables.len() }
    pub fn is_empty(&self) -> bool { self.tables.is_empty() }

    /// Tables ordered by (schema, name).
    pub fn tables(&self) -> impl Iterator<Item = &Arc<TableSchema>> + '_ {
        self.tables.values()
    }

    pub fn table(&self, ident: &TableIdentity) -> CatalogResult<Arc<TableSchema>> {
        self.tables
            .get(ident)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTable { name: ident.fqn() })
    }

    /// Resolve a user-typed table reference such as `information_schema.tables`,
    /// `"information_schema"."tables"`, or a bare name, which is looked up in
    /// information_schema.
    pub fn lookup(&self, input: &str) -> CatalogResult<Arc<TableSchema>> {
        // Normalize: trim, strip alias after whitespace, strip semicolon and outer quotes
        let mut base = input.trim();
        if let Some(idx) = base.find(char::is_whitespace) { base = &base[..idx]; }
        base = base.strip_suffix(';').unwrap_or(base);
        let parts: Vec<String> = if base.len() >= 2 && base.starts_with('\'') && base.ends_with('\'') {
            base[1..base.len() - 1].split('.').map(normalize_identifier).collect()
        } else if base.len() >= 2 && base.starts_with('"') && base.ends_with('"') && !base[1..base.len() - 1].contains('"') {
            // one quoted name spanning schema and table: case is kept
            base[1..base.len() - 1].split('.').map(str::to_string).collect()
        } else {
            base.split('.').map(normalize_identifier).collect()
        };
        let ident = match parts.as_slice() {
            [name] => TableIdentity::new(INFORMATION_SCHEMA, name.as_str()),
            [.., schema, name] => TableIdentity::new(schema.as_str(), name.as_str()),
            [] => return Err(CatalogError::UnknownTable { name: input.to_string() }),
        };
        self.tables
            .get(&ident)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTable { name: input.trim().to_string() })
    }

    /// information_schema.columns rows for every registered table.
    pub fn column_rows(&self) -> Vec<ColumnRow> {
        let mut rows = Vec::new();
        for t in self.tables.values() {
            for d in t.describe() {
                rows.push(ColumnRow {
                    table_schema: t.ident().schema().to_string(),
                    table_name: t.ident().name().to_string(),
                    column_name: d.column_name,
                    ordinal_position: d.ordinal_position,
                    data_type: d.data_type,
                });
            }
        }
        rows
    }
}

static CATALOG: Lazy<RwLock<Arc<SystemCatalog>>> = Lazy::new(|| RwLock::new(Arc::new(SystemCatalog::empty())));
static BOOTSTRAP: OnceCell<Result<(), CatalogError>> = OnceCell::new();

/// Snapshot of the installed catalog. Holders keep their snapshot across swaps.
pub fn current() -> Arc<SystemCatalog> {
    CATALOG.read().clone()
}

/// Replace the installed catalog wholesale, returning the previous one.
pub fn install(catalog: SystemCatalog) -> Arc<SystemCatalog> {
    let tables = catalog.len();
    let previous = std::mem::replace(&mut *CATALOG.write(), Arc::new(catalog));
    info!(target: "sysmeta::catalog", "installed system catalog: tables={}", tables);
    previous
}

/// Install the built-in catalog unless one is already installed. Runs once.
pub fn ensure_bootstrapped() -> CatalogResult<Arc<SystemCatalog>> {
    BOOTSTRAP
        .get_or_init(|| {
            if current().is_empty() {
                install(SystemCatalog::builtin()?);
            }
            Ok(())
        })
        .clone()?;
    Ok(current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system_catalog::settings_tree::SettingsNode;

    fn tiny(schema: &str, name: &str) -> TableDefinition {
        TableDefinition::new(TableIdentity::new(schema, name), vec![("id".to_string(), SettingsNode::leaf(DataType::Long))])
    }

    #[test]
    fn builtin_has_information_schema_tables() {
        let catalog = SystemCatalog::builtin().unwrap();
        let names: Vec<String> = catalog.tables().map(|t| t.ident().fqn()).collect();
        assert_eq!(
            names,
            vec!["information_schema.schemata", "information_schema.table_partitions", "information_schema.tables"]
        );
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let err = SystemCatalog::from_definitions(vec![tiny("sys", "a"), tiny("sys", "a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTable { name: "sys.a".into() });
    }

    #[test]
    fn broken_definition_aborts_catalog() {
        let broken = TableDefinition::new(TableIdentity::new("sys", "b"), vec![("x".to_string(), SettingsNode::untyped())]);
        let err = SystemCatalog::from_definitions(vec![tiny("sys", "a"), broken]).unwrap_err();
        assert_eq!(err, CatalogError::MissingLeafType { path: "x".into() });
    }

    #[test]
    fn lookup_normalizes_input() {
        let catalog = SystemCatalog::builtin().unwrap();
        for input in [
            "information_schema.table_partitions",
            "INFORMATION_SCHEMA.Table_Partitions",
            "table_partitions",
            "  table_partitions p",
            "table_partitions;",
            "'information_schema.table_partitions'",
            "\"information_schema\".\"table_partitions\"",
            "\"information_schema.table_partitions\"",
            "\"information_schema.table_partitions\";",
            "\"table_partitions\"",
            "crate.information_schema.table_partitions",
        ] {
            let t = catalog.lookup(input).unwrap_or_else(|e| panic!("{}: {}", input, e));
            assert_eq!(t.ident().name(), "table_partitions", "{}", input);
        }
        assert!(matches!(catalog.lookup("\"TABLE_PARTITIONS\""), Err(CatalogError::UnknownTable { .. })));
        assert!(matches!(catalog.lookup("\"INFORMATION_SCHEMA.TABLE_PARTITIONS\""), Err(CatalogError::UnknownTable { .. })));
        assert!(matches!(catalog.lookup("sys.nodes"), Err(CatalogError::UnknownTable { .. })));
    }

    #[test]
    fn table_miss_is_recoverable() {
        let catalog = SystemCatalog::builtin().unwrap();
        let err = catalog.table(&TableIdentity::new("sys", "nodes")).unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn column_rows_follow_table_then_column_order() {
        let catalog = SystemCatalog::from_definitions(vec![tiny("sys", "b"), tiny("sys", "a")]).unwrap();
        let rows = catalog.column_rows();
        let listed: Vec<(String, String, u32)> =
            rows.iter().map(|r| (r.table_name.clone(), r.column_name.clone(), r.ordinal_position)).collect();
        assert_eq!(listed, vec![("a".into(), "id".into(), 1), ("b".into(), "id".into(), 1)]);
    }
}
