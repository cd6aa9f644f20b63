//! Column set of one system table.
//!
//! Columns are kept in `ColumnPath` order no matter how they were supplied;
//! `SELECT *`, `DESCRIBE` and the information_schema.columns listing all
//! enumerate in that order. Key columns keep their declared order, which is
//! the composite-key precedence.

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::ident::{ColumnPath, TableIdentity};
use crate::system_catalog::reference::ColumnReference;
use crate::types::DataType;

#[derive(Debug, Clone)]
pub struct TableSchema {
    ident: TableIdentity,
    columns: BTreeMap<ColumnPath, ColumnReference>,
    key: Vec<ColumnPath>,
}

/// One line of `DESCRIBE` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeRow {
    pub ordinal_position: u32,
    pub column_name: String,
    pub data_type: DataType,
    pub is_key: bool,
}

impl TableSchema {
    pub fn build<R, K>(ident: TableIdentity, references: R, key_paths: K) -> CatalogResult<Self>
    where
        R: IntoIterator<Item = ColumnReference>,
        K: IntoIterator<Item = ColumnPath>,
    {
        let mut columns: BTreeMap<ColumnPath, ColumnReference> = BTreeMap::new();
        for reference in references {
            if reference.table() != &ident {
                return Err(CatalogError::ForeignReference {
                    table: ident.fqn(),
                    owner: reference.table().fqn(),
                    path: reference.path().to_dotted_string(),
                });
            }
            match columns.entry(reference.path().clone()) {
                Entry::Occupied(e) => {
                    return Err(CatalogError::DuplicatePath { table: ident.fqn(), path: e.key().to_dotted_string() });
                }
                Entry::Vacant(e) => { e.insert(reference); }
            }
        }

        // Nested columns must hang off an object column of the same table.
        for path in columns.keys() {
            if let Some(parent) = path.parent() {
                let parent_is_object = columns.get(&parent).map(|p| p.data_type().is_object()).unwrap_or(false);
                if !parent_is_object {
                    return Err(CatalogError::OrphanPath { table: ident.fqn(), path: path.to_dotted_string() });
                }
            }
        }

        let mut key: Vec<ColumnPath> = Vec::new();
        let mut seen: HashSet<ColumnPath> = HashSet::new();
        for path in key_paths {
            if !columns.contains_key(&path) {
                return Err(CatalogError::UnknownKeyPath { table: ident.fqn(), path: path.to_dotted_string() });
            }
            if !seen.insert(path.clone()) {
                return Err(CatalogError::DuplicateKeyPath { table: ident.fqn(), path: path.to_dotted_string() });
            }
            key.push(path);
        }

        debug!(target: "sysmeta::catalog", "built {}: columns={} key={:?}", ident, columns.len(),
            key.iter().map(ColumnPath::to_dotted_string).collect::<Vec<_>>());
        Ok(Self { ident, columns, key })
    }

    pub fn ident(&self) -> &TableIdentity { &self.ident }
    pub fn len(&self) -> usize { self.columns.len() }
    pub fn is_empty(&self) -> bool { self.columns.is_empty() }

    /// All columns, sorted by path.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnReference> + '_ {
        self.columns.values()
    }

    /// Key columns in declared order.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnReference> + '_ {
        // every key path was checked against the map in build()
        self.key.iter().filter_map(move |p| self.columns.get(p))
    }

    pub fn key_paths(&self) -> &[ColumnPath] { &self.key }

    pub fn is_key(&self, path: &ColumnPath) -> bool { self.key.contains(path) }

    /// The columns `SELECT *` expands to.
    pub fn top_level_columns(&self) -> impl Iterator<Item = &ColumnReference> + '_ {
        self.columns.values().filter(|c| c.path().is_top_level())
    }

    pub fn resolve(&self, path: &ColumnPath) -> CatalogResult<&ColumnReference> {
        self.columns.get(path).ok_or_else(|| CatalogError::NotFound {
            table: self.ident.fqn(),
            path: path.to_dotted_string(),
        })
    }

    /// Resolve a dotted column name as typed by a user.
    pub fn resolve_str(&self, dotted: &str) -> CatalogResult<&ColumnReference> {
        match ColumnPath::parse(dotted) {
            Ok(path) => self.resolve(&path),
            Err(_) => Err(CatalogError::NotFound { table: self.ident.fqn(), path: dotted.to_string() }),
        }
    }

    /// Direct children of an object column, in path order.
    pub fn children(&self, path: &ColumnPath) -> Vec<&ColumnReference> {
        let depth = path.depth() + 1;
        self.columns
            .range((Bound::Excluded(path.clone()), Bound::Unbounded))
            .take_while(|(p, _)| path.is_prefix_of(p))
            .filter(|(p, _)| p.depth() == depth)
            .map(|(_, c)| c)
            .collect()
    }

    pub fn describe(&self) -> Vec<DescribeRow> {
        self.columns
            .values()
            .enumerate()
            .map(|(i, c)| DescribeRow {
                ordinal_position: (i + 1) as u32,
                column_name: c.path().to_dotted_string(),
                data_type: c.data_type(),
                is_key: self.is_key(c.path()),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
