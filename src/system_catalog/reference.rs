use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::ident::{ColumnPath, TableIdentity};
use crate::types::DataType;

/// Level at which a column's value varies, coarsest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowGranularity {
    Cluster,
    Node,
    Shard,
    #[default]
    Doc,
}

/// A typed, addressable column of a system table.
///
/// Identity is `(table, path)`; type and granularity ride along.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReference {
    table: TableIdentity,
    path: ColumnPath,
    data_type: DataType,
    granularity: RowGranularity,
}

impl ColumnReference {
    pub fn new(table: TableIdentity, path: ColumnPath, data_type: DataType, granularity: RowGranularity) -> Self {
        Self { table, path, data_type, granularity }
    }

    pub fn table(&self) -> &TableIdentity { &self.table }
    pub fn path(&self) -> &ColumnPath { &self.path }
    pub fn data_type(&self) -> DataType { self.data_type }
    pub fn granularity(&self) -> RowGranularity { self.granularity }
}

impl PartialEq for ColumnReference {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.path == other.path
    }
}

impl Eq for ColumnReference {}

impl Hash for ColumnReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table.hash(state);
        self.path.hash(state);
    }
}

impl PartialOrd for ColumnReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ColumnReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.table.cmp(&other.table).then_with(|| self.path.cmp(&other.path))
    }
}

impl Display for ColumnReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} {}", self.table, self.path, self.data_type)
    }
}
