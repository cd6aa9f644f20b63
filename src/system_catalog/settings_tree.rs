//! Flattening of nested settings declarations into column references.
//!
//! Every node of the tree becomes a column: object nodes as `object`,
//! leaves with their declared type. Leaves never get an inferred type; a leaf
//! declared without one fails the whole projection.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CatalogError, CatalogResult};
use crate::ident::{ColumnPath, TableIdentity};
use crate::system_catalog::reference::{ColumnReference, RowGranularity};
use crate::types::DataType;

/// Compile-time column declaration, the nested counterpart of a flat
/// `(name, type)` column list.
#[derive(Clone, Copy, Debug)]
pub enum ColumnDecl {
    Leaf { name: &'static str, coltype: Option<DataType> },
    Object { name: &'static str, children: &'static [ColumnDecl] },
}

impl ColumnDecl {
    pub const fn leaf(name: &'static str, coltype: DataType) -> Self {
        ColumnDecl::Leaf { name, coltype: Some(coltype) }
    }

    pub const fn object(name: &'static str, children: &'static [ColumnDecl]) -> Self {
        ColumnDecl::Object { name, children }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnDecl::Leaf { name, .. } | ColumnDecl::Object { name, .. } => *name,
        }
    }

    fn to_node(self) -> SettingsNode {
        match self {
            ColumnDecl::Leaf { coltype, .. } => SettingsNode::Leaf(coltype),
            ColumnDecl::Object { children, .. } => SettingsNode::Object(named_nodes(children)),
        }
    }
}

/// Owned `(name, node)` pairs for a slice of declarations.
pub fn named_nodes(decls: &[ColumnDecl]) -> Vec<(String, SettingsNode)> {
    decls.iter().map(|d| (d.name().to_string(), d.to_node())).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsNode {
    /// `None` marks a leaf whose type was never declared.
    Leaf(Option<DataType>),
    Object(Vec<(String, SettingsNode)>),
}

impl SettingsNode {
    pub fn leaf(coltype: DataType) -> Self { SettingsNode::Leaf(Some(coltype)) }

    pub fn untyped() -> Self { SettingsNode::Leaf(None) }

    pub fn object<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, SettingsNode)>,
        S: Into<String>,
    {
        SettingsNode::Object(children.into_iter().map(|(n, c)| (n.into(), c)).collect())
    }

    /// JSON shape: a string names the leaf type, an object nests, `null`
    /// leaves the type undeclared. Repeated keys are kept so the projector
    /// can reject them.
    pub fn from_json_str(source_name: &str, text: &str) -> CatalogResult<Self> {
        let node: JsonNode = serde_json::from_str(text)
            .map_err(|e| CatalogError::invalid_definition(source_name, e.to_string()))?;
        node.into_settings()
    }

    /// Number of columns this node projects to.
    pub fn column_count(&self) -> usize {
        match self {
            SettingsNode::Leaf(_) => 1,
            SettingsNode::Object(children) => 1 + children.iter().map(|(_, c)| c.column_count()).sum::<usize>(),
        }
    }
}

/// Settings node as written in a definition file. Object members stay in
/// file order, duplicates included; `serde_json::Value` would collapse them.
#[derive(Debug)]
pub(crate) enum JsonNode {
    Type(String),
    Untyped,
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    fn into_settings(self) -> CatalogResult<SettingsNode> {
        match self {
            JsonNode::Type(t) => Ok(SettingsNode::leaf(t.parse::<DataType>()?)),
            JsonNode::Untyped => Ok(SettingsNode::untyped()),
            JsonNode::Object(members) => Ok(SettingsNode::Object(json_members(members)?)),
        }
    }
}

pub(crate) fn json_members(members: Vec<(String, JsonNode)>) -> CatalogResult<Vec<(String, SettingsNode)>> {
    members.into_iter().map(|(name, node)| Ok((name, node.into_settings()?))).collect()
}

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = JsonNode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a type name, an object or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonNode, E> { Ok(JsonNode::Type(v.to_string())) }

            fn visit_unit<E: de::Error>(self) -> Result<JsonNode, E> { Ok(JsonNode::Untyped) }

            fn visit_none<E: de::Error>(self) -> Result<JsonNode, E> { Ok(JsonNode::Untyped) }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<JsonNode, A::Error> {
                collect_entries(map).map(JsonNode::Object)
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

fn collect_entries<'de, A: MapAccess<'de>>(mut map: A) -> Result<Vec<(String, JsonNode)>, A::Error> {
    let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
    while let Some((name, node)) = map.next_entry::<String, JsonNode>()? {
        entries.push((name, node));
    }
    Ok(entries)
}

/// `deserialize_with` target for a `columns` object: every member in file order.
pub(crate) fn ordered_members<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, JsonNode)>, D::Error> {
    struct MembersVisitor;

    impl<'de> Visitor<'de> for MembersVisitor {
        type Value = Vec<(String, JsonNode)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of column declarations")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            collect_entries(map)
        }
    }

    deserializer.deserialize_map(MembersVisitor)
}

pub struct SettingsTreeProjector {
    table: TableIdentity,
    granularity: RowGranularity,
}

impl SettingsTreeProjector {
    pub fn new(table: TableIdentity, granularity: RowGranularity) -> Self {
        Self { table, granularity }
    }

    /// Project `node` rooted at `prefix`, parent before children.
    pub fn project(&self, prefix: &ColumnPath, node: &SettingsNode) -> CatalogResult<Vec<ColumnReference>> {
        let mut out = Vec::with_capacity(node.column_count());
        self.walk(prefix.clone(), node, &mut out)?;
        Ok(out)
    }

    /// Project a table's top-level columns, each rooted at its own name.
    pub fn project_columns(&self, columns: &[(String, SettingsNode)]) -> CatalogResult<Vec<ColumnReference>> {
        self.check_unique(None, columns)?;
        let mut out = Vec::with_capacity(columns.iter().map(|(_, n)| n.column_count()).sum());
        for (name, node) in columns {
            self.walk(ColumnPath::root(name.as_str())?, node, &mut out)?;
        }
        Ok(out)
    }

    fn walk(&self, path: ColumnPath, node: &SettingsNode, out: &mut Vec<ColumnReference>) -> CatalogResult<()> {
        match node {
            SettingsNode::Leaf(Some(t)) => {
                out.push(ColumnReference::new(self.table.clone(), path, *t, self.granularity));
            }
            SettingsNode::Leaf(None) => {
                return Err(CatalogError::MissingLeafType { path: path.to_dotted_string() });
            }
            SettingsNode::Object(children) => {
                self.check_unique(Some(&path), children)?;
                out.push(ColumnReference::new(self.table.clone(), path.clone(), DataType::Object, self.granularity));
                for (name, child) in children {
                    self.walk(path.child(name.as_str())?, child, out)?;
                }
            }
        }
        Ok(())
    }

    // Siblings are compared before descending into any of them.
    fn check_unique(&self, parent: Option<&ColumnPath>, children: &[(String, SettingsNode)]) -> CatalogResult<()> {
        let mut seen = HashSet::with_capacity(children.len());
        for (name, _) in children {
            if !seen.insert(name.as_str()) {
                let path = match parent {
                    Some(p) => p.child(name.as_str())?,
                    None => ColumnPath::root(name.as_str())?,
                };
                return Err(CatalogError::DuplicatePath { table: self.table.fqn(), path: path.to_dotted_string() });
            }
        }
        Ok(())
    }
}
