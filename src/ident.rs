//! Identifiers for system catalog tables and columns
//! -------------------------------------------------
//! `TableIdentity` names a catalog table, `ColumnPath` addresses a column
//! inside it, possibly several levels deep in a nested settings object.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

pub const INFORMATION_SCHEMA: &str = "information_schema";

/// Separator between path segments in the dotted rendering.
pub const PATH_SEPARATOR: char = '.';

/// Normalize an identifier according to SQL rules:
/// - If enclosed in double-quotes, strip quotes and preserve case
/// - Otherwise, convert to lowercase for case-insensitive matching
pub fn normalize_identifier(ident: &str) -> String {
    let trimmed = ident.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableIdentity {
    schema: String,
    name: String,
}

impl TableIdentity {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self { schema: schema.into(), name: name.into() }
    }

    pub fn information_schema(name: impl Into<String>) -> Self {
        Self::new(INFORMATION_SCHEMA, name)
    }

    pub fn schema(&self) -> &str { &self.schema }
    pub fn name(&self) -> &str { &self.name }

    /// `schema.name`
    pub fn fqn(&self) -> String { format!("{}.{}", self.schema, self.name) }
}

impl Display for TableIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Address of a column within a table.
///
/// Ordering is lexicographic over segments, so a path sorts directly before
/// everything nested under it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnPath {
    segments: Vec<String>,
}

fn check_segment(input: &str, segment: &str) -> CatalogResult<()> {
    if segment.is_empty() {
        return Err(CatalogError::invalid_path(input, "empty segment"));
    }
    if segment.trim().is_empty() {
        return Err(CatalogError::invalid_path(input, "blank segment"));
    }
    if segment.contains(PATH_SEPARATOR) {
        return Err(CatalogError::invalid_path(input, format!("segment '{}' contains '{}'", segment, PATH_SEPARATOR)));
    }
    Ok(())
}

impl ColumnPath {
    pub fn new<I, S>(segments: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(CatalogError::invalid_path("", "no segments"));
        }
        let rendered = segments.join(".");
        for s in &segments {
            check_segment(&rendered, s)?;
        }
        Ok(Self { segments })
    }

    /// Single-segment path naming a top-level column.
    pub fn root(name: impl Into<String>) -> CatalogResult<Self> {
        Self::new([name.into()])
    }

    pub fn parse(dotted: &str) -> CatalogResult<Self> {
        if dotted.is_empty() {
            return Err(CatalogError::invalid_path(dotted, "no segments"));
        }
        let segments: Vec<&str> = dotted.split(PATH_SEPARATOR).collect();
        for s in &segments {
            check_segment(dotted, s)?;
        }
        Ok(Self { segments: segments.into_iter().map(str::to_string).collect() })
    }

    pub fn child(&self, name: impl Into<String>) -> CatalogResult<Self> {
        let name = name.into();
        check_segment(&format!("{}.{}", self, name), &name)?;
        let mut segments = self.segments.clone();
        segments.push(name);
        Ok(Self { segments })
    }

    pub fn parent(&self) -> Option<ColumnPath> {
        if self.segments.len() < 2 { return None; }
        Some(Self { segments: self.segments[..self.segments.len() - 1].to_vec() })
    }

    /// Last segment.
    pub fn name(&self) -> &str {
        // never empty, see constructors
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] { &self.segments }
    pub fn depth(&self) -> usize { self.segments.len() }
    pub fn is_top_level(&self) -> bool { self.segments.len() == 1 }

    pub fn is_prefix_of(&self, other: &ColumnPath) -> bool {
        self.segments.len() < other.segments.len() && other.segments.starts_with(&self.segments)
    }

    pub fn to_dotted_string(&self) -> String { self.segments.join(".") }

    /// Subscript form used in SQL output: `a['b']['c']`. Quotes inside a
    /// subscript are doubled.
    pub fn to_sql_string(&self) -> String {
        let mut out = self.segments[0].clone();
        for s in &self.segments[1..] {
            out.push_str("['");
            out.push_str(&s.replace('\'', "''"));
            out.push_str("']");
        }
        out
    }
}

impl Display for ColumnPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_dotted_string())
    }
}

impl FromStr for ColumnPath {
    type Err = CatalogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { ColumnPath::parse(s) }
}

impl Serialize for ColumnPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dotted_string())
    }
}

impl<'de> Deserialize<'de> for ColumnPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ColumnPath::parse(&s).map_err(serde::de::Error::custom)
    }
}
