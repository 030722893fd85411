use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Schema assumed when a table name carries no qualifier
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid qualified table name: '{0}'")]
pub struct InvalidQualifiedName(pub String);

/// Namespace-qualified table name, e.g. `public.users`.
///
/// Parsing from a string is meant for user input and is lossy for quoted
/// identifiers containing `.` or edge whitespace; snapshots serialize the two
/// parts separately.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub schema: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Identifier usable in Mermaid: the `.` separator is not allowed there
    pub fn markup_id(&self) -> String {
        self.to_string().replace('.', "_")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

impl FromStr for QualifiedName {
    type Err = InvalidQualifiedName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (schema, name) = match s.split_once('.') {
            Some((schema, name)) => (schema.trim(), name.trim()),
            None => (DEFAULT_SCHEMA, s),
        };

        if schema.is_empty() || name.is_empty() {
            return Err(InvalidQualifiedName(s.to_string()));
        }

        Ok(Self::new(schema, name))
    }
}

/// Information about a table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Rendered type, e.g. `integer` or `character varying(255)`
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Build a column from catalog fields; the length qualifier is only
    /// appended when the type declares a maximum character length
    pub fn from_catalog(name: impl Into<String>, base_type: &str, max_length: Option<i32>) -> Self {
        let data_type = match max_length {
            Some(len) if len > 0 => format!("{}({})", base_type, len),
            _ => base_type.to_string(),
        };
        Self::new(name, data_type)
    }
}

/// Foreign key constraint on a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: QualifiedName,
    pub foreign_column: String,
}

/// A table with its columns and key metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: QualifiedName,
    pub columns: Vec<Column>,
    pub primary_keys: Vec<String>,
    pub unique_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            columns: Vec::new(),
            primary_keys: Vec::new(),
            unique_keys: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.iter().any(|c| c == column)
    }

    /// True if `column` is the source column of any foreign key on this table
    pub fn is_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.column == column)
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique_keys.iter().any(|c| c == column)
    }

    /// Key columns in PK, FK, UK order without repeats
    pub fn key_columns(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let candidates = self
            .primary_keys
            .iter()
            .chain(self.foreign_keys.iter().map(|fk| &fk.column))
            .chain(self.unique_keys.iter());

        for column in candidates {
            if !keys.contains(column) {
                keys.push(column.clone());
            }
        }
        keys
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Appends a column; repeated names are ignored
    pub(crate) fn push_column(&mut self, column: Column) -> bool {
        if self.has_column(&column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }

    pub(crate) fn push_primary_key(&mut self, column: String) {
        if !self.is_primary_key(&column) {
            self.primary_keys.push(column);
        }
    }

    pub(crate) fn push_unique_key(&mut self, column: String) {
        if !self.is_unique(&column) {
            self.unique_keys.push(column);
        }
    }

    /// Appends a foreign key; returns false if an identical one exists
    pub(crate) fn push_foreign_key(&mut self, fk: ForeignKey) -> bool {
        if self.foreign_keys.contains(&fk) {
            return false;
        }
        self.foreign_keys.push(fk);
        true
    }
}
