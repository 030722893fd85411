//! Mermaid erDiagram line syntax.

use crate::types::QualifiedName;

pub const HEADER: &str = "erDiagram";

/// Cardinality used for every edge: exactly one parent, zero or many children
pub const ONE_TO_MANY: &str = "||--o{";

pub const RELATIONSHIP_LABEL: &str = "has";

/// Column type used when a selected column cannot be found in the schema
pub const UNKNOWN_TYPE: &str = "string";

/// Marker attached to a column line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMarker {
    Primary,
    Foreign,
    Unique,
}

impl KeyMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMarker::Primary => "PK",
            KeyMarker::Foreign => "FK",
            KeyMarker::Unique => "UK",
        }
    }
}

pub fn entity_open(table: &QualifiedName) -> String {
    format!("    {} {{", table.markup_id())
}

pub fn entity_close() -> &'static str {
    "    }"
}

pub fn attribute(data_type: &str, column: &str, markers: &[KeyMarker]) -> String {
    if markers.is_empty() {
        format!("        {} {}", data_type, column)
    } else {
        let markers: Vec<&str> = markers.iter().map(KeyMarker::as_str).collect();
        format!("        {} {} {}", data_type, column, markers.join(" "))
    }
}

pub fn relationship(parent: &QualifiedName, child: &QualifiedName) -> String {
    format!(
        "    {} {} {} : \"{}\"",
        parent.markup_id(),
        ONE_TO_MANY,
        child.markup_id(),
        RELATIONSHIP_LABEL
    )
}
