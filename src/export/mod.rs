mod json;
mod mermaid;

use crate::diagram;
use crate::types::{Schema, Selection};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub use json::{export_schema_json, load_schema_json};
pub use mermaid::export_diagram;

/// File name used when no output path is given
pub const DEFAULT_DIAGRAM_FILE: &str = "erd_diagram.mmd";

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Mermaid,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to Mermaid
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Mermaid,
        }
    }
}

/// Every table with all of its columns, in schema order
pub fn select_everything(schema: &Schema) -> Selection {
    let mut selection = Selection::new();
    for table in schema.tables.values() {
        selection.select_table(table.name.clone(), table.column_names());
    }
    selection
}

/// Export a whole schema: the JSON snapshot, or a diagram of every table
pub fn export(schema: &Schema, format: ExportFormat, output_path: &Path) -> Result<()> {
    match format {
        ExportFormat::Json => export_schema_json(output_path, schema)?,
        ExportFormat::Mermaid => {
            let text = diagram::render(&select_everything(schema), schema);
            export_diagram(output_path, &text)?;
        }
    }

    info!(path = %output_path.display(), ?format, "Exported");
    Ok(())
}
