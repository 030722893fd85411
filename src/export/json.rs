use crate::types::Schema;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Export a schema snapshot as pretty-printed JSON
pub fn export_schema_json(output_path: &Path, schema: &Schema) -> Result<()> {
    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

    let output = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    file.write_all(output.as_bytes())
        .context("Failed to write JSON file")?;
    file.write_all(b"\n").context("Failed to write JSON file")?;
    file.flush().context("Failed to flush file")?;

    Ok(())
}

/// Load a schema snapshot previously written by [`export_schema_json`]
pub fn load_schema_json(path: &Path) -> Result<Schema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid schema file: {}", path.display()))
}
