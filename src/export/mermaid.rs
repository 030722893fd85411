use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write diagram markup to a `.mmd` file, newline-terminated
pub fn export_diagram(output_path: &Path, diagram: &str) -> Result<()> {
    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

    file.write_all(diagram.as_bytes())
        .context("Failed to write diagram")?;
    if !diagram.ends_with('\n') {
        file.write_all(b"\n").context("Failed to write diagram")?;
    }
    file.flush().context("Failed to flush file")?;

    Ok(())
}
