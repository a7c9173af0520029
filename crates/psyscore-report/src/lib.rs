//! psyscore-report: Export formats for participant data.
//!
//! Dashboard and research CSVs, the variable codebook, the sample
//! characteristics block and a self-contained HTML analytics page.

pub mod characteristics;
pub mod codebook;
pub mod csv;
pub mod html;

use std::path::Path;

use anyhow::{Context, Result};

/// Write a text export, creating parent directories as needed.
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))
}
