//! Artifact export
//!
//! Writes the per-level G-code documents and the optional preview image to
//! disk. Every level gets a file, including levels without points.

use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use stipplekit_camtools::GcodeDocument;
use tracing::info;

/// File name for a level's G-code
pub fn artifact_name(level: usize) -> String {
    format!("brightness_level_{}.gcode", level)
}

/// Write each document to `dir`, creating it if missing
///
/// Returns the written paths in level order.
pub fn write_documents(dir: &Path, documents: &[GcodeDocument]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        let path = dir.join(artifact_name(doc.level()));
        fs::write(&path, doc.to_text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({} lines)", path.display(), doc.len());
        written.push(path);
    }

    Ok(written)
}

/// Save the preview image; the format follows the file extension
pub fn write_preview(path: &Path, preview: &RgbImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    preview
        .save(path)
        .with_context(|| format!("Failed to save preview {}", path.display()))?;
    info!(
        "Wrote preview {} ({}x{} px)",
        path.display(),
        preview.width(),
        preview.height()
    );
    Ok(())
}
