//! PDF rasterization via poppler's `pdftoppm`
//!
//! RoR scans usually arrive as multi-page PDFs with no text layer, so
//! each page is rendered to PNG before recognition.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{OcrError, Result};

/// True if the path carries a `.pdf` extension
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Render each page of `pdf` into `out_dir` as `page-N.png`, returning
/// the page images in order.
pub fn rasterize(pdf: &Path, out_dir: &Path, dpi: u32) -> Result<Vec<PathBuf>> {
    let prefix = out_dir.join("page");

    let output = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg(dpi.to_string())
        .arg(pdf)
        .arg(&prefix)
        .output()
        .map_err(|e| OcrError::RasterizationFailed(format!("pdftoppm not runnable: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::RasterizationFailed(format!(
            "pdftoppm failed: {stderr}"
        )));
    }

    let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "png").unwrap_or(false))
        .collect();

    // pdftoppm zero-pads page numbers to a uniform width, so a
    // lexicographic sort is also the page order.
    pages.sort();

    if pages.is_empty() {
        return Err(OcrError::RasterizationFailed(
            "pdftoppm produced no pages".to_string(),
        ));
    }

    Ok(pages)
}
