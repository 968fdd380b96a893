//! Bhulekh OCR - text recognition for scanned RoR documents
//!
//! Thin adapter around the Tesseract binary. PDFs are rasterized
//! page-by-page via poppler first (see `pdf`); the core never sees a
//! file, only the recognized text handed back from here.

pub mod pdf;

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use bhulekh_core::config::OcrConfig;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("PDF rasterization failed: {0}")]
    RasterizationFailed(String),

    #[error("OCR execution failed: {0}")]
    ExecutionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;

/// Recognized text for a single page
#[derive(Debug, Clone)]
pub struct OcrResult {
    /// Extracted text content
    pub text: String,
    /// Page number, 1-based
    pub page: u32,
}

impl OcrResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: 1,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Trait for OCR engines
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an image file
    fn extract_text(&self, image_path: &Path) -> Result<OcrResult>;

    /// Recognize text in a sequence of page images
    fn extract_text_batch(&self, image_paths: &[&Path]) -> Result<Vec<OcrResult>> {
        image_paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let mut result = self.extract_text(path)?;
                result.page = (i + 1) as u32;
                Ok(result)
            })
            .collect()
    }

    /// Check if the engine is installed on this system
    fn is_available(&self) -> bool;

    /// Engine name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tesseract
// ============================================================================

/// Tesseract invocation settings
#[derive(Debug, Clone)]
pub struct TesseractConfig {
    /// Language code(s), e.g. "ori" or "ori+eng"
    pub language: String,
    /// Page segmentation mode (PSM)
    pub psm: Option<u8>,
    /// OCR engine mode (OEM)
    pub oem: Option<u8>,
    /// Path to the tesseract executable
    pub executable_path: Option<String>,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            language: "ori".to_string(),
            psm: None,
            oem: None,
            executable_path: None,
        }
    }
}

impl TesseractConfig {
    /// Config for Odia + English mixed documents
    pub fn odia_english() -> Self {
        Self {
            language: "ori+eng".to_string(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    pub fn with_oem(mut self, oem: u8) -> Self {
        self.oem = Some(oem);
        self
    }
}

impl From<&OcrConfig> for TesseractConfig {
    fn from(config: &OcrConfig) -> Self {
        Self {
            language: config.language.clone(),
            psm: config.psm,
            oem: config.oem,
            executable_path: config.executable_path.clone(),
        }
    }
}

/// Tesseract subprocess wrapper
pub struct TesseractEngine {
    config: TesseractConfig,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self {
            config: TesseractConfig::default(),
        }
    }

    pub fn with_config(config: TesseractConfig) -> Self {
        Self { config }
    }

    fn executable(&self) -> &str {
        self.config
            .executable_path
            .as_deref()
            .unwrap_or("tesseract")
    }

    fn build_args(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![
            image_path.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.config.language.clone(),
        ];

        if let Some(psm) = self.config.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }

        if let Some(oem) = self.config.oem {
            args.push("--oem".to_string());
            args.push(oem.to_string());
        }

        args
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn extract_text(&self, image_path: &Path) -> Result<OcrResult> {
        if !self.is_available() {
            return Err(OcrError::EngineNotAvailable(
                "tesseract is not installed or not in PATH".to_string(),
            ));
        }

        let args = self.build_args(image_path);
        tracing::debug!(image = %image_path.display(), language = %self.config.language, "running tesseract");

        let output = Command::new(self.executable())
            .args(&args)
            .output()
            .map_err(|e| OcrError::ExecutionFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ExecutionFailed(format!(
                "tesseract failed: {stderr}"
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(OcrResult::new(text))
    }

    fn is_available(&self) -> bool {
        Command::new(self.executable())
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

// ============================================================================
// Document-level recognition
// ============================================================================

/// Recognize a whole document: PDFs are rasterized page-by-page, any
/// other path is treated as a single image. Page texts are joined with
/// newlines, preserving reading order.
pub fn recognize_document(engine: &dyn OcrEngine, path: &Path, dpi: u32) -> Result<String> {
    if pdf::is_pdf(path) {
        let dir = tempfile::tempdir()?;
        let pages = pdf::rasterize(path, dir.path(), dpi)?;
        tracing::debug!(pages = pages.len(), "rasterized pdf");

        let page_refs: Vec<&Path> = pages.iter().map(|p| p.as_path()).collect();
        let results = engine.extract_text_batch(&page_refs)?;
        Ok(results
            .into_iter()
            .map(|r| r.text)
            .collect::<Vec<_>>()
            .join("\n"))
    } else {
        engine.extract_text(path).map(|r| r.text)
    }
}

// ============================================================================
// Tests
// ============================================================================
