//! Configuration management
//!
//! Handles configuration from a TOML file and environment variables with
//! defaults tuned to the Odisha RoR document template. The owner-block
//! marker sets live here rather than in code: they are corpus-dependent
//! and other regional layouts can override them without a rebuild.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// OCR invocation settings
    pub ocr: OcrConfig,

    /// Translation collaborator settings
    pub translation: TranslationConfig,

    /// Field extraction settings
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // OCR
        if let Ok(lang) = std::env::var("BHULEKH_OCR_LANG") {
            config.ocr.language = lang;
        }
        if let Ok(dpi) = std::env::var("BHULEKH_OCR_DPI") {
            config.ocr.dpi = dpi.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BHULEKH_OCR_DPI".to_string(),
                value: dpi,
            })?;
        }
        if let Ok(path) = std::env::var("BHULEKH_TESSERACT") {
            config.ocr.executable_path = Some(path);
        }

        // Translation
        if let Ok(enabled) = std::env::var("BHULEKH_TRANSLATE") {
            config.translation.enabled =
                enabled.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "BHULEKH_TRANSLATE".to_string(),
                    value: enabled,
                })?;
        }
        if let Ok(endpoint) = std::env::var("BHULEKH_TRANSLATE_ENDPOINT") {
            config.translation.endpoint = endpoint;
        }
        if let Ok(lang) = std::env::var("BHULEKH_TARGET_LANG") {
            config.translation.target_lang = lang;
        }

        // Logging
        if let Ok(level) = std::env::var("BHULEKH_LOG") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }
}

/// OCR invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code(s), e.g. "ori" or "ori+eng"
    pub language: String,

    /// Rasterization resolution for PDF pages
    pub dpi: u32,

    /// Path to the tesseract executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,

    /// Page segmentation mode (PSM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psm: Option<u8>,

    /// OCR engine mode (OEM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oem: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "ori".to_string(),
            dpi: 300,
            executable_path: None,
            psm: None,
            oem: None,
        }
    }
}

/// Translation collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Whether to call the external service at all
    pub enabled: bool,

    /// Source language code sent to the service
    pub source_lang: String,

    /// Target language code
    pub target_lang: String,

    /// Service endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_lang: "or".to_string(),
            target_lang: "en".to_string(),
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Field extraction settings.
///
/// The marker sets bound the owner-name block: extraction starts after the
/// earliest start-marker match and stops at the nearest stop keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regex patterns that open the owner-name block
    pub owner_start_markers: Vec<String>,

    /// Section headers that terminate the owner-name block
    pub owner_stop_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            owner_start_markers: vec![
                r"(?:\d+\)\s*)?ପ୍ରଜାର\s*ନାମ".to_string(),
                r"ଜମିଦାରଙ୍କ\s*ନାମ".to_string(),
                r"ପ୍ରଜାର ନାମ[,:\s]*".to_string(),
            ],
            owner_stop_keywords: vec![
                "ସ୍ଵତ୍ତ୍".to_string(),
                "ସ୍ଵତ୍ଵ".to_string(),
                "ଖଜଣା".to_string(),
                "ସେସ୍".to_string(),
                "ନିସ୍ତାର".to_string(),
                "ଡ଼ାଖଲ".to_string(),
                "2)".to_string(),
                "3)".to_string(),
                "4)".to_string(),
                "5)".to_string(),
                "ଖତିୟାନ".to_string(),
                "ପ୍ଲଟ".to_string(),
                "କ୍ରମିକ".to_string(),
                "କିସମ".to_string(),
                "ଅନ୍ୟାନ୍ୟ".to_string(),
                "ଅନ୍ତିମ".to_string(),
                "ରାଷ୍ଟ୍ରୀୟ".to_string(),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ocr.language, "ori");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.translation.source_lang, "or");
        assert!(config.translation.enabled);
        assert!(config
            .extraction
            .owner_stop_keywords
            .contains(&"ଖଜଣା".to_string()));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ocr]
            language = "ori+eng"
            dpi = 150

            [translation]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.ocr.language, "ori+eng");
        assert_eq!(config.ocr.dpi, 150);
        assert!(!config.translation.enabled);
        // Untouched sections keep their defaults
        assert_eq!(config.translation.target_lang, "en");
        assert!(!config.extraction.owner_start_markers.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(
            parsed.extraction.owner_stop_keywords,
            config.extraction.owner_stop_keywords
        );
        assert_eq!(parsed.logging.level, "info");
    }
}
