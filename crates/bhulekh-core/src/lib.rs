//! Bhulekh Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the toolkit:
//! - Record field schema (`FieldKey`, `FieldValue`, `LandRecord`)
//! - Odia script helpers
//! - Common error types
//! - The translation collaborator trait
//! - Configuration management

pub mod config;
pub mod script;

pub use config::{
    AppConfig, ConfigError, ExtractionConfig, LoggingConfig, OcrConfig, TranslationConfig,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for extraction operations
#[derive(Error, Debug)]
pub enum RorError {
    /// The OCR stage produced no usable text. The whole extraction is
    /// aborted so callers can tell "recognition failed" from "fields
    /// absent in a valid document".
    #[error("document produced no recognized text")]
    EmptyDocument,

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("translation client error: {0}")]
    Translation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RorError>;

// ============================================================================
// Field Schema
// ============================================================================

/// Record fields extracted from an RoR document.
///
/// Proper-noun fields (village, district, police station, tehsil, owner
/// names) additionally carry a Latin-rendered counterpart in the output
/// schema; the land type carries a translated counterpart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Village,
    District,
    PoliceStation,
    PoliceStationNo,
    Tehsil,
    TehsilNo,
    KhataNo,
    PlotNo,
    LandType,
    Area,
    OwnerNames,
}

impl FieldKey {
    /// All schema fields, in rendering order
    pub const ALL: [FieldKey; 11] = [
        Self::Village,
        Self::District,
        Self::PoliceStation,
        Self::PoliceStationNo,
        Self::Tehsil,
        Self::TehsilNo,
        Self::KhataNo,
        Self::PlotNo,
        Self::LandType,
        Self::Area,
        Self::OwnerNames,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Village => "village",
            Self::District => "district",
            Self::PoliceStation => "police_station",
            Self::PoliceStationNo => "police_station_no",
            Self::Tehsil => "tehsil",
            Self::TehsilNo => "tehsil_no",
            Self::KhataNo => "khata_no",
            Self::PlotNo => "plot_no",
            Self::LandType => "land_type",
            Self::Area => "area",
            Self::OwnerNames => "owner_names",
        }
    }

    /// Whether an accepted value must be a run of decimal digits
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::PoliceStationNo | Self::TehsilNo | Self::KhataNo | Self::PlotNo
        )
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// An extracted field value, or an explicit absent marker.
///
/// Absence is a real variant rather than a magic string, so the core can
/// tell "nothing matched" apart from document text that happens to read
/// like the display placeholder. The placeholder string appears only at
/// the rendering boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    #[default]
    NotFound,
}

impl FieldValue {
    /// Rendering-time placeholder for an unresolved field
    pub const NOT_FOUND_LABEL: &'static str = "Not Found";

    pub fn found(value: impl Into<String>) -> Self {
        Self::Found(value.into())
    }

    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound => None,
        }
    }

    /// Map the found value through `f`, preserving absence
    pub fn map(&self, f: impl FnOnce(&str) -> String) -> FieldValue {
        match self {
            Self::Found(v) => Self::Found(f(v)),
            Self::NotFound => Self::NotFound,
        }
    }

    /// Display form: the value itself, or the `Not Found` placeholder
    pub fn display(&self) -> &str {
        match self {
            Self::Found(v) => v,
            Self::NotFound => Self::NOT_FOUND_LABEL,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Found(v) => serializer.serialize_str(v),
            Self::NotFound => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(FieldValue::from_option)
    }
}

// ============================================================================
// Translation Collaborator
// ============================================================================

/// Outcome of a translation attempt against the external service.
///
/// Unavailability is an expected state, not an error: the record assembly
/// substitutes the transliterated form of the same phrase instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    Unavailable,
}

/// Trait for translation collaborators
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate a source-script phrase, or report the service unavailable
    async fn translate(&self, text: &str) -> Translation;

    /// Collaborator name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Land Record
// ============================================================================

/// Structured result of extracting one RoR document.
///
/// Every key of the fixed output schema is always present; unresolved
/// fields carry `FieldValue::NotFound` rather than being omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandRecord {
    pub village: FieldValue,
    pub village_latin: FieldValue,
    pub district: FieldValue,
    pub district_latin: FieldValue,
    pub police_station: FieldValue,
    pub police_station_latin: FieldValue,
    pub police_station_no: FieldValue,
    pub tehsil: FieldValue,
    pub tehsil_latin: FieldValue,
    pub tehsil_no: FieldValue,
    pub khata_no: FieldValue,
    pub plot_no: FieldValue,
    pub land_type: FieldValue,
    pub land_type_english: FieldValue,
    pub area_hectares: FieldValue,
    pub owner_names: Vec<String>,
    pub owner_names_latin: Vec<String>,
}

impl LandRecord {
    /// The fixed output schema, in rendering order, as `(label, value)`
    /// rows suitable for line-by-line display. An empty owner list renders
    /// as the `Not Found` placeholder for both owner keys.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        fn owners(names: &[String]) -> String {
            if names.is_empty() {
                FieldValue::NOT_FOUND_LABEL.to_string()
            } else {
                names.join(", ")
            }
        }

        vec![
            ("Village Name (Odia)", self.village.display().to_string()),
            ("Village Name (Latin)", self.village_latin.display().to_string()),
            ("District (Odia)", self.district.display().to_string()),
            ("District (Latin)", self.district_latin.display().to_string()),
            (
                "Police Station (Thana) (Odia)",
                self.police_station.display().to_string(),
            ),
            (
                "Police Station (Thana) (Latin)",
                self.police_station_latin.display().to_string(),
            ),
            ("Police Station No.", self.police_station_no.display().to_string()),
            ("Tehsil (Odia)", self.tehsil.display().to_string()),
            ("Tehsil (Latin)", self.tehsil_latin.display().to_string()),
            ("Tehsil No.", self.tehsil_no.display().to_string()),
            ("Khata No.", self.khata_no.display().to_string()),
            ("Plot No.", self.plot_no.display().to_string()),
            ("Land Type (Odia)", self.land_type.display().to_string()),
            ("Land Type (English)", self.land_type_english.display().to_string()),
            ("Area (hectares)", self.area_hectares.display().to_string()),
            ("Owner Names (Odia)", owners(&self.owner_names)),
            ("Owner Names (Latin)", owners(&self.owner_names_latin)),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
