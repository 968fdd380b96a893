//! Bhulekh Extractor - field extraction over OCR-recognized Odia text
//!
//! Implements the labeled-field parsing engine: each schema field is
//! resolved by an ordered list of strategies (regex candidates, then
//! line-scan fallbacks) over the recognized text, with a dedicated
//! two-phase block extraction for owner names. Record assembly composes
//! the extractor with the transliterator and the translation
//! collaborator.

pub mod fields;
pub mod owner;
pub mod record;
pub mod strategy;

pub use fields::FieldExtractor;
pub use owner::OwnerNameRules;
pub use record::{assemble_record, extract_record};
pub use strategy::{FieldSpec, FieldStrategy};

use std::collections::BTreeMap;

use bhulekh_core::{FieldKey, FieldValue};

/// Raw per-field values straight out of pattern matching, before any
/// transliteration or translation is applied.
#[derive(Debug, Clone)]
pub struct RawFields {
    fields: BTreeMap<FieldKey, FieldValue>,
    owners: Vec<String>,
}

impl RawFields {
    pub(crate) fn new(fields: BTreeMap<FieldKey, FieldValue>, owners: Vec<String>) -> Self {
        Self { fields, owners }
    }

    /// Value for a schema field; absent keys read as `NotFound`
    pub fn get(&self, key: FieldKey) -> &FieldValue {
        static NOT_FOUND: FieldValue = FieldValue::NotFound;
        self.fields.get(&key).unwrap_or(&NOT_FOUND)
    }

    /// Owner names found in the document, in reading order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Number of resolved (non-absent) fields
    pub fn resolved_count(&self) -> usize {
        self.fields.values().filter(|v| v.is_found()).count()
    }
}
