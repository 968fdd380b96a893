//! Labeled-field extraction
//!
//! The extractor owns one `FieldSpec` per schema field, built once at
//! construction. Patterns are tuned to the labels of the Odisha RoR
//! template and to their common OCR corruptions (`ନମ୍ବର` with a lost
//! virama reads as `ନମବର`, hence the `ନ(?:ମ|ମ୍)ବର` alternations).

use std::collections::BTreeMap;

use bhulekh_core::{ExtractionConfig, FieldKey, Result, RorError};

use crate::owner::OwnerNameRules;
use crate::strategy::FieldSpec;
use crate::RawFields;

/// Pattern-based extractor for RoR record fields.
///
/// All tables are immutable after construction; one instance can serve
/// concurrent extraction calls without coordination.
pub struct FieldExtractor {
    specs: Vec<FieldSpec>,
    owner_rules: OwnerNameRules,
}

impl FieldExtractor {
    /// Create an extractor with the default Odisha RoR rules
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create an extractor with custom owner-block markers
    pub fn with_config(config: &ExtractionConfig) -> Self {
        let mut extractor = Self {
            specs: Vec::new(),
            owner_rules: OwnerNameRules::from_config(config),
        };
        extractor.init_field_specs();
        extractor
    }

    fn init_field_specs(&mut self) {
        self.add(
            FieldSpec::new(FieldKey::Village)
                .pattern(r"ମୌଜା\s*[:\-]?\s*([^\n,:]+)")
                .line_scan("ମୌଜା"),
        );

        self.add(
            FieldSpec::new(FieldKey::District)
                .pattern(r"ଜିଲ୍ଲା\s*[:\-]?\s*([^\n,:]+)")
                .line_scan("ଜିଲ୍ଲା"),
        );

        self.add(
            FieldSpec::new(FieldKey::PoliceStation)
                .pattern(r"ଥାନା\s*[:\-]?\s*([^\n,:]+)")
                .line_scan("ଥାନା"),
        );

        self.add(
            FieldSpec::new(FieldKey::PoliceStationNo)
                .pattern(r"ଥାନା\s*ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)")
                .pattern(r"ଥାନା\s*[:\-]?.*?ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)")
                .digit_scan("ଥାନା"),
        );

        self.add(
            FieldSpec::new(FieldKey::Tehsil)
                .pattern(r"ତହସିଲ\s*[:\-]?\s*([^\n,:]+)")
                .line_scan("ତହସିଲ"),
        );

        self.add(
            FieldSpec::new(FieldKey::TehsilNo)
                .pattern(r"ତହସିଲ\s*ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)"),
        );

        self.add(
            FieldSpec::new(FieldKey::KhataNo)
                .pattern(r"ଖତିୟାନ(?:.*?କ୍ରମିକ)?\s*ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)")
                .pattern(r"ଖତିୟାନର\s*କ୍ରମିକ\s*ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)"),
        );

        self.add(
            FieldSpec::new(FieldKey::PlotNo)
                .pattern(r"ପ୍ଲଟ\s*ନ(?:ମ|ମ୍)ବର\s*[:\-]?\s*([0-9]+)")
                .pattern(r"ପ୍ଲଟ\s*[:\-]?\s*([0-9]+)"),
        );

        // The trailing candidates catch the agricultural classification
        // phrase when the କିସମ label itself was mangled by recognition.
        self.add(
            FieldSpec::new(FieldKey::LandType)
                .pattern(r"କିସମ\s*[:\-]?\s*([^\n,]+)")
                .pattern(r"କିସମ\s*ଓ\s*([^\n,]+)")
                .pattern(r"(ପଦର[^\n,]+)")
                .pattern(r"(ପଦର[^\d,\.]+)"),
        );

        // Deliberately loose: unit labels render too inconsistently to
        // anchor on, so the first decimal number wins.
        self.add(FieldSpec::new(FieldKey::Area).pattern(r"([0-9]+\.[0-9]+)"));
    }

    fn add(&mut self, spec: FieldSpec) {
        self.specs.push(spec);
    }

    /// Extract every schema field from recognized text.
    ///
    /// `text` is raw multi-line OCR output. Individual fields degrade to
    /// `NotFound`; the only error is input with no usable text at all,
    /// which is reported instead of an all-absent result.
    pub fn extract(&self, text: &str) -> Result<RawFields> {
        if text.trim().is_empty() {
            return Err(RorError::EmptyDocument);
        }

        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let full_text = lines.join(" ");

        let mut fields = BTreeMap::new();
        for spec in &self.specs {
            let value = spec.resolve(&full_text, &lines);
            tracing::debug!(field = %spec.key, found = value.is_found(), "resolved field");
            fields.insert(spec.key, value);
        }

        let owners = self.owner_rules.extract(&full_text, &lines);
        tracing::debug!(count = owners.len(), "extracted owner names");

        Ok(RawFields::new(fields, owners))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bhulekh_core::FieldValue;

    #[test]
    fn labeled_header_line_resolves_village_and_district() {
        let extractor = FieldExtractor::new();
        let raw = extractor
            .extract("ମୌଜା: ଅନନ୍ତପୁର, ଜିଲ୍ଲା: ଖୋର୍ଦ୍ଧା")
            .unwrap();

        assert_eq!(raw.get(FieldKey::Village), &FieldValue::found("ଅନନ୍ତପୁର"));
        assert_eq!(raw.get(FieldKey::District), &FieldValue::found("ଖୋର୍ଦ୍ଧା"));
        assert_eq!(raw.get(FieldKey::PoliceStation), &FieldValue::NotFound);
    }

    #[test]
    fn khata_number_must_be_digits() {
        let extractor = FieldExtractor::new();

        let raw = extractor.extract("ଖତିୟାନ ନମ୍ବର: 245").unwrap();
        assert_eq!(raw.get(FieldKey::KhataNo), &FieldValue::found("245"));

        let raw = extractor.extract("ଖତିୟାନ ନମ୍ବର: abc").unwrap();
        assert_eq!(raw.get(FieldKey::KhataNo), &FieldValue::NotFound);
    }

    #[test]
    fn police_station_number_falls_back_to_digit_scan() {
        let extractor = FieldExtractor::new();
        let raw = extractor.extract("ଥାନା କଟକ ସଦର 123").unwrap();
        assert_eq!(raw.get(FieldKey::PoliceStationNo), &FieldValue::found("123"));
    }

    #[test]
    fn plot_number_accepts_bare_label() {
        let extractor = FieldExtractor::new();
        let raw = extractor.extract("ପ୍ଲଟ 1047").unwrap();
        assert_eq!(raw.get(FieldKey::PlotNo), &FieldValue::found("1047"));
    }

    #[test]
    fn area_is_first_decimal_number() {
        let extractor = FieldExtractor::new();
        let raw = extractor.extract("ମୋଟ ଜମି 0.045 ହେକ୍ଟର").unwrap();
        assert_eq!(raw.get(FieldKey::Area), &FieldValue::found("0.045"));
    }

    #[test]
    fn land_type_marker_fallback() {
        let extractor = FieldExtractor::new();
        let raw = extractor.extract("ଜମିର ବିବରଣୀ ପଦର ଜମି 2 ଏକର").unwrap();
        assert_eq!(
            raw.get(FieldKey::LandType),
            &FieldValue::found("ପଦର ଜମି 2 ଏକର")
        );
    }

    #[test]
    fn text_without_keywords_yields_full_absent_schema() {
        let extractor = FieldExtractor::new();
        let raw = extractor.extract("nothing of interest here").unwrap();

        for key in [
            FieldKey::Village,
            FieldKey::District,
            FieldKey::PoliceStation,
            FieldKey::PoliceStationNo,
            FieldKey::Tehsil,
            FieldKey::TehsilNo,
            FieldKey::KhataNo,
            FieldKey::PlotNo,
            FieldKey::LandType,
            FieldKey::Area,
        ] {
            assert_eq!(raw.get(key), &FieldValue::NotFound, "key {key}");
        }
        assert!(raw.owners().is_empty());
        assert_eq!(raw.resolved_count(), 0);
    }

    #[test]
    fn empty_text_is_a_hard_failure() {
        let extractor = FieldExtractor::new();
        assert!(matches!(
            extractor.extract("   \n  \n"),
            Err(RorError::EmptyDocument)
        ));
        assert!(matches!(extractor.extract(""), Err(RorError::EmptyDocument)));
    }

    #[test]
    fn multi_line_documents_match_across_lines() {
        let extractor = FieldExtractor::new();
        let text = "ଜିଲ୍ଲା: କଟକ,\nତହସିଲ: ବାଙ୍କୀ,\nଖତିୟାନ ନମ୍ବର: 88\n";
        let raw = extractor.extract(text).unwrap();

        assert_eq!(raw.get(FieldKey::District), &FieldValue::found("କଟକ"));
        assert_eq!(raw.get(FieldKey::Tehsil), &FieldValue::found("ବାଙ୍କୀ"));
        assert_eq!(raw.get(FieldKey::KhataNo), &FieldValue::found("88"));
        assert_eq!(raw.resolved_count(), 3);
    }
}
