//! Record assembly
//!
//! Composes raw field values with the transliterator and the translation
//! collaborator into the final `LandRecord`. Proper-noun fields get a
//! Latin rendering; the land type gets a translation, falling back to
//! transliteration whenever the service is unavailable.

use bhulekh_core::{FieldKey, FieldValue, LandRecord, Result, Translation, Translator};
use bhulekh_translit::Transliterator;

use crate::{FieldExtractor, RawFields};

/// Run the full pipeline over recognized text
pub async fn extract_record(
    text: &str,
    extractor: &FieldExtractor,
    translit: &Transliterator,
    translator: &dyn Translator,
) -> Result<LandRecord> {
    let raw = extractor.extract(text)?;
    Ok(assemble_record(&raw, translit, translator).await)
}

/// Assemble a `LandRecord` from raw field values
pub async fn assemble_record(
    raw: &RawFields,
    translit: &Transliterator,
    translator: &dyn Translator,
) -> LandRecord {
    let latin = |value: &FieldValue| value.map(|v| translit.transliterate(v));

    let land_type = raw.get(FieldKey::LandType).clone();
    let land_type_english = match land_type.as_str() {
        Some(phrase) => match translator.translate(phrase).await {
            Translation::Translated(text) => FieldValue::Found(text),
            Translation::Unavailable => {
                tracing::debug!(
                    collaborator = translator.name(),
                    "translation unavailable, substituting transliteration"
                );
                FieldValue::Found(translit.transliterate(phrase))
            }
        },
        None => FieldValue::NotFound,
    };

    LandRecord {
        village: raw.get(FieldKey::Village).clone(),
        village_latin: latin(raw.get(FieldKey::Village)),
        district: raw.get(FieldKey::District).clone(),
        district_latin: latin(raw.get(FieldKey::District)),
        police_station: raw.get(FieldKey::PoliceStation).clone(),
        police_station_latin: latin(raw.get(FieldKey::PoliceStation)),
        police_station_no: raw.get(FieldKey::PoliceStationNo).clone(),
        tehsil: raw.get(FieldKey::Tehsil).clone(),
        tehsil_latin: latin(raw.get(FieldKey::Tehsil)),
        tehsil_no: raw.get(FieldKey::TehsilNo).clone(),
        khata_no: raw.get(FieldKey::KhataNo).clone(),
        plot_no: raw.get(FieldKey::PlotNo).clone(),
        land_type,
        land_type_english,
        area_hectares: raw.get(FieldKey::Area).clone(),
        owner_names: raw.owners().to_vec(),
        owner_names_latin: raw
            .owners()
            .iter()
            .map(|name| translit.transliterate(name))
            .collect(),
    }
}

// ============================================================================
// Tests
// ============================================================================
