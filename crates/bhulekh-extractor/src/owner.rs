//! Owner-name block extraction
//!
//! Owner lists sit between a "holder's name" heading and the next
//! section header. The marker sets are tuned to the Odisha RoR template
//! and arrive through `ExtractionConfig`, so other regional layouts can
//! override them without touching code.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use bhulekh_core::{script, ExtractionConfig};

/// `ପି` ("son of") with an optional trailing separator; normalized to a
/// comma so father/son composites split into separate names
static SON_OF_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"ପି[:\.\-]?").unwrap());

/// Digits, brackets, dashes, and colons left behind by recognition
static RESIDUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9\[\]\(\)\-:]+").unwrap());

/// Separators between names inside the block
static NAME_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\n;]+").unwrap());

/// Rules for locating and splitting the owner-name block
pub struct OwnerNameRules {
    start_markers: Vec<Regex>,
    stop_keywords: Vec<String>,
}

impl OwnerNameRules {
    /// Build rules from configuration; invalid start-marker patterns are
    /// skipped.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let start_markers = config
            .owner_start_markers
            .iter()
            .filter_map(|source| {
                match RegexBuilder::new(source).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        tracing::warn!(pattern = %source, error = %e, "skipping invalid owner start marker");
                        None
                    }
                }
            })
            .collect();

        Self {
            start_markers,
            stop_keywords: config.owner_stop_keywords.clone(),
        }
    }

    /// Extract owner names from recognized text. Returns an empty list
    /// when no block can be located; that is not an error.
    pub fn extract(&self, full_text: &str, lines: &[String]) -> Vec<String> {
        match self.block(full_text, lines) {
            Some(block) => split_names(&block),
            None => Vec::new(),
        }
    }

    /// Locate the raw owner block and normalize it.
    fn block(&self, full_text: &str, lines: &[String]) -> Option<String> {
        let raw = match self.block_start(full_text) {
            Some(start) => {
                let end = self.block_end(full_text, start);
                full_text[start..end].trim().to_string()
            }
            // Headless documents: owner lists still read as
            // comma-separated, script-native lines.
            None => lines
                .iter()
                .find(|line| line.contains(',') && script::contains_odia(line))?
                .clone(),
        };

        let unified = SON_OF_MARKER.replace_all(&raw, ",");
        let cleaned = RESIDUE.replace_all(&unified, " ");
        Some(cleaned.trim().to_string())
    }

    /// Earliest occurrence of any start marker; the block begins
    /// immediately after it
    fn block_start(&self, full_text: &str) -> Option<usize> {
        self.start_markers
            .iter()
            .filter_map(|regex| regex.find(full_text))
            .min_by_key(|m| m.start())
            .map(|m| m.end())
    }

    /// Nearest stop keyword after `start`, or end of text
    fn block_end(&self, full_text: &str, start: usize) -> usize {
        let mut end = full_text.len();
        for keyword in &self.stop_keywords {
            if let Some(pos) = full_text[start..].find(keyword.as_str()) {
                end = end.min(start + pos);
            }
        }
        end
    }
}

/// Split a normalized block into name candidates, keeping only
/// script-native entries (stray Latin/numeric noise is dropped)
fn split_names(block: &str) -> Vec<String> {
    NAME_SEPARATORS
        .split(block)
        .map(str::trim)
        .filter(|name| !name.is_empty() && script::contains_odia(name))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> OwnerNameRules {
        OwnerNameRules::from_config(&ExtractionConfig::default())
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn son_of_marker_splits_composite_names() {
        let text = "ପ୍ରଜାର ନାମ: ରାମ ପି: ଶ୍ୟାମ, ହରି ଖଜଣା 12.50";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ଶ୍ୟାମ", "ହରି"]);
        assert!(names.iter().all(|n| script::contains_odia(n)));
    }

    #[test]
    fn block_ends_at_nearest_stop_keyword() {
        // ଖତିୟାନ appears before ଖଜଣା, so the block must stop there
        let text = "ପ୍ରଜାର ନାମ: ରାମ, ହରି ଖତିୟାନ 12 ଖଜଣା ଗୋପାଳ";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ହରି"]);
    }

    #[test]
    fn block_runs_to_end_of_text_without_stop_keyword() {
        let text = "ଜମିଦାରଙ୍କ ନାମ: ଗୋପାଳ, ମଧୁ";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ଗୋପାଳ", "ମଧୁ"]);
    }

    #[test]
    fn numbered_heading_is_part_of_the_marker() {
        let text = "1) ପ୍ରଜାର ନାମ ରାମ, ହରି";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ହରି"]);
    }

    #[test]
    fn fallback_picks_comma_separated_script_line() {
        let text = "Record of Rights\nରାମ, ହରି, ଗୋପାଳ\nKhata 12";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ହରି", "ଗୋପାଳ"]);
    }

    #[test]
    fn no_block_yields_empty_list() {
        let text = "no owners mentioned anywhere";
        assert!(rules().extract(text, &lines(text)).is_empty());
    }

    #[test]
    fn latin_noise_is_filtered_from_candidates() {
        let text = "ପ୍ରଜାର ନାମ: ରାମ, xyz 42, ହରି";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ହରି"]);
    }

    #[test]
    fn digits_and_brackets_are_stripped() {
        let text = "ପ୍ରଜାର ନାମ: [1] ରାମ (2), ହରି-3";
        let names = rules().extract(text, &lines(text));
        assert_eq!(names, vec!["ରାମ", "ହରି"]);
    }
}
