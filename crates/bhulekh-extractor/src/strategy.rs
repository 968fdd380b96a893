//! Extraction strategies
//!
//! Each schema field is resolved by an ordered list of strategies; the
//! first one producing a non-empty value wins. Strategies are pure
//! functions of the recognized text and its line split, so precedence is
//! explicit in the list order rather than hidden in control flow.

use bhulekh_core::{FieldKey, FieldValue};
use regex::{Captures, Regex, RegexBuilder};

/// A single way of locating a field value in recognized text
#[derive(Debug, Clone)]
pub enum FieldStrategy {
    /// Regex candidate over the full text. The value is the first
    /// non-empty capture group, or the whole match if there are none.
    Pattern(Regex),

    /// Find the first line containing the keyword and take the token
    /// after the `:` separator, or after the keyword itself.
    LineScan { keyword: String },

    /// Scan lines containing the keyword for a run of two or more
    /// digits. OCR frequently detaches a numeric label from its value.
    DigitScan { keyword: String, run: Regex },
}

impl FieldStrategy {
    /// Apply this strategy; `None` means it found nothing
    pub fn apply(&self, full_text: &str, lines: &[String]) -> Option<String> {
        match self {
            Self::Pattern(regex) => regex
                .captures(full_text)
                .map(|caps| first_group(&caps))
                .filter(|value| !value.is_empty()),
            Self::LineScan { keyword } => scan_line(keyword, lines),
            Self::DigitScan { keyword, run } => lines
                .iter()
                .filter(|line| line.contains(keyword.as_str()))
                .find_map(|line| run.find(line).map(|m| m.as_str().to_string())),
        }
    }
}

/// An ordered list of strategies resolving one schema field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: FieldKey,
    strategies: Vec<FieldStrategy>,
    numeric: bool,
}

impl FieldSpec {
    pub fn new(key: FieldKey) -> Self {
        Self {
            key,
            strategies: Vec::new(),
            numeric: key.is_numeric(),
        }
    }

    /// Append a regex candidate. Patterns match case-insensitively and
    /// may span embedded newlines; invalid patterns are skipped.
    pub fn pattern(mut self, source: &str) -> Self {
        match RegexBuilder::new(source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
        {
            Ok(regex) => self.strategies.push(FieldStrategy::Pattern(regex)),
            Err(e) => {
                tracing::warn!(pattern = source, error = %e, "skipping invalid field pattern")
            }
        }
        self
    }

    /// Append a line-scan fallback on the given keyword
    pub fn line_scan(mut self, keyword: &str) -> Self {
        self.strategies.push(FieldStrategy::LineScan {
            keyword: keyword.to_string(),
        });
        self
    }

    /// Append a digit-run fallback on lines containing the keyword
    pub fn digit_scan(mut self, keyword: &str) -> Self {
        if let Ok(run) = Regex::new(r"[0-9]{2,}") {
            self.strategies.push(FieldStrategy::DigitScan {
                keyword: keyword.to_string(),
                run,
            });
        }
        self
    }

    /// Resolve this field, honoring strategy order. A strategy result
    /// that fails the numeric requirement is discarded and the next
    /// strategy is tried.
    pub fn resolve(&self, full_text: &str, lines: &[String]) -> FieldValue {
        for strategy in &self.strategies {
            if let Some(value) = strategy.apply(full_text, lines) {
                if self.numeric && !value.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                return FieldValue::Found(value);
            }
        }
        FieldValue::NotFound
    }
}

/// First non-empty capture group, falling back to the whole match
fn first_group(caps: &Captures<'_>) -> String {
    for group in caps.iter().skip(1).flatten() {
        let value = group.as_str().trim();
        if !value.is_empty() {
            return value.to_string();
        }
    }
    caps.get(0)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Line-scan: token after the first `:`, else first token left after
/// stripping the keyword from the line
fn scan_line(keyword: &str, lines: &[String]) -> Option<String> {
    let line = lines.iter().find(|line| line.contains(keyword))?;
    let value = match line.split(':').nth(1) {
        Some(after) => after.trim().to_string(),
        None => line.replace(keyword, "").trim().to_string(),
    };
    value.split_whitespace().next().map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn pattern_prefers_first_nonempty_group() {
        let spec = FieldSpec::new(FieldKey::Village).pattern(r"ମୌଜା\s*[:\-]?\s*([^\n,:]+)");
        let text = "ମୌଜା: ଅନନ୍ତପୁର, ଜିଲ୍ଲା: ଖୋର୍ଦ୍ଧା";
        assert_eq!(
            spec.resolve(text, &lines(text)),
            FieldValue::found("ଅନନ୍ତପୁର")
        );
    }

    #[test]
    fn groupless_pattern_returns_whole_match() {
        let spec = FieldSpec::new(FieldKey::LandType).pattern(r"ପଦର[^\n,]+");
        let text = "କିଛି ପଦର ଜମି ଅଟେ";
        assert_eq!(
            spec.resolve(text, &lines(text)),
            FieldValue::found("ପଦର ଜମି ଅଟେ")
        );
    }

    #[test]
    fn line_scan_takes_token_after_separator() {
        let spec = FieldSpec::new(FieldKey::Village).line_scan("ମୌଜା");
        let text = "ମୌଜା: ଅନନ୍ତପୁର ଅଞ୍ଚଳ";
        assert_eq!(
            spec.resolve(text, &lines(text)),
            FieldValue::found("ଅନନ୍ତପୁର")
        );
    }

    #[test]
    fn line_scan_strips_keyword_when_no_separator() {
        let spec = FieldSpec::new(FieldKey::Village).line_scan("ମୌଜା");
        let text = "ମୌଜା ଅନନ୍ତପୁର";
        assert_eq!(
            spec.resolve(text, &lines(text)),
            FieldValue::found("ଅନନ୍ତପୁର")
        );
    }

    #[test]
    fn digit_scan_requires_two_digit_run() {
        let spec = FieldSpec::new(FieldKey::PoliceStationNo).digit_scan("ଥାନା");
        let hit = "ଥାନା କଟକ 123";
        assert_eq!(spec.resolve(hit, &lines(hit)), FieldValue::found("123"));

        let miss = "ଥାନା କଟକ 1";
        assert_eq!(spec.resolve(miss, &lines(miss)), FieldValue::NotFound);
    }

    #[test]
    fn numeric_fields_reject_non_digit_values() {
        let spec = FieldSpec::new(FieldKey::KhataNo).line_scan("ଖତିୟାନ");
        let text = "ଖତିୟାନ: abc";
        assert_eq!(spec.resolve(text, &lines(text)), FieldValue::NotFound);
    }

    #[test]
    fn strategy_order_is_precedence() {
        let spec = FieldSpec::new(FieldKey::Village)
            .pattern(r"ଗ୍ରାମ\s*[:\-]?\s*([^\n,:]+)")
            .line_scan("ମୌଜା");
        // The pattern misses, the fallback resolves
        let text = "ମୌଜା: ଅନନ୍ତପୁର";
        assert_eq!(
            spec.resolve(text, &lines(text)),
            FieldValue::found("ଅନନ୍ତପୁର")
        );
    }
}
