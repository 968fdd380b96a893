//! Bhulekh Translit - Odia to Latin phonetic transliteration
//!
//! A greedy, single-pass transducer over the four character classes of
//! the script: independent vowels, consonants, dependent vowel signs, and
//! diacritics. One character of lookahead after a consonant decides which
//! of the three production rules applies: bare consonant + inherent "a",
//! consonant + explicit vowel sign, or consonant cluster via the virama.
//!
//! Output is lossy but safe: unmapped code points pass through unchanged.

use std::collections::HashMap;

use bhulekh_core::script;

/// Vowel-suppression mark (halanta)
const VIRAMA: char = '\u{0B4D}';

/// Odia to Latin transliterator.
///
/// The transcoding tables are built once at construction and only read
/// afterwards, so a single instance can serve concurrent callers.
pub struct Transliterator {
    consonants: HashMap<char, &'static str>,
    independent_vowels: HashMap<char, &'static str>,
    vowel_signs: HashMap<char, &'static str>,
    diacritics: HashMap<char, &'static str>,
}

impl Transliterator {
    /// Create a transliterator with the standard Odia tables
    pub fn new() -> Self {
        let mut translit = Self {
            consonants: HashMap::new(),
            independent_vowels: HashMap::new(),
            vowel_signs: HashMap::new(),
            diacritics: HashMap::new(),
        };

        translit.init_consonants();
        translit.init_vowels();
        translit.init_diacritics();
        translit
    }

    fn init_consonants(&mut self) {
        for (ch, base) in [
            ('କ', "k"),
            ('ଖ', "kh"),
            ('ଗ', "g"),
            ('ଘ', "gh"),
            ('ଙ', "ng"),
            ('ଚ', "ch"),
            ('ଛ', "chh"),
            ('ଜ', "j"),
            ('ଝ', "jh"),
            ('ଞ', "ny"),
            ('ଟ', "t"),
            ('ଠ', "th"),
            ('ଡ', "d"),
            ('ଢ', "dh"),
            ('ଣ', "n"),
            ('ତ', "t"),
            ('ଥ', "th"),
            ('ଦ', "d"),
            ('ଧ', "dh"),
            ('ନ', "n"),
            ('ପ', "p"),
            ('ଫ', "ph"),
            ('ବ', "b"),
            ('ଭ', "bh"),
            ('ମ', "m"),
            ('ଯ', "y"),
            ('ର', "r"),
            ('ଲ', "l"),
            ('ଶ', "sh"),
            ('ଷ', "sh"),
            ('ସ', "s"),
            ('ହ', "h"),
            ('ଳ', "l"),
            ('\u{0B5C}', "d"),
            ('\u{0B5D}', "dh"),
            ('ୟ', "y"),
            ('ୱ', "w"),
        ] {
            self.consonants.insert(ch, base);
        }
    }

    fn init_vowels(&mut self) {
        for (ch, fragment) in [
            ('ଅ', "a"),
            ('ଆ', "aa"),
            ('ଇ', "i"),
            ('ଈ', "ii"),
            ('ଉ', "u"),
            ('ଊ', "uu"),
            ('ଋ', "ru"),
            ('ଏ', "e"),
            ('ଐ', "ai"),
            ('ଓ', "o"),
            ('ଔ', "au"),
        ] {
            self.independent_vowels.insert(ch, fragment);
        }

        for (ch, fragment) in [
            ('ା', "a"),
            ('ି', "i"),
            ('ୀ', "i"),
            ('ୁ', "u"),
            ('ୂ', "u"),
            ('ୃ', "ru"),
            ('େ', "e"),
            ('ୈ', "ai"),
            ('ୋ', "o"),
            ('ୌ', "au"),
        ] {
            self.vowel_signs.insert(ch, fragment);
        }
    }

    fn init_diacritics(&mut self) {
        self.diacritics.insert('ଂ', "n"); // anusvara
        self.diacritics.insert('ଃ', "h"); // visarga
    }

    /// Render a string into a capitalized Latin phonetic approximation.
    ///
    /// Strings with no Odia code points are returned unchanged, which
    /// makes the operation idempotent: feeding the (pure Latin) output
    /// back in yields the same string.
    pub fn transliterate(&self, text: &str) -> String {
        if !script::contains_odia(text) {
            return text.to_string();
        }

        let chars: Vec<char> = text.trim().chars().collect();
        let mut out = String::with_capacity(chars.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            let next = chars.get(i + 1).copied();

            if let Some(fragment) = self.independent_vowels.get(&ch) {
                out.push_str(fragment);
                i += 1;
            } else if let Some(base) = self.consonants.get(&ch) {
                out.push_str(base);
                match next {
                    // Conjunct: the virama suppresses the inherent vowel
                    Some(VIRAMA) => i += 2,
                    Some(sign) => {
                        if let Some(vowel) = self.vowel_signs.get(&sign) {
                            out.push_str(vowel);
                            i += 2;
                        } else {
                            out.push('a');
                            i += 1;
                        }
                    }
                    None => {
                        out.push('a');
                        i += 1;
                    }
                }
            } else if let Some(fragment) = self.vowel_signs.get(&ch) {
                // Orphaned sign, usually OCR damage
                out.push_str(fragment);
                i += 1;
            } else if ch == VIRAMA {
                i += 1;
            } else if let Some(fragment) = self.diacritics.get(&ch) {
                out.push_str(fragment);
                i += 1;
            } else {
                out.push(ch);
                i += 1;
            }
        }

        let collapsed = out.split_whitespace().collect::<Vec<_>>().join(" ");
        let folded = collapsed.replace("ii", "i").replace("uu", "u");
        folded
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase the first character, lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(s: &str) -> String {
        s.replace("ii", "i").replace("uu", "u")
    }

    #[test]
    fn latin_input_is_returned_unchanged() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("Khata No. 245"), "Khata No. 245");
        assert_eq!(translit.transliterate(""), "");
        assert_eq!(translit.transliterate("  spaced  out  "), "  spaced  out  ");
    }

    #[test]
    fn transliteration_is_idempotent() {
        let translit = Transliterator::new();
        let once = translit.transliterate("ଅନନ୍ତପୁର");
        let twice = translit.transliterate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn bare_consonant_carries_inherent_vowel() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("କ"), "Ka");
        assert_eq!(translit.transliterate("ମ"), "Ma");
    }

    #[test]
    fn virama_suppresses_inherent_vowel_for_every_consonant() {
        let translit = Transliterator::new();
        for (&ch, &base) in &translit.consonants {
            let input: String = [ch, VIRAMA].iter().collect();
            let expected = capitalize(&fold(base));
            assert_eq!(translit.transliterate(&input), expected, "consonant {ch}");
        }
    }

    #[test]
    fn vowel_sign_replaces_inherent_vowel_for_every_pair() {
        let translit = Transliterator::new();
        for (&consonant, &base) in &translit.consonants {
            for (&sign, &vowel) in &translit.vowel_signs {
                let input: String = [consonant, sign].iter().collect();
                let expected = capitalize(&fold(&format!("{base}{vowel}")));
                assert_eq!(
                    translit.transliterate(&input),
                    expected,
                    "pair {consonant}{sign}"
                );
            }
        }
    }

    #[test]
    fn conjuncts_render_without_intermediate_vowel() {
        let translit = Transliterator::new();
        // ଅନନ୍ତପୁର: the ନ୍ତ cluster must not receive an inherent vowel
        assert_eq!(translit.transliterate("ଅନନ୍ତପୁର"), "Anantapura");
        assert_eq!(translit.transliterate("ଖୋର୍ଦ୍ଧା"), "Khorddha");
    }

    #[test]
    fn anusvara_and_visarga_render_as_nasal_and_aspirate() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("ଅଂ"), "An");
        assert_eq!(translit.transliterate("ଅଃ"), "Ah");
    }

    #[test]
    fn orphaned_vowel_sign_emits_its_fragment() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("ି"), "I");
    }

    #[test]
    fn long_vowels_fold_to_short() {
        let translit = Transliterator::new();
        // Independent ଈ is "ii", folded to "i" for readability
        assert_eq!(translit.transliterate("ଈ"), "I");
        assert_eq!(translit.transliterate("ଊ"), "U");
    }

    #[test]
    fn words_are_capitalized_independently() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("ରାମ ଶ୍ୟାମ"), "Rama Shyama");
    }

    #[test]
    fn whitespace_collapses_to_single_spaces() {
        let translit = Transliterator::new();
        assert_eq!(translit.transliterate("ରାମ   \n  ହରି"), "Rama Hari");
    }

    #[test]
    fn latin_round_trip_is_stable() {
        let translit = Transliterator::new();
        for input in ["ଅନନ୍ତପୁର", "ଖୋର୍ଦ୍ଧା", "ରାମ ଶ୍ୟାମ", "ପଦର ଜମି"] {
            let latin = translit.transliterate(input);
            assert!(!bhulekh_core::script::contains_odia(&latin));
            assert_eq!(translit.transliterate(&latin), latin);
        }
    }
}
