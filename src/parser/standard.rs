// Case, punctuation and accent normalization shared by every key method

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use crate::config::subsystems::NormalizerConfig;

use super::TextNormalizer;

lazy_static! {
    // Anything that is neither a letter, a number nor whitespace
    static ref SPECIAL_CHARS: Regex = Regex::new(r"[^\p{Alphabetic}\p{N}\s]").unwrap();
}

#[derive(Debug, Clone, Default)]
pub struct StandardNormalizer {
    settings: NormalizerConfig,
}

impl StandardNormalizer {
    pub fn new(settings: NormalizerConfig) -> Self {
        Self { settings }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    pub fn settings(&self) -> &NormalizerConfig {
        &self.settings
    }

    fn remove_special_chars(&self, text: &str) -> String {
        SPECIAL_CHARS.replace_all(text, "").into_owned()
    }

    // NFD splits "é" into 'e' + U+0301, the mark is then dropped
    fn remove_accents(&self, text: &str) -> String {
        text.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }
}

impl TextNormalizer for StandardNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut normalized = if self.settings.trim {
            text.trim().to_string()
        } else {
            text.to_string()
        };

        if self.settings.lowercase {
            normalized = normalized.to_lowercase();
        }
        if self.settings.remove_special_chars {
            normalized = self.remove_special_chars(&normalized);
        }
        if self.settings.remove_accents {
            normalized = self.remove_accents(&normalized);
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        StandardNormalizer::new_with_defaults().normalize(text)
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  New York \t"), "new york");
    }

    #[test]
    fn removes_punctuation_but_keeps_inner_whitespace() {
        assert_eq!(normalize("St. Louis, MO!"), "st louis mo");
        assert_eq!(normalize("a  -  b"), "a    b");
    }

    #[test]
    fn removes_accents() {
        assert_eq!(normalize("Café Müller"), "cafe muller");
        assert_eq!(normalize("São Paulo"), "sao paulo");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("Route #66"), "route 66");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!#"), "");
    }

    #[test]
    fn steps_can_be_disabled() {
        let normalizer = StandardNormalizer::new(NormalizerConfig {
            trim: false,
            lowercase: false,
            remove_special_chars: false,
            remove_accents: false,
        });
        assert_eq!(normalizer.normalize(" Café! "), " Café! ");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("  Ångström, ÉCOLE  ");
        assert_eq!(normalize(&once), once);
    }
}
