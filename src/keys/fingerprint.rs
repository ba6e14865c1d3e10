// src/keys/fingerprint.rs

use ahash::AHashSet;
use log::trace;

use crate::config::subsystems::FingerprintConfig;
use super::{KeyBuilder, KeyMethod};

/// Whitespace token fingerprint: split, optionally dedup and sort, rejoin
/// with no separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerprintKeyBuilder {
    config: FingerprintConfig,
}

impl FingerprintKeyBuilder {
    pub fn new(config: FingerprintConfig) -> Self {
        Self { config }
    }

    pub fn with_flags(sort_tokens: bool, remove_duplicates: bool) -> Self {
        Self::new(FingerprintConfig { sort_tokens, remove_duplicates })
    }

    pub fn config(&self) -> FingerprintConfig {
        self.config
    }
}

impl KeyBuilder for FingerprintKeyBuilder {
    fn build_key(&self, normalized: &str) -> String {
        let mut tokens: Vec<&str> = normalized.split_whitespace().collect();

        if self.config.remove_duplicates {
            // Keeps the first occurrence so unsorted keys stay in input order
            let mut seen = AHashSet::with_capacity(tokens.len());
            tokens.retain(|token| seen.insert(*token));
        }
        if self.config.sort_tokens {
            tokens.sort_unstable();
        }

        let key = tokens.concat();
        trace!("Fingerprint of {:?}: {:?}", normalized, key);
        key
    }

    fn method(&self) -> KeyMethod {
        KeyMethod::Fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sorts_and_dedups() {
        let builder = FingerprintKeyBuilder::default();
        assert_eq!(builder.build_key("york new new"), "newyork");
        assert_eq!(builder.build_key("new york"), "newyork");
    }

    #[test]
    fn all_flag_combinations() {
        let input = "b a b c";
        assert_eq!(FingerprintKeyBuilder::with_flags(true, true).build_key(input), "abc");
        assert_eq!(FingerprintKeyBuilder::with_flags(true, false).build_key(input), "abbc");
        assert_eq!(FingerprintKeyBuilder::with_flags(false, true).build_key(input), "bac");
        assert_eq!(FingerprintKeyBuilder::with_flags(false, false).build_key(input), "babc");
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let builder = FingerprintKeyBuilder::default();
        assert_eq!(builder.build_key("  a \t\n b  "), "ab");
    }

    #[test]
    fn empty_input_gives_empty_key() {
        let builder = FingerprintKeyBuilder::default();
        assert_eq!(builder.build_key(""), "");
        assert_eq!(builder.build_key("   \t "), "");
    }

    #[test]
    fn sorts_by_codepoint() {
        let builder = FingerprintKeyBuilder::default();
        assert_eq!(builder.build_key("b 10 a 9"), "109ab");
    }
}
