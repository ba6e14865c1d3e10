// src/keys/ngram.rs

use std::collections::BTreeSet;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::error::{Error, Result};
use super::{KeyBuilder, KeyMethod};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Character n-gram fingerprint over the whitespace-free text.
#[derive(Debug, Clone, Copy)]
pub struct NGramKeyBuilder {
    ngram_size: usize,
}

impl NGramKeyBuilder {
    pub fn new(ngram_size: usize) -> Result<Self> {
        if ngram_size == 0 {
            return Err(Error::InvalidArgument(
                "n-gram size must be greater than 0".to_string()
            ));
        }
        Ok(Self { ngram_size })
    }

    /// Accepts a signed size so callers holding a raw integer get
    /// `InvalidArgument` for negative values instead of a wrap-around.
    pub fn from_signed(ngram_size: i64) -> Result<Self> {
        if ngram_size <= 0 {
            return Err(Error::InvalidArgument(
                format!("n-gram size must be greater than 0, got {}", ngram_size)
            ));
        }
        let size = usize::try_from(ngram_size)
            .map_err(|_| Error::invalid_argument(format!("n-gram size too large: {}", ngram_size)))?;
        Self::new(size)
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    fn windows(&self, chars: &[char]) -> BTreeSet<String> {
        // Shorter than n: the whole sequence is the only window
        if chars.len() < self.ngram_size {
            return std::iter::once(chars.iter().collect::<String>()).collect();
        }

        chars
            .windows(self.ngram_size)
            .map(|window| {
                window
                    .iter()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
            })
            .collect()
    }
}

impl KeyBuilder for NGramKeyBuilder {
    fn build_key(&self, normalized: &str) -> String {
        let compact = WHITESPACE.replace_all(normalized, "");
        let chars: Vec<char> = compact.chars().collect();

        // BTreeSet gives dedup and lexicographic order in one pass
        let key: String = self.windows(&chars).into_iter().collect();
        trace!("{}-gram fingerprint of {:?}: {:?}", self.ngram_size, normalized, key);
        key
    }

    fn method(&self) -> KeyMethod {
        KeyMethod::NGram
    }
}
