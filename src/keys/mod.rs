// src/keys/mod.rs

mod fingerprint;
mod ngram;

use serde::{Serialize, Deserialize};

pub use self::fingerprint::FingerprintKeyBuilder;
pub use self::ngram::NGramKeyBuilder;

/// Turns an already normalized value into its collision key.
///
/// Implementations must be pure: the same input and configuration always
/// yield the same key.
pub trait KeyBuilder: Sync + Send {
    fn build_key(&self, normalized: &str) -> String;

    /// Short name used in logs and output headers
    fn method(&self) -> KeyMethod;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyMethod {
    Fingerprint,
    NGram,
}

impl KeyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMethod::Fingerprint => "fingerprint",
            KeyMethod::NGram => "ngram",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fingerprint" => Some(Self::Fingerprint),
            "ngram" | "n-gram" | "ngram_fingerprint" => Some(Self::NGram),
            _ => None,
        }
    }
}

impl Default for KeyMethod {
    fn default() -> Self {
        Self::Fingerprint
    }
}
