// src/config/subsystems/ngram.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// The n-gram size has no default: it must come from the config file or
/// the command line before the n-gram method can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NGramConfig {
    pub ngram_size: Option<usize>,
}

impl FromIni for NGramConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "ngram" {
            return None;
        }

        match key {
            "ngram_size" => {
                match value.parse::<i64>() {
                    Ok(size) if size > 0 => {
                        self.ngram_size = Some(size as usize);
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid ngram_size (must be > 0): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl NGramConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == Some(0) {
            return Err(Error::Config(
                "ngram_size must be greater than 0".to_string()
            ));
        }
        Ok(())
    }

    /// The configured size, or `InvalidArgument` when none was given.
    pub fn require_size(&self) -> Result<usize> {
        self.ngram_size.ok_or_else(|| {
            Error::invalid_argument("n-gram size is required for the n-gram method")
        })
    }
}
