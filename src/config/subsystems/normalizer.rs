// src/config/subsystems/normalizer.rs

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::config::{FromIni, parse_flag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    // Each step runs in declaration order when enabled
    pub trim: bool,
    pub lowercase: bool,
    pub remove_special_chars: bool,
    pub remove_accents: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            trim: true,
            lowercase: true,
            remove_special_chars: true,
            remove_accents: true,
        }
    }
}

impl FromIni for NormalizerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "normalizer" {
            return None;
        }

        match key {
            "trim" => Some(parse_flag(key, value).map(|flag| self.trim = flag)),
            "lowercase" => Some(parse_flag(key, value).map(|flag| self.lowercase = flag)),
            "remove_special_chars" => {
                Some(parse_flag(key, value).map(|flag| self.remove_special_chars = flag))
            },
            "remove_accents" => {
                Some(parse_flag(key, value).map(|flag| self.remove_accents = flag))
            },
            _ => None,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.has_processing_enabled() {
            log::warn!("All normalization steps are disabled; keys will be built from raw values");
        }
        Ok(())
    }

    /// Returns a description of the enabled normalization steps
    pub fn describe(&self) -> String {
        let mut description = Vec::new();

        if self.trim {
            description.push("trimming whitespace");
        }
        if self.lowercase {
            description.push("lowercasing");
        }
        if self.remove_special_chars {
            description.push("removing special characters");
        }
        if self.remove_accents {
            description.push("removing accents");
        }

        if description.is_empty() {
            "no normalization applied".to_string()
        } else {
            description.join(", ")
        }
    }

    pub fn has_processing_enabled(&self) -> bool {
        self.trim || self.lowercase || self.remove_special_chars || self.remove_accents
    }
}
