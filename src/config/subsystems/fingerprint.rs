// src/config/subsystems/fingerprint.rs

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::config::{FromIni, parse_flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    pub sort_tokens: bool,
    pub remove_duplicates: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            sort_tokens: true,
            remove_duplicates: true,
        }
    }
}

impl FromIni for FingerprintConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "fingerprint" {
            return None;
        }

        match key {
            "sort_tokens" => Some(parse_flag(key, value).map(|flag| self.sort_tokens = flag)),
            "remove_duplicates" => {
                Some(parse_flag(key, value).map(|flag| self.remove_duplicates = flag))
            },
            _ => None,
        }
    }
}

impl FingerprintConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sort_tokens {
            log::debug!("Token sorting disabled: fingerprint keys depend on word order");
        }
        Ok(())
    }
}
