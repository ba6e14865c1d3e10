// src/config/subsystems/input.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_flag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
    pub columns: Vec<String>,
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            columns: Vec::new(),
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl FromIni for InputConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "input" {
            return None;
        }

        match key {
            "path" => {
                self.path = Some(PathBuf::from(value.trim_matches('"')));
                Some(Ok(()))
            },
            "columns" | "column" => {
                self.columns = value
                    .split(',')
                    .map(|c| c.trim().trim_matches('"').to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                Some(Ok(()))
            },
            "delimiter" => {
                let raw = value.trim_matches('"');
                let delimiter = if raw == "\\t" { "\t" } else { raw };
                match delimiter.as_bytes() {
                    [byte] => {
                        self.delimiter = *byte;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid delimiter (must be a single byte): {}", value)
                    ))),
                }
            },
            "has_headers" => Some(parse_flag(key, value).map(|flag| self.has_headers = flag)),
            _ => None,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            // Only warn here, the CLI may still override the path
            if !path.exists() {
                log::warn!("Input file not found: {:?}", path);
            }
        }
        Ok(())
    }
}
