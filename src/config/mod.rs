pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::{Error, Result};
use log::{warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

pub(crate) fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        Error::Config(format!("Invalid {} value (must be true/false): {}", key, value))
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCollideConfig {
    pub input: subsystems::InputConfig,
    pub normalizer: subsystems::NormalizerConfig,
    pub fingerprint: subsystems::FingerprintConfig,
    pub ngram: subsystems::NGramConfig,
    pub processor: subsystems::ProcessorConfig,
}

impl KeyCollideConfig {
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.normalizer.validate()?;
        self.fingerprint.validate()?;
        self.ngram.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;
        Self::from_ini_str(&content)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                let handled = match current_section.as_str() {
                    "input" => config.input.from_ini_section(&current_section, key, value),
                    "normalizer" => config.normalizer.from_ini_section(&current_section, key, value),
                    "fingerprint" => config.fingerprint.from_ini_section(&current_section, key, value),
                    "ngram" => config.ngram.from_ini_section(&current_section, key, value),
                    "processor" => config.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                };

                match handled {
                    Some(Err(e)) => return Err(e),
                    Some(Ok(())) => {},
                    None => warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section),
                }
            } else {
                warn!("Ignoring malformed config line {}: {}", line_num + 1, line);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections() {
        let ini = "\
# clustering run
[input]
path = \"data/people.csv\"
columns = name, city
delimiter = ;

[normalizer]
remove_accents = false

[fingerprint]
sort_tokens = false
remove_duplicates = true

[ngram]
ngram_size = 3

[processor]
use_parallel = false
thread_count = 2
log_level = debug
";
        let config = KeyCollideConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.input.path.as_deref(), Some(Path::new("data/people.csv")));
        assert_eq!(config.input.columns, vec!["name".to_string(), "city".to_string()]);
        assert_eq!(config.input.delimiter, b';');
        assert!(!config.normalizer.remove_accents);
        assert!(config.normalizer.lowercase);
        assert!(!config.fingerprint.sort_tokens);
        assert_eq!(config.ngram.ngram_size, Some(3));
        assert!(!config.processor.use_parallel);
        assert_eq!(config.processor.thread_count, 2);
        assert_eq!(config.processor.get_log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = KeyCollideConfig::from_ini_str("").unwrap();
        assert_eq!(config, KeyCollideConfig::default());
        assert!(config.fingerprint.sort_tokens);
        assert!(config.fingerprint.remove_duplicates);
        assert_eq!(config.ngram.ngram_size, None);
    }

    #[test]
    fn rejects_non_positive_ngram_size() {
        for bad in ["0", "-2", "abc"] {
            let ini = format!("[ngram]\nngram_size = {}\n", bad);
            let err = KeyCollideConfig::from_ini_str(&ini).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{} gave {:?}", bad, err);
        }
    }

    #[test]
    fn rejects_bad_flag() {
        let err = KeyCollideConfig::from_ini_str("[fingerprint]\nsort_tokens = maybe\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = KeyCollideConfig::from_ini_str("[storage]\nmap_size = 10\n").unwrap();
        assert_eq!(config, KeyCollideConfig::default());
    }
}
