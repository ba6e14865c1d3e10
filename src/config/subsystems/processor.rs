// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_flag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    // Parallelization settings
    pub use_parallel: bool,
    // 0 means use rayon's global pool
    pub thread_count: usize,
    // Below this many distinct values the work stays on the calling thread
    pub parallel_threshold: usize,

    // Log level
    pub log_level: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            use_parallel: true,
            thread_count: 0,
            parallel_threshold: 10_000,
            log_level: "info".to_string(),
        }
    }
}

pub fn parse_level_filter(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "use_parallel" => Some(parse_flag(key, value).map(|flag| self.use_parallel = flag)),
            "thread_count" => {
                match value.parse() {
                    Ok(count) => {
                        self.thread_count = count;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid thread_count (must be >= 0): {}", value)
                    ))),
                }
            },
            "parallel_threshold" => {
                match value.parse() {
                    Ok(threshold) => {
                        self.parallel_threshold = threshold;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid parallel_threshold (must be >= 0): {}", value)
                    ))),
                }
            },
            "log_level" => {
                let level_str = value.trim().to_lowercase();
                Some(match parse_level_filter(&level_str) {
                    Some(_) => {
                        self.log_level = level_str;
                        Ok(())
                    },
                    None => Err(Error::Config(
                        format!("Invalid log level '{}'. Must be one of: none, error, warn, info, debug, trace", value)
                    )),
                })
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        parse_level_filter(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn validate(&self) -> Result<()> {
        if parse_level_filter(&self.log_level).is_none() {
            return Err(Error::Config(
                format!("Invalid log level '{}'", self.log_level)
            ));
        }
        Ok(())
    }

    /// Whether a run over `value_count` distinct values should fan out
    pub fn should_parallelize(&self, value_count: usize) -> bool {
        self.use_parallel && value_count >= self.parallel_threshold
    }

    /// Returns a human-readable description of the configuration
    pub fn describe(&self) -> String {
        format!(
            "Processor configuration:\n\
             - Parallel processing: {}\n\
             - Thread count: {}\n\
             - Parallel threshold: {} values\n\
             - Log level: {}",
            if self.use_parallel { "enabled" } else { "disabled" },
            if self.thread_count == 0 { "default".to_string() } else { self.thread_count.to_string() },
            self.parallel_threshold,
            self.log_level
        )
    }
}
