// src/column/csv_source.rs

use std::path::{Path, PathBuf};
use indicatif::ProgressBar;
use log::{debug, info};

use crate::config::subsystems::InputConfig;
use crate::error::{Error, Result};
use crate::types::ValueCount;
use super::{ColumnSource, ValueCounter};

/// Reads one column of a delimited file and counts its values.
///
/// Without a header row, columns are addressed by zero-based index ("0", "1", ...).
#[derive(Debug, Clone)]
pub struct CsvColumnSource {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
    progress: Option<ProgressBar>,
}

impl CsvColumnSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            has_headers: true,
            progress: None,
        }
    }

    pub fn from_config(config: &InputConfig) -> Result<Self> {
        let path = config.path.as_ref().ok_or_else(|| {
            Error::invalid_argument("No input path configured")
        })?;
        Ok(Self::new(path)
            .with_delimiter(config.delimiter)
            .with_headers(config.has_headers))
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Ticks `progress` once per record read
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>> {
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .from_path(&self.path)?)
    }

    fn headers(&self) -> Result<Vec<String>> {
        let mut reader = self.reader()?;
        if self.has_headers {
            Ok(reader.headers()?.iter().map(str::to_string).collect())
        } else {
            // Width of the first record decides the index range
            let width = match reader.records().next() {
                Some(record) => record?.len(),
                None => 0,
            };
            Ok((0..width).map(|i| i.to_string()).collect())
        }
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        let headers = self.headers()?;
        headers
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| Error::invalid_argument(
                format!("Unknown column '{}' in {:?} (available: {})",
                    column, self.path, headers.join(", "))
            ))
    }
}

impl ColumnSource for CsvColumnSource {
    fn value_counts(&self, column: &str) -> Result<Vec<ValueCount>> {
        let index = self.column_index(column)?;
        debug!("Column '{}' is field {} of {:?}", column, index, self.path);

        let mut reader = self.reader()?;
        let mut counter = ValueCounter::new();
        let mut record = csv::StringRecord::new();

        while reader.read_record(&mut record)? {
            counter.add(record.get(index).unwrap_or_default());
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
        }

        info!("Read {} values ({} distinct) from column '{}'",
            counter.total(), counter.distinct(), column);
        Ok(counter.into_counts())
    }

    fn column_names(&self) -> Vec<String> {
        self.headers().unwrap_or_default()
    }
}
