// src/column/mod.rs

pub mod counter;
pub mod csv_source;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::types::ValueCount;

pub use self::counter::{count_values, ValueCounter};
pub use self::csv_source::CsvColumnSource;

/// Supplies the distinct values of a named column with their frequencies.
///
/// Every distinct value must appear exactly once with its true occurrence
/// count. An unknown column is an `InvalidArgument`.
pub trait ColumnSource {
    fn value_counts(&self, column: &str) -> Result<Vec<ValueCount>>;

    fn column_names(&self) -> Vec<String>;
}

/// Named columns held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryColumns {
    names: Vec<String>,
    columns: AHashMap<String, Vec<String>>,
}

impl InMemoryColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column<N, I, S>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, values);
        self
    }

    pub fn insert<N, I, S>(&mut self, name: N, values: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect();
        if self.columns.insert(name.clone(), values).is_none() {
            self.names.push(name);
        }
    }
}

impl ColumnSource for InMemoryColumns {
    fn value_counts(&self, column: &str) -> Result<Vec<ValueCount>> {
        let values = self.columns.get(column).ok_or_else(|| {
            Error::invalid_argument(format!("Unknown column: {}", column))
        })?;
        Ok(count_values(values))
    }

    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }
}
