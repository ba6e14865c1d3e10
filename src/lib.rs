//! keycollide clusters near-duplicate values of a tabular column by key
//! collision. Values are normalized (case, punctuation, accents), turned
//! into a fingerprint or character n-gram key, and values sharing a key are
//! counted together as one cluster.

// Module declarations
pub mod error;
pub mod parser;
pub mod keys;
pub mod column;
pub mod cluster;
pub mod config;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use cluster::{ClusterAggregator, KeyCollision, PartialClusters};
pub use column::{ColumnSource, CsvColumnSource, InMemoryColumns, ValueCounter};
pub use keys::{FingerprintKeyBuilder, KeyBuilder, KeyMethod, NGramKeyBuilder};
pub use parser::{StandardNormalizer, TextNormalizer};
pub use types::{Cluster, KeyedValue, ValueCount};

// Re-export the config from config module
pub use config::KeyCollideConfig;
