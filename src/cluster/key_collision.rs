// src/cluster/key_collision.rs

use std::time::Instant;
use log::{debug, info, trace};
use rayon::prelude::*;

use crate::column::ColumnSource;
use crate::config::subsystems::{FingerprintConfig, ProcessorConfig};
use crate::error::Result;
use crate::keys::{FingerprintKeyBuilder, KeyBuilder, NGramKeyBuilder};
use crate::parser::TextNormalizer;
use crate::types::{Cluster, KeyedValue, ValueCount};
use super::aggregator::{ClusterAggregator, PartialClusters};

/// Runs normalize -> build key -> aggregate over counted column values.
pub struct KeyCollision<N: TextNormalizer> {
    normalizer: N,
    config: ProcessorConfig,
    pool: Option<rayon::ThreadPool>,
}

impl<N: TextNormalizer> KeyCollision<N> {
    pub fn new(normalizer: N, config: ProcessorConfig) -> Result<Self> {
        // Dedicated pool only when a thread count is pinned
        let pool = if config.use_parallel && config.thread_count > 0 {
            debug!("Building thread pool with {} threads", config.thread_count);
            Some(rayon::ThreadPoolBuilder::new()
                .num_threads(config.thread_count)
                .build()?)
        } else {
            None
        };

        Ok(Self { normalizer, config, pool })
    }

    pub fn sequential(normalizer: N) -> Self {
        Self {
            normalizer,
            config: ProcessorConfig {
                use_parallel: false,
                ..ProcessorConfig::default()
            },
            pool: None,
        }
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn key_for(&self, value: &str, builder: &dyn KeyBuilder) -> String {
        builder.build_key(&self.normalizer.normalize(value))
    }

    fn run<T: Send, F: FnOnce() -> T + Send>(&self, job: F) -> T {
        match &self.pool {
            Some(pool) => pool.install(job),
            None => job(),
        }
    }

    /// Per-value keys, in the same order as `values`
    pub fn keyed_values(&self, values: &[ValueCount], builder: &dyn KeyBuilder) -> Vec<KeyedValue> {
        let to_keyed = |vc: &ValueCount| {
            KeyedValue::new(vc.value.as_str(), self.key_for(&vc.value, builder), vc.count)
        };

        if self.config.should_parallelize(values.len()) {
            self.run(|| values.par_iter().map(to_keyed).collect())
        } else {
            values.iter().map(to_keyed).collect()
        }
    }

    /// Clusters `values` by the keys `builder` produces.
    pub fn cluster(&self, values: &[ValueCount], builder: &dyn KeyBuilder) -> Vec<Cluster> {
        let start = Instant::now();

        let clusters = if self.config.should_parallelize(values.len()) {
            trace!("Clustering {} values in parallel", values.len());
            self.run(|| {
                values
                    .par_iter()
                    .enumerate()
                    .fold(PartialClusters::new, |mut partial, (position, vc)| {
                        partial.add(position, &vc.value, self.key_for(&vc.value, builder), vc.count);
                        partial
                    })
                    .reduce(PartialClusters::new, PartialClusters::merge)
                    .into_clusters()
            })
        } else {
            trace!("Clustering {} values sequentially", values.len());
            ClusterAggregator::new().aggregate(self.keyed_values(values, builder))
        };

        info!("{} clustering: {} distinct values -> {} clusters in {:?}",
            builder.method().as_str(), values.len(), clusters.len(), start.elapsed());
        clusters
    }

    pub fn fingerprint(&self, values: &[ValueCount], config: FingerprintConfig) -> Vec<Cluster> {
        self.cluster(values, &FingerprintKeyBuilder::new(config))
    }

    pub fn ngram_fingerprint(&self, values: &[ValueCount], ngram_size: usize) -> Result<Vec<Cluster>> {
        let builder = NGramKeyBuilder::new(ngram_size)?;
        Ok(self.cluster(values, &builder))
    }

    pub fn cluster_column(
        &self,
        source: &dyn ColumnSource,
        column: &str,
        builder: &dyn KeyBuilder,
    ) -> Result<Vec<Cluster>> {
        let values = source.value_counts(column)?;
        Ok(self.cluster(&values, builder))
    }

    /// Clusters every column in `columns`, preserving their order
    pub fn cluster_columns<S: AsRef<str>>(
        &self,
        source: &dyn ColumnSource,
        columns: &[S],
        builder: &dyn KeyBuilder,
    ) -> Result<Vec<(String, Vec<Cluster>)>> {
        columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                Ok((column.to_string(), self.cluster_column(source, column, builder)?))
            })
            .collect()
    }

    pub fn fingerprint_columns<S: AsRef<str>>(
        &self,
        source: &dyn ColumnSource,
        columns: &[S],
        config: FingerprintConfig,
    ) -> Result<Vec<(String, Vec<Cluster>)>> {
        self.cluster_columns(source, columns, &FingerprintKeyBuilder::new(config))
    }
}
