// src/cluster/aggregator.rs

use std::cmp::Ordering;
use ahash::AHashMap;
use log::debug;

use crate::types::{Cluster, KeyedValue};

#[derive(Debug, Clone)]
struct PartialCluster {
    representative: String,
    first_seen: usize,
    count: u64,
}

/// Clusters accumulated over part of the input.
///
/// Each entry carries its input position so that partials built on
/// different workers can be merged in any order and still keep the
/// representative of the earliest entry.
#[derive(Debug, Clone, Default)]
pub struct PartialClusters {
    groups: AHashMap<String, PartialCluster>,
}

impl PartialClusters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: usize, value: &str, key: String, count: u64) {
        match self.groups.get_mut(&key) {
            Some(group) => {
                group.count += count;
                if position < group.first_seen {
                    group.first_seen = position;
                    group.representative = value.to_string();
                }
            }
            None => {
                self.groups.insert(key, PartialCluster {
                    representative: value.to_string(),
                    first_seen: position,
                    count,
                });
            }
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        // Fold the smaller map into the larger one
        let (mut into, from) = if self.groups.len() >= other.groups.len() {
            (std::mem::take(&mut self.groups), other.groups)
        } else {
            (other.groups, std::mem::take(&mut self.groups))
        };

        for (key, group) in from {
            match into.get_mut(&key) {
                Some(existing) => {
                    existing.count += group.count;
                    if group.first_seen < existing.first_seen {
                        existing.first_seen = group.first_seen;
                        existing.representative = group.representative;
                    }
                }
                None => {
                    into.insert(key, group);
                }
            }
        }

        Self { groups: into }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Final clusters ranked by count descending, then key ascending
    pub fn into_clusters(self) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = self.groups
            .into_iter()
            .map(|(key, group)| Cluster {
                value: group.representative,
                count: group.count,
                key,
            })
            .collect();

        clusters.sort_by(rank);
        debug!("Aggregated {} clusters", clusters.len());
        clusters
    }
}

fn rank(a: &Cluster, b: &Cluster) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))
}

/// Groups keyed values into ranked clusters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterAggregator;

impl ClusterAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate<I>(&self, entries: I) -> Vec<Cluster>
    where
        I: IntoIterator<Item = KeyedValue>,
    {
        let mut partial = PartialClusters::new();
        for (position, entry) in entries.into_iter().enumerate() {
            partial.add(position, &entry.value, entry.key, entry.count);
        }
        partial.into_clusters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(value: &str, key: &str, count: u64) -> KeyedValue {
        KeyedValue::new(value, key, count)
    }

    #[test]
    fn groups_sums_and_keeps_first_representative() {
        let clusters = ClusterAggregator::new().aggregate(vec![
            kv("New York", "newyork", 5),
            kv("new york", "newyork", 3),
            kv("YORK NEW", "newyork", 2),
        ]);
        assert_eq!(clusters, vec![Cluster {
            value: "New York".to_string(),
            count: 10,
            key: "newyork".to_string(),
        }]);
    }

    #[test]
    fn ranks_by_count_then_key() {
        let clusters = ClusterAggregator::new().aggregate(vec![
            kv("b", "b", 2),
            kv("c", "c", 7),
            kv("a", "a", 2),
            kv("d", "d", 1),
        ]);
        let keys: Vec<&str> = clusters.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn representative_is_first_in_input_not_most_frequent() {
        let clusters = ClusterAggregator::new().aggregate(vec![
            kv("paris", "paris", 1),
            kv("Paris", "paris", 100),
        ]);
        assert_eq!(clusters[0].value, "paris");
        assert_eq!(clusters[0].count, 101);
    }

    #[test]
    fn empty_input() {
        assert!(ClusterAggregator::new().aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn merge_is_order_independent() {
        let mut left = PartialClusters::new();
        left.add(0, "A", "a".to_string(), 1);
        left.add(3, "B2", "b".to_string(), 4);

        let mut right = PartialClusters::new();
        right.add(1, "B1", "b".to_string(), 2);
        right.add(2, "C", "c".to_string(), 9);

        let forward = left.clone().merge(right.clone()).into_clusters();
        let backward = right.merge(left).into_clusters();
        assert_eq!(forward, backward);

        let b = forward.iter().find(|c| c.key == "b").unwrap();
        assert_eq!(b.value, "B1");
        assert_eq!(b.count, 6);
    }
}
