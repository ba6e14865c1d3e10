// src/column/counter.rs

use ahash::AHashMap;

use crate::types::ValueCount;

/// Counts exact-match occurrences of column values.
///
/// Distinct values come back in first-occurrence order, which is the order
/// the aggregator later uses to pick a cluster's representative.
#[derive(Debug, Default)]
pub struct ValueCounter {
    index: AHashMap<String, usize>,
    counts: Vec<ValueCount>,
}

impl ValueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        self.add_many(value, 1);
    }

    pub fn add_many(&mut self, value: &str, count: u64) {
        match self.index.get(value) {
            Some(&slot) => self.counts[slot].count += count,
            None => {
                self.index.insert(value.to_string(), self.counts.len());
                self.counts.push(ValueCount::new(value, count));
            }
        }
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|vc| vc.count).sum()
    }

    pub fn into_counts(self) -> Vec<ValueCount> {
        self.counts
    }
}

impl<S: AsRef<str>> FromIterator<S> for ValueCounter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = Self::new();
        for value in iter {
            counter.add(value.as_ref());
        }
        counter
    }
}

/// Distinct values of `values` with their frequencies, in first-seen order.
pub fn count_values<I, S>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().collect::<ValueCounter>().into_counts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_seen_order() {
        let counts = count_values(["b", "a", "b", "c", "b", "a"]);
        assert_eq!(
            counts,
            vec![
                ValueCount::new("b", 3),
                ValueCount::new("a", 2),
                ValueCount::new("c", 1),
            ]
        );
    }

    #[test]
    fn distinctness_is_exact() {
        let counts = count_values(["New York", "new york", "New York "]);
        assert_eq!(counts.len(), 3);
        assert!(counts.iter().all(|vc| vc.count == 1));
    }

    #[test]
    fn totals() {
        let mut counter = ValueCounter::new();
        counter.add("x");
        counter.add_many("y", 4);
        counter.add_many("x", 2);
        assert_eq!(counter.distinct(), 2);
        assert_eq!(counter.total(), 7);
    }

    #[test]
    fn empty_input() {
        assert!(count_values(Vec::<String>::new()).is_empty());
    }
}
