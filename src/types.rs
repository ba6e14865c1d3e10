use serde::{Serialize, Deserialize};

/// A distinct column value paired with the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

impl ValueCount {
    pub fn new<S: Into<String>>(value: S, count: u64) -> Self {
        Self { value: value.into(), count }
    }
}

/// A distinct value after key building, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedValue {
    pub value: String,
    pub key: String,
    pub count: u64,
}

impl KeyedValue {
    pub fn new<V: Into<String>, K: Into<String>>(value: V, key: K, count: u64) -> Self {
        Self {
            value: value.into(),
            key: key.into(),
            count,
        }
    }
}

/// One group of values that collided on the same key.
///
/// `value` is the representative original value (the first member seen for
/// the key); `count` is the summed frequency of every member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cluster {
    pub value: String,
    pub count: u64,
    pub key: String,
}
