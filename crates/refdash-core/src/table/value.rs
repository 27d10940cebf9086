//! Sortable cell values and the row abstraction.

use std::cmp::Ordering;

/// A single comparable cell of a table row.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// Field absent or null.
    Missing,
}

impl SortValue {
    /// Native ordering of two cells.
    ///
    /// Numbers compare numerically, text lexicographically. Anything else
    /// (missing values, NaN, a number against text) is incomparable and
    /// reported as `Equal`.
    pub fn compare(&self, other: &SortValue) -> Ordering {
        use SortValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Text(a), Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Int(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Float(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Missing, Into::into)
    }
}

/// A record that can be ordered by one of its named fields.
pub trait Row {
    /// Returns the value of `key`, or [`SortValue::Missing`] for unknown keys.
    fn sort_value(&self, key: &str) -> SortValue;
}

impl Row for serde_json::Value {
    fn sort_value(&self, key: &str) -> SortValue {
        match self.get(key) {
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .map(SortValue::Int)
                .or_else(|| n.as_f64().map(SortValue::Float))
                .unwrap_or(SortValue::Missing),
            Some(serde_json::Value::String(s)) => SortValue::Text(s.clone()),
            _ => SortValue::Missing,
        }
    }
}
