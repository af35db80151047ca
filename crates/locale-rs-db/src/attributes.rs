//! Attribute storage with change tracking.
//!
//! [`AttributeBag`] holds a record's attribute values alongside a snapshot of
//! their last-persisted state. "Dirty" means the current value differs from
//! the snapshot; after a successful persist, [`AttributeBag::sync_original`]
//! re-baselines the snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// An ordered map of attribute values with an original-value snapshot.
///
/// # Examples
///
/// ```
/// use locale_rs_db::attributes::AttributeBag;
/// use locale_rs_db::value::Value;
///
/// let mut bag = AttributeBag::new();
/// bag.set("title", "Hello");
/// assert!(bag.is_dirty());
/// assert_eq!(bag.dirty_fields(), vec!["title"]);
///
/// bag.sync_original();
/// assert!(!bag.is_dirty());
/// assert_eq!(bag.get("title"), Some(&Value::String("Hello".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBag {
    values: BTreeMap<String, Value>,
    original: BTreeMap<String, Value>,
}

impl AttributeBag {
    /// Creates an empty bag. Everything set on it is dirty until synced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag from persisted values; the snapshot matches, so the bag
    /// starts clean.
    pub fn from_persisted(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        let values: BTreeMap<String, Value> = values.into_iter().collect();
        Self {
            original: values.clone(),
            values,
        }
    }

    /// Returns the current value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the last-persisted value for `key`.
    pub fn original(&self, key: &str) -> Option<&Value> {
        self.original.get(key)
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the names of attributes whose value differs from the snapshot.
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(k, v)| self.original.get(*k) != Some(v))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Returns the changed name-value pairs, cloned for persistence.
    pub fn dirty_values(&self) -> Vec<(String, Value)> {
        self.values
            .iter()
            .filter(|(k, v)| self.original.get(*k) != Some(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns whether any attribute has changed since the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.values
            .iter()
            .any(|(k, v)| self.original.get(k) != Some(v))
    }

    /// Re-baselines the snapshot to the current values.
    ///
    /// Called after a successful persist.
    pub fn sync_original(&mut self) {
        self.original = self.values.clone();
    }

    /// Returns all current name-value pairs, cloned.
    pub fn all_values(&self) -> Vec<(String, Value)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Iterates over the current attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns whether the bag holds no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
