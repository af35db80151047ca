//! Per-locale translation records.
//!
//! A [`TranslationRecord`] belongs to exactly one base record and carries the
//! localized values for one locale. The locale tag is a field of the record,
//! not an entry in its attribute bag, so a record whose only "change" is its
//! locale tag is never dirty.

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeBag;
use crate::value::Value;

/// The localized attribute values of one base record in one locale.
///
/// # Examples
///
/// ```
/// use locale_rs_db::translation::TranslationRecord;
///
/// let mut record = TranslationRecord::new("fr");
/// assert!(!record.is_dirty());
///
/// record.set("title", "Bonjour");
/// assert!(record.is_dirty());
/// assert_eq!(record.locale(), "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    locale: String,
    pk: Option<Value>,
    exists: bool,
    attributes: AttributeBag,
}

impl TranslationRecord {
    /// Creates a fresh, unsaved record tagged with `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            pk: None,
            exists: false,
            attributes: AttributeBag::new(),
        }
    }

    /// Reconstructs a persisted record from storage.
    pub fn from_persisted(
        pk: Value,
        locale: impl Into<String>,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self {
            locale: locale.into(),
            pk: Some(pk),
            exists: true,
            attributes: AttributeBag::from_persisted(attributes),
        }
    }

    /// The locale this record carries values for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The primary key, if persisted.
    pub const fn pk(&self) -> Option<&Value> {
        self.pk.as_ref()
    }

    /// Whether this record has been persisted.
    pub const fn exists(&self) -> bool {
        self.exists
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the last-persisted value for `key`.
    ///
    /// Changes made since the last persist are not visible here.
    pub fn original(&self, key: &str) -> Option<&Value> {
        self.attributes.original(key)
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.set(key, value);
    }

    /// Whether any attribute changed since the last persist.
    ///
    /// The locale tag is not an attribute and never contributes.
    pub fn is_dirty(&self) -> bool {
        self.attributes.is_dirty()
    }

    /// The changed name-value pairs, for persistence.
    pub fn dirty_values(&self) -> Vec<(String, Value)> {
        self.attributes.dirty_values()
    }

    /// All current name-value pairs, for an initial insert.
    pub fn all_values(&self) -> Vec<(String, Value)> {
        self.attributes.all_values()
    }

    /// Marks this record as persisted under `pk` and re-baselines dirt.
    pub(crate) fn mark_persisted(&mut self, pk: Value) {
        self.pk = Some(pk);
        self.exists = true;
        self.attributes.sync_original();
    }

    /// Re-baselines dirt after a successful update.
    pub(crate) fn sync_original(&mut self) {
        self.attributes.sync_original();
    }
}
