//! The storage collaborator interface.
//!
//! The overlay delegates all persistence to a [`Storage`] implementation.
//! The interface is synchronous: the overlay's execution model is one base
//! record mutated by one logical caller within one unit of work, and any
//! cancellation or timeout behavior belongs to the implementation.
//!
//! [`MemoryStorage`] is a reference implementation backed by in-process maps,
//! used by the test suites and handy for prototyping.

use std::collections::BTreeMap;

use locale_rs_core::{LocaleError, LocaleResult};

use crate::value::Value;

/// A translation row as returned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTranslation {
    /// The translation row's primary key.
    pub pk: Value,
    /// The locale tag.
    pub locale: String,
    /// The localized attribute values (locale tag and foreign key excluded).
    pub attributes: Vec<(String, Value)>,
}

/// Row-level persistence as consumed by the overlay.
///
/// Implementations report failures synchronously; the overlay performs no
/// retries and aborts its save chain on the first error.
pub trait Storage {
    /// Inserts a row and returns its primary key.
    fn insert(&mut self, table: &str, values: &[(String, Value)]) -> LocaleResult<Value>;

    /// Updates the given columns of the row identified by `pk`.
    fn update(
        &mut self,
        table: &str,
        pk_column: &str,
        pk: &Value,
        values: &[(String, Value)],
    ) -> LocaleResult<()>;

    /// Loads all translation rows whose `fk_column` equals `fk`.
    fn fetch_translations(
        &self,
        table: &str,
        fk_column: &str,
        fk: &Value,
    ) -> LocaleResult<Vec<StoredTranslation>>;
}

/// The column under which [`MemoryStorage`] keeps a translation's locale tag.
const LOCALE_COLUMN: &str = "locale";

/// In-process storage backed by per-table row maps.
///
/// Primary keys are sequential integers per table. Suitable for tests and
/// prototyping; not for concurrent use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: BTreeMap<String, BTreeMap<i64, BTreeMap<String, Value>>>,
    next_pk: i64,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            next_pk: 1,
        }
    }

    /// Returns the number of rows in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, BTreeMap::len)
    }

    /// Returns a column of a stored row, for assertions.
    pub fn cell(&self, table: &str, pk: i64, column: &str) -> Option<&Value> {
        self.tables.get(table)?.get(&pk)?.get(column)
    }
}

impl Storage for MemoryStorage {
    fn insert(&mut self, table: &str, values: &[(String, Value)]) -> LocaleResult<Value> {
        let pk = self.next_pk;
        self.next_pk += 1;
        let row: BTreeMap<String, Value> = values.iter().cloned().collect();
        self.tables.entry(table.to_string()).or_default().insert(pk, row);
        Ok(Value::Int(pk))
    }

    fn update(
        &mut self,
        table: &str,
        _pk_column: &str,
        pk: &Value,
        values: &[(String, Value)],
    ) -> LocaleResult<()> {
        let Value::Int(pk) = pk else {
            return Err(LocaleError::Storage(format!(
                "memory storage uses integer keys, got {pk}"
            )));
        };
        let row = self
            .tables
            .get_mut(table)
            .and_then(|rows| rows.get_mut(pk))
            .ok_or_else(|| LocaleError::Storage(format!("no row {pk} in table '{table}'")))?;
        for (column, value) in values {
            row.insert(column.clone(), value.clone());
        }
        Ok(())
    }

    fn fetch_translations(
        &self,
        table: &str,
        fk_column: &str,
        fk: &Value,
    ) -> LocaleResult<Vec<StoredTranslation>> {
        let Some(rows) = self.tables.get(table) else {
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for (pk, row) in rows {
            if row.get(fk_column) != Some(fk) {
                continue;
            }
            let locale = row
                .get(LOCALE_COLUMN)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    LocaleError::Storage(format!(
                        "translation row {pk} in '{table}' has no locale tag"
                    ))
                })?
                .to_string();
            let attributes = row
                .iter()
                .filter(|(k, _)| k.as_str() != LOCALE_COLUMN && k.as_str() != fk_column)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            result.push(StoredTranslation {
                pk: Value::Int(*pk),
                locale,
                attributes,
            });
        }
        Ok(result)
    }
}
