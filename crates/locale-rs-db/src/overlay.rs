//! The localized-attribute overlay.
//!
//! [`TranslatableRecord`] is a base record instance that routes attribute
//! reads and writes between its own attribute bag and per-locale
//! [`TranslationRecord`]s, resolves fallback locales, and orchestrates
//! persistence so base and translation writes stay consistent.
//!
//! Translations are held in an owned map keyed by locale code, loaded at most
//! once per instance through an explicit [`TranslatableRecord::load_translations`]
//! call. One record per locale holds by construction; a duplicate row
//! encountered during load is collapsed (last row wins) and logged.
//!
//! All operations that resolve a locale take an explicit
//! [`LocaleContext`] rather than consulting ambient state.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use locale_rs_core::{LocaleContext, LocaleError, LocaleResult};
use locale_rs_signals::{PostSave, PreSave, TranslationsSaved, MODEL_SIGNALS};

use crate::attributes::AttributeBag;
use crate::key::AttributeKey;
use crate::meta::{EntityMeta, FieldKind};
use crate::storage::Storage;
use crate::translation::TranslationRecord;
use crate::value::Value;

/// What a [`TranslatableRecord::save`] call actually wrote.
///
/// Callers and observers decide what to react to from this, instead of
/// inferring it from persistence events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Whether the base record was inserted or updated.
    pub base_written: bool,
    /// Whether the base record was inserted for the first time.
    pub created: bool,
    /// The locales whose translation records were written.
    pub translations_written: Vec<String>,
}

impl SaveOutcome {
    /// Whether the save wrote anything at all.
    pub fn wrote_anything(&self) -> bool {
        self.base_written || !self.translations_written.is_empty()
    }
}

/// A base record with per-locale attribute variants.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use locale_rs_core::{LocaleContext, LocaleRegistry, LocaleSettings};
/// use locale_rs_db::meta::EntityMeta;
/// use locale_rs_db::overlay::TranslatableRecord;
/// use locale_rs_db::storage::MemoryStorage;
/// use locale_rs_db::value::Value;
///
/// static POST: LazyLock<EntityMeta> = LazyLock::new(|| {
///     EntityMeta::new("posts", "post_translations", "post_id", &["title"])
/// });
///
/// let settings = LocaleSettings::from_toml_str(r#"
///     fallback = "en"
///     [locales]
///     en = "English"
///     fr = "Français"
/// "#).unwrap();
/// let registry = LocaleRegistry::new(settings);
/// let ctx = LocaleContext::new(&registry, "fr").unwrap();
///
/// let mut post = TranslatableRecord::new(&POST);
/// post.set("status", "draft", &ctx).unwrap();
/// post.set("title", "Bonjour", &ctx).unwrap();
/// post.set("title:en", "Hello", &ctx).unwrap();
///
/// assert_eq!(post.get("title", &ctx).unwrap(), Some(Value::from("Bonjour")));
///
/// let mut storage = MemoryStorage::new();
/// let outcome = post.save(&mut storage).unwrap();
/// assert!(outcome.base_written);
/// assert_eq!(outcome.translations_written, vec!["en".to_string(), "fr".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct TranslatableRecord {
    meta: &'static EntityMeta,
    pk: Option<Value>,
    exists: bool,
    attributes: AttributeBag,
    /// `None` until explicitly loaded (persisted records); new records start
    /// with an empty, loaded map.
    translations: Option<BTreeMap<String, TranslationRecord>>,
}

impl TranslatableRecord {
    /// Creates a fresh, unsaved record of the given entity type.
    pub fn new(meta: &'static EntityMeta) -> Self {
        Self {
            meta,
            pk: None,
            exists: false,
            attributes: AttributeBag::new(),
            translations: Some(BTreeMap::new()),
        }
    }

    /// Reconstructs a persisted base record. Translations are not loaded.
    pub fn from_persisted(
        meta: &'static EntityMeta,
        pk: Value,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Self {
            meta,
            pk: Some(pk),
            exists: true,
            attributes: AttributeBag::from_persisted(attributes),
            translations: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The entity type metadata.
    pub const fn meta(&self) -> &'static EntityMeta {
        self.meta
    }

    /// The primary key, if persisted.
    pub const fn pk(&self) -> Option<&Value> {
        self.pk.as_ref()
    }

    /// Whether the base record has been persisted.
    pub const fn exists(&self) -> bool {
        self.exists
    }

    /// Whether any base attribute changed since the last persist.
    pub fn is_dirty(&self) -> bool {
        self.attributes.is_dirty()
    }

    /// Whether the translation collection has been loaded.
    pub const fn translations_loaded(&self) -> bool {
        self.translations.is_some()
    }

    // ── Translation collection ───────────────────────────────────────

    /// Loads the translation collection from storage, at most once.
    ///
    /// Subsequent calls are no-ops; storage-layer changes made after the
    /// first load are not observed by this instance.
    pub fn load_translations(&mut self, storage: &dyn Storage) -> LocaleResult<()> {
        if self.translations.is_some() {
            return Ok(());
        }
        let pk = self
            .pk
            .as_ref()
            .ok_or_else(|| LocaleError::Storage("base record has no primary key".into()))?;
        let rows =
            storage.fetch_translations(self.meta.translation_table, self.meta.foreign_key, pk)?;
        debug!(table = self.meta.translation_table, rows = rows.len(), "loaded translations");

        let mut map = BTreeMap::new();
        for row in rows {
            let record = TranslationRecord::from_persisted(row.pk, row.locale.clone(), row.attributes);
            if map.insert(row.locale.clone(), record).is_some() {
                warn!(
                    table = self.meta.translation_table,
                    locale = row.locale,
                    "duplicate translation row collapsed, last row wins"
                );
            }
        }
        self.translations = Some(map);
        Ok(())
    }

    /// Injects pre-loaded translation records (eager loading, tests).
    ///
    /// Duplicate locales are collapsed, last record wins.
    pub fn set_translations(&mut self, records: impl IntoIterator<Item = TranslationRecord>) {
        let mut map = BTreeMap::new();
        for record in records {
            let locale = record.locale().to_string();
            if map.insert(locale.clone(), record).is_some() {
                warn!(locale, "duplicate translation record collapsed, last record wins");
            }
        }
        self.translations = Some(map);
    }

    /// Looks up the translation for `locale`.
    ///
    /// When `fallback` is true and `locale` has no record, the registry's
    /// fallback locale is tried instead.
    pub fn translation(
        &self,
        locale: &str,
        fallback: bool,
        ctx: &LocaleContext<'_>,
    ) -> LocaleResult<Option<&TranslationRecord>> {
        let map = self
            .translations
            .as_ref()
            .ok_or(LocaleError::TranslationsNotLoaded)?;
        if let Some(record) = map.get(locale) {
            return Ok(Some(record));
        }
        if fallback {
            return Ok(map.get(ctx.fallback()));
        }
        Ok(None)
    }

    /// Returns the translation for `locale`, creating an unsaved one tagged
    /// with that locale if absent.
    pub fn translation_or_new(&mut self, locale: &str) -> LocaleResult<&mut TranslationRecord> {
        let map = self
            .translations
            .as_mut()
            .ok_or(LocaleError::TranslationsNotLoaded)?;
        Ok(map
            .entry(locale.to_string())
            .or_insert_with(|| TranslationRecord::new(locale)))
    }

    /// Whether a translation record exists (in memory) for `locale`.
    pub fn has_translation(&self, locale: &str) -> LocaleResult<bool> {
        let map = self
            .translations
            .as_ref()
            .ok_or(LocaleError::TranslationsNotLoaded)?;
        Ok(map.contains_key(locale))
    }

    // ── Attribute routing ────────────────────────────────────────────

    /// Reads an attribute.
    ///
    /// The raw key may be `"attr"`, `"attr:locale"`, or
    /// `"attr:locale|default"`. Non-translatable keys read the base record.
    /// Translatable keys resolve against the addressed locale, falling back
    /// to the registry fallback only when no inline default was given; a
    /// missing translation resolves to the default (possibly `None`).
    pub fn get(&self, raw_key: &str, ctx: &LocaleContext<'_>) -> LocaleResult<Option<Value>> {
        let parsed = AttributeKey::parse(raw_key, ctx);
        if self.meta.classify(parsed.key) == FieldKind::Base {
            return Ok(self.attributes.get(parsed.key).cloned());
        }
        match self.translation(parsed.locale, parsed.fallback_allowed(), ctx)? {
            Some(record) => Ok(record.get(parsed.key).cloned()),
            None => Ok(parsed.default.map(Value::from)),
        }
    }

    /// Reads an attribute's last-persisted value.
    ///
    /// Routing matches [`Self::get`]: non-translatable keys read the base
    /// record's snapshot, translatable keys resolve the addressed locale
    /// (with fallback unless an inline default was given) and read that
    /// record's snapshot. Changes made since the last persist are not
    /// visible here.
    pub fn get_original(
        &self,
        raw_key: &str,
        ctx: &LocaleContext<'_>,
    ) -> LocaleResult<Option<Value>> {
        let parsed = AttributeKey::parse(raw_key, ctx);
        if self.meta.classify(parsed.key) == FieldKind::Base {
            return Ok(self.attributes.original(parsed.key).cloned());
        }
        match self.translation(parsed.locale, parsed.fallback_allowed(), ctx)? {
            Some(record) => Ok(record.original(parsed.key).cloned()),
            None => Ok(parsed.default.map(Value::from)),
        }
    }

    /// Writes an attribute.
    ///
    /// Inline defaults in the raw key are ignored for writes. Translatable
    /// keys write through find-or-create for the addressed locale; the new
    /// record stays in memory until [`Self::save`].
    pub fn set(
        &mut self,
        raw_key: &str,
        value: impl Into<Value>,
        ctx: &LocaleContext<'_>,
    ) -> LocaleResult<()> {
        let parsed = AttributeKey::parse(raw_key, ctx);
        if self.meta.classify(parsed.key) == FieldKind::Base {
            self.attributes.set(parsed.key, value);
        } else {
            self.translation_or_new(parsed.locale)?.set(parsed.key, value);
        }
        Ok(())
    }

    /// Mass-assigns attributes.
    ///
    /// Top-level keys that are known locale codes carry nested
    /// `attribute -> value` maps routed through find-or-create for that
    /// locale. All other keys are routed like [`Self::set`] with the
    /// context's current locale.
    ///
    /// Every assignment is subject to the fillable/guarded policy: an
    /// attribute not individually fillable is skipped, or, under a
    /// totally-guarded policy, aborts with
    /// [`LocaleError::MassAssignment`] naming the offending top-level key.
    /// Attributes applied by earlier iterations are not rolled back.
    pub fn fill(
        &mut self,
        input: &serde_json::Map<String, serde_json::Value>,
        ctx: &LocaleContext<'_>,
    ) -> LocaleResult<()> {
        for (key, value) in input {
            if ctx.registry().has(key) {
                let serde_json::Value::Object(nested) = value else {
                    return Err(LocaleError::Serialization(format!(
                        "locale key '{key}' expects a nested attribute map"
                    )));
                };
                for (attribute, v) in nested {
                    if self.meta.is_fillable(attribute) {
                        self.translation_or_new(key)?
                            .set(attribute.clone(), Value::from_json(v));
                    } else if self.meta.totally_guarded {
                        return Err(LocaleError::MassAssignment {
                            key: key.clone(),
                            attribute: attribute.clone(),
                        });
                    }
                }
            } else if self.meta.is_fillable(key) {
                self.set(key, Value::from_json(value), ctx)?;
            } else if self.meta.totally_guarded {
                return Err(LocaleError::MassAssignment {
                    key: key.clone(),
                    attribute: key.clone(),
                });
            }
        }
        Ok(())
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Saves the base record and all dirty translations.
    ///
    /// - Unsaved base record: insert it; on failure abort with no
    ///   translation writes.
    /// - Persisted and dirty: update it; on failure abort.
    /// - Persisted and clean: skip the base write and persist dirty
    ///   translations directly; if any were written, `post_save` fires
    ///   exactly as it would for a base update.
    ///
    /// Only translations with outstanding changes are written; the locale
    /// tag alone never counts as a change.
    pub fn save(&mut self, storage: &mut dyn Storage) -> LocaleResult<SaveOutcome> {
        MODEL_SIGNALS.pre_save.send(&PreSave {
            entity: self.meta.table,
        });

        let mut outcome = SaveOutcome::default();
        if self.exists {
            if self.attributes.is_dirty() {
                let pk = self.require_pk()?.clone();
                let dirty = self.attributes.dirty_values();
                storage.update(self.meta.table, self.meta.pk_column, &pk, &dirty)?;
                self.attributes.sync_original();
                outcome.base_written = true;
            }
        } else {
            let values = self.attributes.all_values();
            let pk = storage.insert(self.meta.table, &values)?;
            self.pk = Some(pk);
            self.exists = true;
            self.attributes.sync_original();
            outcome.base_written = true;
            outcome.created = true;
        }

        outcome.translations_written = self.save_translations(storage)?;

        debug!(
            entity = self.meta.table,
            base_written = outcome.base_written,
            translations = outcome.translations_written.len(),
            "save complete"
        );
        if outcome.wrote_anything() {
            MODEL_SIGNALS.post_save.send(&PostSave {
                entity: self.meta.table,
                created: outcome.created,
            });
        }
        if !outcome.translations_written.is_empty() {
            MODEL_SIGNALS.translations_saved.send(&TranslationsSaved {
                entity: self.meta.table,
                locales: outcome.translations_written.clone(),
            });
        }
        Ok(outcome)
    }

    /// Persists every dirty translation, returning the locales written.
    fn save_translations(&mut self, storage: &mut dyn Storage) -> LocaleResult<Vec<String>> {
        let Some(map) = self.translations.as_mut() else {
            // Never loaded, so nothing was touched.
            return Ok(Vec::new());
        };
        let mut written = Vec::new();
        for (locale, record) in map.iter_mut() {
            if !record.is_dirty() {
                continue;
            }
            if record.exists() {
                let pk = record
                    .pk()
                    .cloned()
                    .ok_or_else(|| LocaleError::Storage("translation has no primary key".into()))?;
                let dirty = record.dirty_values();
                storage.update(self.meta.translation_table, self.meta.pk_column, &pk, &dirty)?;
                record.sync_original();
            } else {
                let base_pk = self
                    .pk
                    .clone()
                    .ok_or_else(|| LocaleError::Storage("base record has no primary key".into()))?;
                let mut values = record.all_values();
                values.push(("locale".to_string(), Value::from(locale.as_str())));
                values.push((self.meta.foreign_key.to_string(), base_pk));
                let pk = storage.insert(self.meta.translation_table, &values)?;
                record.mark_persisted(pk);
            }
            written.push(locale.clone());
        }
        Ok(written)
    }

    fn require_pk(&self) -> LocaleResult<&Value> {
        self.pk
            .as_ref()
            .ok_or_else(|| LocaleError::Storage("base record has no primary key".into()))
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Exports the record as a map: base attributes overlaid with each
    /// non-hidden translatable attribute resolved in the context's current
    /// locale with fallback.
    pub fn to_map(&self, ctx: &LocaleContext<'_>) -> LocaleResult<BTreeMap<String, Value>> {
        let mut map: BTreeMap<String, Value> = self
            .attributes
            .iter()
            .filter(|(k, _)| !self.meta.is_hidden(k))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        if let Some(record) = self.translation(ctx.current(), true, ctx)? {
            for field in self.meta.translatable {
                if !self.meta.is_hidden(field) {
                    map.insert(
                        (*field).to_string(),
                        record.get(field).cloned().unwrap_or(Value::Null),
                    );
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use locale_rs_core::{LocaleRegistry, LocaleSettings};
    use std::sync::LazyLock;

    static POST: LazyLock<EntityMeta> = LazyLock::new(|| {
        EntityMeta::new("posts", "post_translations", "post_id", &["title", "body"])
            .fillable(&["title", "body", "status"])
            .hidden(&["body"])
    });

    fn registry() -> LocaleRegistry {
        let settings = LocaleSettings::from_toml_str(
            r#"
                default = "vi"
                fallback = "en"

                [locales]
                en = "English"
                vi = "Tiếng Việt"
                fr = "Français"
            "#,
        )
        .unwrap();
        LocaleRegistry::new(settings)
    }

    #[test]
    fn test_base_attribute_routing() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);

        post.set("status", "draft", &ctx).unwrap();
        assert_eq!(post.get("status", &ctx).unwrap(), Some(Value::from("draft")));
        // Base attributes are untouched by locale suffixes on other keys.
        assert!(!post.has_translation("vi").unwrap());
    }

    #[test]
    fn test_translated_attribute_uses_context_locale() {
        let r = registry();
        let ctx = LocaleContext::new(&r, "fr").unwrap();
        let mut post = TranslatableRecord::new(&POST);

        post.set("title", "Bonjour", &ctx).unwrap();
        assert!(post.has_translation("fr").unwrap());
        assert_eq!(
            post.get("title", &ctx).unwrap(),
            Some(Value::from("Bonjour"))
        );
        assert_eq!(
            post.get("title:fr", &ctx).unwrap(),
            Some(Value::from("Bonjour"))
        );
    }

    #[test]
    fn test_set_then_get_before_save() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);
        post.set("title:en", "Hello", &ctx).unwrap();
        assert_eq!(
            post.get("title:en", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
    }

    #[test]
    fn test_fallback_resolution() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);
        post.set("title:en", "Hello", &ctx).unwrap();

        // "fr" has no record; fallback to "en" applies without a default.
        assert_eq!(
            post.get("title:fr", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
        // No record anywhere and no default resolves to None.
        assert_eq!(post.get("body:fr", &ctx).unwrap(), None);
    }

    #[test]
    fn test_explicit_default_disables_fallback() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);
        post.set("title:en", "Hello", &ctx).unwrap();

        // The fallback-locale value must never leak through a defaulted read.
        assert_eq!(
            post.get("title:fr|untitled", &ctx).unwrap(),
            Some(Value::from("untitled"))
        );
        // The addressed locale's own value still wins over the default.
        assert_eq!(
            post.get("title:en|untitled", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
    }

    #[test]
    fn test_get_original_ignores_pending_changes() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.set("title:en", "Hello", &ctx).unwrap();
        post.save(&mut storage).unwrap();

        post.set("status", "published", &ctx).unwrap();
        post.set("title:en", "Hello again", &ctx).unwrap();

        assert_eq!(
            post.get("status", &ctx).unwrap(),
            Some(Value::from("published"))
        );
        assert_eq!(
            post.get_original("status", &ctx).unwrap(),
            Some(Value::from("draft"))
        );
        assert_eq!(
            post.get("title:en", &ctx).unwrap(),
            Some(Value::from("Hello again"))
        );
        assert_eq!(
            post.get_original("title:en", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
        // The fallback resolves for original reads exactly as for current ones.
        assert_eq!(
            post.get_original("title:fr", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
    }

    #[test]
    fn test_get_original_on_unsaved_record() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);
        post.set("title:en", "Hello", &ctx).unwrap();

        // Nothing has been persisted, so there is no original to read.
        assert_eq!(post.get_original("title:en", &ctx).unwrap(), None);
        // An explicit default still short-circuits a missing record.
        assert_eq!(
            post.get_original("title:fr|draft", &ctx).unwrap(),
            Some(Value::from("draft"))
        );
    }

    #[test]
    fn test_unloaded_translations_error() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let post = TranslatableRecord::from_persisted(&POST, Value::Int(1), Vec::new());
        let err = post.get("title", &ctx).unwrap_err();
        assert!(matches!(err, LocaleError::TranslationsNotLoaded));
    }

    #[test]
    fn test_load_translations_at_most_once() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let base_pk = storage.insert("posts", &[]).unwrap();
        storage
            .insert(
                "post_translations",
                &[
                    ("post_id".into(), base_pk.clone()),
                    ("locale".into(), Value::from("en")),
                    ("title".into(), Value::from("Hello")),
                ],
            )
            .unwrap();

        let mut post = TranslatableRecord::from_persisted(&POST, base_pk.clone(), Vec::new());
        post.load_translations(&storage).unwrap();
        assert_eq!(
            post.get("title:en", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );

        // A row added after the first load is not observed.
        storage
            .insert(
                "post_translations",
                &[
                    ("post_id".into(), base_pk),
                    ("locale".into(), Value::from("fr")),
                    ("title".into(), Value::from("Bonjour")),
                ],
            )
            .unwrap();
        post.load_translations(&storage).unwrap();
        assert!(!post.has_translation("fr").unwrap());
    }

    #[test]
    fn test_duplicate_rows_collapse_to_one_per_locale() {
        let mut post = TranslatableRecord::new(&POST);
        let mut first = TranslationRecord::new("en");
        first.set("title", "First");
        let mut second = TranslationRecord::new("en");
        second.set("title", "Second");

        post.set_translations(vec![first, second]);
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        assert_eq!(
            post.get("title:en", &ctx).unwrap(),
            Some(Value::from("Second"))
        );
    }

    #[test]
    fn test_fill_routes_locales_and_base() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);

        let input = serde_json::json!({
            "en": {"title": "Hello"},
            "status": "draft",
        });
        post.fill(input.as_object().unwrap(), &ctx).unwrap();

        assert_eq!(
            post.get("title:en", &ctx).unwrap(),
            Some(Value::from("Hello"))
        );
        assert_eq!(post.get("status", &ctx).unwrap(), Some(Value::from("draft")));
        assert!(!post.has_translation("fr").unwrap());
        assert!(!post.has_translation("vi").unwrap());
    }

    #[test]
    fn test_fill_totally_guarded_violation_names_locale() {
        static GUARDED: LazyLock<EntityMeta> = LazyLock::new(|| {
            EntityMeta::new("posts", "post_translations", "post_id", &["title", "secret"])
                .fillable(&["title"])
                .totally_guarded()
        });
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&GUARDED);

        let input = serde_json::json!({"en": {"secret": "x"}});
        let err = post.fill(input.as_object().unwrap(), &ctx).unwrap_err();
        assert!(
            matches!(err, LocaleError::MassAssignment { ref key, .. } if key == "en"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_fill_unfillable_without_guard_is_skipped() {
        static LOOSE: LazyLock<EntityMeta> = LazyLock::new(|| {
            EntityMeta::new("posts", "post_translations", "post_id", &["title"])
                .fillable(&["title"])
        });
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&LOOSE);

        let input = serde_json::json!({"en": {"title": "Hello"}, "internal": 1});
        post.fill(input.as_object().unwrap(), &ctx).unwrap();
        assert_eq!(post.get("internal", &ctx).unwrap(), None);
    }

    #[test]
    fn test_fill_top_level_translatable_goes_to_current_locale() {
        let r = registry();
        let ctx = LocaleContext::new(&r, "fr").unwrap();
        let mut post = TranslatableRecord::new(&POST);

        let input = serde_json::json!({"title": "Bonjour"});
        post.fill(input.as_object().unwrap(), &ctx).unwrap();
        assert!(post.has_translation("fr").unwrap());
        assert_eq!(
            post.get("title:fr|", &ctx).unwrap(),
            Some(Value::from("Bonjour"))
        );
    }

    #[test]
    fn test_save_new_record_persists_base_and_translations() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.set("title:en", "Hello", &ctx).unwrap();

        let outcome = post.save(&mut storage).unwrap();
        assert!(outcome.base_written);
        assert!(outcome.created);
        assert_eq!(outcome.translations_written, vec!["en".to_string()]);
        assert!(post.exists());
        assert_eq!(storage.row_count("posts"), 1);
        assert_eq!(storage.row_count("post_translations"), 1);
        assert_eq!(
            storage.cell("post_translations", 2, "post_id"),
            Some(&Value::Int(1))
        );
        assert_eq!(
            storage.cell("post_translations", 2, "locale"),
            Some(&Value::String("en".into()))
        );
    }

    #[test]
    fn test_save_clean_record_writes_nothing() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.save(&mut storage).unwrap();

        let outcome = post.save(&mut storage).unwrap();
        assert_eq!(outcome, SaveOutcome::default());
        assert!(!outcome.wrote_anything());
    }

    #[test]
    fn test_save_translation_only_skips_base_write() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.save(&mut storage).unwrap();

        post.set("title:fr", "Bonjour", &ctx).unwrap();
        let outcome = post.save(&mut storage).unwrap();
        assert!(!outcome.base_written);
        assert_eq!(outcome.translations_written, vec!["fr".to_string()]);
    }

    #[test]
    fn test_save_skips_clean_translations() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut storage = MemoryStorage::new();
        let mut post = TranslatableRecord::new(&POST);
        post.set("title:en", "Hello", &ctx).unwrap();
        post.set("title:fr", "Bonjour", &ctx).unwrap();
        post.save(&mut storage).unwrap();

        // Only the changed locale is written again.
        post.set("title:fr", "Salut", &ctx).unwrap();
        let outcome = post.save(&mut storage).unwrap();
        assert_eq!(outcome.translations_written, vec!["fr".to_string()]);
    }

    #[test]
    fn test_base_failure_aborts_translation_writes() {
        struct FailingStorage;
        impl Storage for FailingStorage {
            fn insert(&mut self, _: &str, _: &[(String, Value)]) -> LocaleResult<Value> {
                Err(LocaleError::Storage("disk full".into()))
            }
            fn update(
                &mut self,
                _: &str,
                _: &str,
                _: &Value,
                _: &[(String, Value)],
            ) -> LocaleResult<()> {
                Err(LocaleError::Storage("disk full".into()))
            }
            fn fetch_translations(
                &self,
                _: &str,
                _: &str,
                _: &Value,
            ) -> LocaleResult<Vec<crate::storage::StoredTranslation>> {
                Ok(Vec::new())
            }
        }

        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.set("title:en", "Hello", &ctx).unwrap();

        let err = post.save(&mut FailingStorage).unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(!post.exists());
        // The translation is still unsaved and dirty for a later retry.
        let record = post.translation("en", false, &ctx).unwrap().unwrap();
        assert!(record.is_dirty());
        assert!(!record.exists());
    }

    #[test]
    fn test_to_map_overlays_current_locale_with_fallback() {
        let r = registry();
        let ctx = LocaleContext::new(&r, "fr").unwrap();
        let mut post = TranslatableRecord::new(&POST);
        post.set("status", "draft", &ctx).unwrap();
        post.set("title:en", "Hello", &ctx).unwrap();
        post.set("body:en", "secret body", &ctx).unwrap();

        let map = post.to_map(&ctx).unwrap();
        // "fr" has no record, so the fallback locale's title is exported.
        assert_eq!(map.get("title"), Some(&Value::from("Hello")));
        assert_eq!(map.get("status"), Some(&Value::from("draft")));
        // Hidden attributes are excluded.
        assert!(!map.contains_key("body"));
    }
}
