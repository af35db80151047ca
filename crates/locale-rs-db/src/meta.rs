//! Static metadata for translatable entity types.
//!
//! [`EntityMeta`] describes one entity type: its base and translation tables,
//! the foreign key linking them, which attribute names live on translation
//! records, and the mass-assignment policy. The base-vs-translated
//! classification is resolved once at registration into a set lookup, so
//! reads and writes classify a key without scanning the declared list.
//!
//! Metadata is built once per entity type, typically in a `LazyLock` static.

use std::collections::HashSet;

/// Where an attribute lives for a given entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The attribute is stored on the base record.
    Base,
    /// The attribute is stored on per-locale translation records.
    Translated,
}

/// Static description of a translatable entity type.
///
/// # Examples
///
/// ```
/// use locale_rs_db::meta::{EntityMeta, FieldKind};
///
/// let meta = EntityMeta::new("posts", "post_translations", "post_id", &["title", "slug"])
///     .fillable(&["title", "slug", "status"]);
///
/// assert_eq!(meta.classify("title"), FieldKind::Translated);
/// assert_eq!(meta.classify("status"), FieldKind::Base);
/// assert_eq!(meta.translation_column("title"), "post_translations.title");
/// assert_eq!(meta.translation_column("status"), "posts.status");
/// ```
#[derive(Debug, Clone)]
pub struct EntityMeta {
    /// The base record table.
    pub table: &'static str,
    /// The translation record table.
    pub translation_table: &'static str,
    /// The foreign-key column on the translation table pointing at the base
    /// record.
    pub foreign_key: &'static str,
    /// The primary-key column of both tables.
    pub pk_column: &'static str,
    /// The declared translatable attribute names, as registered.
    pub translatable: &'static [&'static str],
    /// Attribute names allowed for mass assignment.
    pub fillable: &'static [&'static str],
    /// Whether mass assignment is rejected for anything not in `fillable`.
    pub totally_guarded: bool,
    /// Attribute names excluded from serialization.
    pub hidden: &'static [&'static str],
    translated: HashSet<&'static str>,
}

impl EntityMeta {
    /// Registers an entity type, resolving the attribute classification once.
    pub fn new(
        table: &'static str,
        translation_table: &'static str,
        foreign_key: &'static str,
        translatable: &'static [&'static str],
    ) -> Self {
        Self {
            table,
            translation_table,
            foreign_key,
            pk_column: "id",
            translatable,
            fillable: &[],
            totally_guarded: false,
            hidden: &[],
            translated: translatable.iter().copied().collect(),
        }
    }

    /// Sets the attributes allowed for mass assignment.
    #[must_use]
    pub const fn fillable(mut self, fillable: &'static [&'static str]) -> Self {
        self.fillable = fillable;
        self
    }

    /// Marks the entity as totally guarded: mass assignment of anything not
    /// individually fillable is a violation.
    #[must_use]
    pub const fn totally_guarded(mut self) -> Self {
        self.totally_guarded = true;
        self
    }

    /// Sets the attributes excluded from serialization.
    #[must_use]
    pub const fn hidden(mut self, hidden: &'static [&'static str]) -> Self {
        self.hidden = hidden;
        self
    }

    /// Overrides the primary-key column name (default `id`).
    #[must_use]
    pub const fn pk_column(mut self, pk_column: &'static str) -> Self {
        self.pk_column = pk_column;
        self
    }

    // ── Classification ───────────────────────────────────────────────

    /// Returns where `key` lives for this entity type.
    pub fn classify(&self, key: &str) -> FieldKind {
        if self.translated.contains(key) {
            FieldKind::Translated
        } else {
            FieldKind::Base
        }
    }

    /// Returns whether `key` is a declared translatable attribute.
    pub fn is_translation_attribute(&self, key: &str) -> bool {
        self.translated.contains(key)
    }

    /// Returns whether `key` may be mass-assigned.
    pub fn is_fillable(&self, key: &str) -> bool {
        self.fillable.contains(&key)
    }

    /// Returns whether `key` is excluded from serialization.
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(&key)
    }

    /// Returns the table-qualified column for `key`: the translation table
    /// for translatable attributes, the base table otherwise.
    pub fn translation_column(&self, key: &str) -> String {
        let table = match self.classify(key) {
            FieldKind::Translated => self.translation_table,
            FieldKind::Base => self.table,
        };
        format!("{table}.{key}")
    }
}
