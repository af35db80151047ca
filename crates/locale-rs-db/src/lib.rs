//! # locale-rs-db
//!
//! The localized-attribute overlay: persistent records carry per-locale
//! variants of a declared subset of their attributes, while everything else
//! is stored once on the base record.
//!
//! - [`meta`] — static entity-type metadata with base/translated attribute
//!   classification resolved at registration
//! - [`overlay`] — the [`TranslatableRecord`] runtime: attribute routing,
//!   fallback resolution, mass assignment, and save orchestration
//! - [`translation`] — per-locale [`TranslationRecord`]s
//! - [`attributes`] — attribute bags with dirty tracking
//! - [`storage`] — the persistence interface and an in-memory implementation
//! - [`query`] — locale-aware EXISTS predicates over the translation table
//! - [`value`] — the backend-agnostic attribute [`Value`]
//!
//! [`TranslatableRecord`]: overlay::TranslatableRecord
//! [`TranslationRecord`]: translation::TranslationRecord
//! [`Value`]: value::Value
//!
//! ## Quick start
//!
//! ```
//! use std::sync::LazyLock;
//! use locale_rs_core::{LocaleContext, LocaleRegistry, LocaleSettings};
//! use locale_rs_db::prelude::*;
//!
//! static PAGE: LazyLock<EntityMeta> = LazyLock::new(|| {
//!     EntityMeta::new("pages", "page_translations", "page_id", &["title"])
//! });
//!
//! let settings = LocaleSettings::from_toml_str(r#"
//!     fallback = "en"
//!     [locales]
//!     en = "English"
//!     vi = "Tiếng Việt"
//! "#).unwrap();
//! let registry = LocaleRegistry::new(settings);
//! let ctx = LocaleContext::new(&registry, "vi").unwrap();
//!
//! let mut page = TranslatableRecord::new(&PAGE);
//! page.set("title", "Xin chào", &ctx).unwrap();
//! page.set("title:en", "Hello", &ctx).unwrap();
//!
//! let mut storage = MemoryStorage::new();
//! let outcome = page.save(&mut storage).unwrap();
//! assert_eq!(outcome.translations_written.len(), 2);
//! ```

pub mod attributes;
pub mod key;
pub mod meta;
pub mod overlay;
pub mod query;
pub mod storage;
pub mod translation;
pub mod value;

pub use attributes::AttributeBag;
pub use key::AttributeKey;
pub use meta::{EntityMeta, FieldKind};
pub use overlay::{SaveOutcome, TranslatableRecord};
pub use query::{CompareOp, TranslationExists};
pub use storage::{MemoryStorage, Storage, StoredTranslation};
pub use translation::TranslationRecord;
pub use value::Value;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::attributes::AttributeBag;
    pub use crate::key::AttributeKey;
    pub use crate::meta::{EntityMeta, FieldKind};
    pub use crate::overlay::{SaveOutcome, TranslatableRecord};
    pub use crate::query::{CompareOp, TranslationExists};
    pub use crate::storage::{MemoryStorage, Storage, StoredTranslation};
    pub use crate::translation::TranslationRecord;
    pub use crate::value::Value;
}
