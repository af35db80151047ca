//! # locale-rs
//!
//! Per-locale attribute overlays for persistent records.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. Depend on `locale-rs` to get the whole stack, or on individual
//! crates for finer-grained control.
//!
//! ```
//! use std::sync::LazyLock;
//! use locale_rs::core::{LocaleContext, LocaleRegistry, LocaleSettings};
//! use locale_rs::db::prelude::*;
//!
//! static PAGE: LazyLock<EntityMeta> = LazyLock::new(|| {
//!     EntityMeta::new("pages", "page_translations", "page_id", &["title"])
//! });
//!
//! let settings = LocaleSettings::from_toml_str(r#"
//!     fallback = "en"
//!     [locales]
//!     en = "English"
//!     fr = "Français"
//! "#).unwrap();
//! let registry = LocaleRegistry::new(settings);
//! let ctx = LocaleContext::new(&registry, "fr").unwrap();
//!
//! let mut page = TranslatableRecord::new(&PAGE);
//! page.set("title", "Bonjour", &ctx).unwrap();
//! assert_eq!(page.get("title", &ctx).unwrap(), Some(Value::from("Bonjour")));
//! // No English variant yet: an explicit default sidesteps the fallback.
//! assert_eq!(page.get("title:en|draft", &ctx).unwrap(), Some(Value::from("draft")));
//! ```

/// Locale catalog, registry, resolver, context, and error types.
pub use locale_rs_core as core;

/// Translatable records: attribute routing, fallback, save orchestration.
#[cfg(feature = "db")]
pub use locale_rs_db as db;

/// Model lifecycle signal dispatcher.
#[cfg(feature = "signals")]
pub use locale_rs_signals as signals;

/// Locale-switch decisions and validation-rule expansion.
#[cfg(feature = "web")]
pub use locale_rs_web as web;
