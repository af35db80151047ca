//! Locale catalog settings.
//!
//! This module provides [`LocaleSettings`], the deserializable description of
//! the application's locale catalog: the closed set of known locales with
//! their display titles, the designated fallback, the application default,
//! path segments exempt from locale handling, and optional per-locale CSS
//! classes for rendering locale switchers.
//!
//! Settings are loaded once at startup (typically from TOML) and then turned
//! into a [`crate::registry::LocaleRegistry`], which is the read-only view
//! the rest of the system consumes.
//!
//! # Examples
//!
//! ```
//! use locale_rs_core::settings::LocaleSettings;
//!
//! let settings = LocaleSettings::from_toml_str(r#"
//!     default = "en"
//!     fallback = "en"
//!     ignored = ["api", "assets"]
//!
//!     [locales]
//!     en = "English"
//!     vi = "Tiếng Việt"
//!
//!     [css]
//!     en = "flag-en"
//!     vi = "flag-vi"
//! "#).unwrap();
//! assert_eq!(settings.fallback, "en");
//! assert!(settings.locales.contains_key("vi"));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LocaleError, LocaleResult};

/// The locale catalog configuration.
///
/// The set of locales is closed: only codes present in [`locales`] are ever
/// considered known. A `BTreeMap` keeps listing order stable without
/// depending on file order.
///
/// [`locales`]: LocaleSettings::locales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// All known locales, keyed by code, with human-readable titles.
    pub locales: BTreeMap<String, String>,

    /// The designated fallback locale code. Must be a key of `locales`.
    pub fallback: String,

    /// The application default locale, used when no request-level signal
    /// resolves. Must be a key of `locales`. Defaults to `fallback` when
    /// omitted.
    #[serde(default)]
    pub default: String,

    /// Leading path segments for which locale handling is skipped entirely.
    #[serde(default)]
    pub ignored: Vec<String>,

    /// Optional per-locale CSS class names (e.g. flag sprites).
    #[serde(default)]
    pub css: BTreeMap<String, String>,
}

impl LocaleSettings {
    /// Parses settings from a TOML string and validates them.
    pub fn from_toml_str(raw: &str) -> LocaleResult<Self> {
        let mut settings: Self = toml::from_str(raw)
            .map_err(|e| LocaleError::ImproperlyConfigured(format!("invalid locale TOML: {e}")))?;
        if settings.default.is_empty() {
            settings.default = settings.fallback.clone();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> LocaleResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Checks internal consistency of the catalog.
    ///
    /// The catalog must be non-empty, and both `fallback` and `default` must
    /// name known locales. Violations are
    /// [`LocaleError::ImproperlyConfigured`].
    pub fn validate(&self) -> LocaleResult<()> {
        if self.locales.is_empty() {
            return Err(LocaleError::ImproperlyConfigured(
                "locale catalog is empty".into(),
            ));
        }
        if !self.locales.contains_key(&self.fallback) {
            return Err(LocaleError::ImproperlyConfigured(format!(
                "fallback locale '{}' is not in the catalog",
                self.fallback
            )));
        }
        if !self.locales.contains_key(&self.default) {
            return Err(LocaleError::ImproperlyConfigured(format!(
                "default locale '{}' is not in the catalog",
                self.default
            )));
        }
        Ok(())
    }
}
