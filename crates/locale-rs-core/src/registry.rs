//! The locale registry and resolution chain.
//!
//! [`LocaleRegistry`] is the static catalog of known locales built from
//! validated [`LocaleSettings`]. It is pure lookup: nothing mutates it after
//! construction, so it can be shared freely and queried any number of times
//! per request.
//!
//! Resolution of the "current" locale is a pure function of the request
//! signals plus registry state. The priority chain is: explicit input, then
//! session value, then cookie value, then the application default. The first
//! non-empty candidate wins; if the winner is not in the catalog the result
//! is `None` and the caller decides what to do (the registry never silently
//! substitutes the fallback).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::settings::LocaleSettings;

/// The path segment that marks an explicit locale switch (`/locale/{code}`).
const SWITCH_SEGMENT: &str = "locale";

/// Request-level candidates feeding the resolution chain.
///
/// All fields are optional; empty strings are treated the same as absent.
#[derive(Debug, Clone, Default)]
pub struct ResolutionSignals<'a> {
    /// An explicit locale supplied with the request (query/form input).
    pub input: Option<&'a str>,
    /// The locale persisted in the caller's session.
    pub session: Option<&'a str>,
    /// The locale persisted in a long-lived cookie.
    pub cookie: Option<&'a str>,
}

/// A snapshot of the catalog plus the active default, for template contexts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocaleSummary {
    /// All known locales, code to title.
    pub locales: BTreeMap<String, String>,
    /// The locale considered active by default.
    pub active_locale: String,
}

/// Static catalog of known locales with fallback and auxiliary metadata.
///
/// # Examples
///
/// ```
/// use locale_rs_core::registry::LocaleRegistry;
/// use locale_rs_core::settings::LocaleSettings;
///
/// let settings = LocaleSettings::from_toml_str(r#"
///     fallback = "en"
///     [locales]
///     en = "English"
///     fr = "Français"
/// "#).unwrap();
/// let registry = LocaleRegistry::new(settings);
///
/// assert!(registry.has("fr"));
/// assert_eq!(registry.fallback(), "en");
/// assert_eq!(registry.title("fr"), Some("Français"));
/// ```
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    settings: LocaleSettings,
}

impl LocaleRegistry {
    /// Builds a registry from validated settings.
    ///
    /// Settings constructed through [`LocaleSettings::from_toml_str`] are
    /// already validated; hand-built settings should be passed through
    /// [`LocaleSettings::validate`] first.
    pub const fn new(settings: LocaleSettings) -> Self {
        Self { settings }
    }

    // ── Catalog lookup ───────────────────────────────────────────────

    /// Returns all known locale codes, in stable (sorted) order.
    pub fn codes(&self) -> Vec<&str> {
        self.settings.locales.keys().map(String::as_str).collect()
    }

    /// Returns the full catalog, code to title.
    pub const fn all(&self) -> &BTreeMap<String, String> {
        &self.settings.locales
    }

    /// Returns whether `code` is a known locale.
    pub fn has(&self, code: &str) -> bool {
        self.settings.locales.contains_key(code)
    }

    /// Returns the designated fallback locale code.
    pub fn fallback(&self) -> &str {
        &self.settings.fallback
    }

    /// Returns the application default locale code.
    pub fn default_locale(&self) -> &str {
        &self.settings.default
    }

    /// Returns the display title for `code`, if known.
    pub fn title(&self, code: &str) -> Option<&str> {
        self.settings.locales.get(code).map(String::as_str)
    }

    /// Returns the CSS class configured for `code`, if any.
    pub fn css_class(&self, code: &str) -> Option<&str> {
        self.settings.css.get(code).map(String::as_str)
    }

    /// Returns the catalog plus active default, for template contexts.
    pub fn summary(&self) -> LocaleSummary {
        LocaleSummary {
            locales: self.settings.locales.clone(),
            active_locale: self.settings.default.clone(),
        }
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// Returns `explicit` if non-empty, else the application default.
    ///
    /// This is the implicit-locale rule used by attribute keys without a
    /// `:locale` suffix. No catalog check is performed here; callers that
    /// need validation use [`Self::has`] or [`Self::resolve`].
    pub fn effective_locale<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        match explicit {
            Some(code) if !code.is_empty() => code,
            _ => self.default_locale(),
        }
    }

    /// Resolves the current locale from prioritized request signals.
    ///
    /// Priority: input > session > cookie > application default. The first
    /// non-empty candidate is the winner; the winner is returned only if it
    /// is a known locale, otherwise `None`. The caller decides fallback
    /// behavior for an unknown winner.
    pub fn resolve(&self, signals: &ResolutionSignals<'_>) -> Option<&str> {
        let winner = [signals.input, signals.session, signals.cookie]
            .into_iter()
            .flatten()
            .find(|c| !c.is_empty())
            .unwrap_or_else(|| self.default_locale());

        trace!(candidate = winner, known = self.has(winner), "locale resolution");
        if self.has(winner) {
            self.settings.locales.get_key_value(winner).map(|(k, _)| k.as_str())
        } else {
            None
        }
    }

    // ── Path handling ────────────────────────────────────────────────

    /// Returns whether locale handling should be skipped for this path.
    ///
    /// True when the first segment is in the configured ignore list.
    pub fn is_ignored(&self, segments: &[&str]) -> bool {
        segments
            .first()
            .is_some_and(|first| self.settings.ignored.iter().any(|s| s == first))
    }

    /// Extracts the target of an explicit locale-switch path.
    ///
    /// Recognizes exactly the two-segment form `/locale/{code}` and returns
    /// the code (which may be unknown; the caller checks [`Self::has`]).
    pub fn parse_switch<'a>(&self, segments: &[&'a str]) -> Option<&'a str> {
        match segments {
            [first, code] if *first == SWITCH_SEGMENT => Some(code),
            _ => None,
        }
    }
}
