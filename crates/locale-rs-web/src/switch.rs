//! Locale-switch decisions for the request pipeline.
//!
//! The HTTP pipeline itself is an external collaborator; this module is the
//! decision logic it delegates to. [`decide`] is a pure function of the path
//! segments, the request-level resolution signals, and the registry, so the
//! hosting middleware stays a thin adapter: it maps the returned
//! [`SwitchDecision`] onto its own response, session, and cookie handling.

use tracing::debug;

use locale_rs_core::{LocaleRegistry, ResolutionSignals};

/// What the hosting pipeline should do about the request's locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchDecision {
    /// The path is exempt from locale handling; proceed untouched.
    Passthrough,
    /// An explicit `/locale/{code}` switch to a known locale.
    ///
    /// The caller is expected to persist the locale into the session and a
    /// long-lived cookie, then redirect back.
    Switch {
        /// The locale to switch to.
        locale: String,
    },
    /// An explicit switch to an unknown locale: a client-facing
    /// "not found"/invalid-request failure.
    NotFound {
        /// The unknown code the client asked for.
        locale: String,
    },
    /// The resolution chain produced a known locale to activate.
    ///
    /// The caller activates it for the request and persists it into the
    /// session and cookie.
    Activate {
        /// The locale to activate.
        locale: String,
    },
    /// Nothing resolvable; proceed with default behavior.
    NoLocale,
}

/// Decides the locale handling for one request.
///
/// Priority:
/// 1. Ignored paths pass through.
/// 2. An explicit `/locale/{code}` switch wins; an unknown code is a
///    [`SwitchDecision::NotFound`] (the registry itself never errors here).
/// 3. Otherwise the resolution chain (input > session > cookie > app
///    default) picks the locale to activate; an unknown winner yields
///    [`SwitchDecision::NoLocale`].
///
/// # Examples
///
/// ```
/// use locale_rs_core::{LocaleRegistry, LocaleSettings, ResolutionSignals};
/// use locale_rs_web::switch::{decide, SwitchDecision};
///
/// let settings = LocaleSettings::from_toml_str(r#"
///     fallback = "en"
///     [locales]
///     en = "English"
///     fr = "Français"
/// "#).unwrap();
/// let registry = LocaleRegistry::new(settings);
///
/// let decision = decide(&registry, &["locale", "fr"], &ResolutionSignals::default());
/// assert_eq!(decision, SwitchDecision::Switch { locale: "fr".into() });
/// ```
pub fn decide(
    registry: &LocaleRegistry,
    segments: &[&str],
    signals: &ResolutionSignals<'_>,
) -> SwitchDecision {
    if registry.is_ignored(segments) {
        return SwitchDecision::Passthrough;
    }

    if let Some(code) = registry.parse_switch(segments) {
        let decision = if registry.has(code) {
            SwitchDecision::Switch {
                locale: code.to_string(),
            }
        } else {
            SwitchDecision::NotFound {
                locale: code.to_string(),
            }
        };
        debug!(code, ?decision, "explicit locale switch");
        return decision;
    }

    registry.resolve(signals).map_or(SwitchDecision::NoLocale, |locale| {
        SwitchDecision::Activate {
            locale: locale.to_string(),
        }
    })
}
