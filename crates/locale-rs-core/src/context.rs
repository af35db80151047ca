//! Explicit locale context for a unit of work.
//!
//! Rather than reading the "current" locale from ambient global state, the
//! overlay takes a [`LocaleContext`] constructed once per request (typically
//! from [`LocaleRegistry::resolve`]) and threaded down explicitly. This keeps
//! attribute resolution a pure function of its inputs.
//!
//! [`LocaleRegistry::resolve`]: crate::registry::LocaleRegistry::resolve

use crate::error::{LocaleError, LocaleResult};
use crate::registry::LocaleRegistry;

/// The resolved locale for one unit of work, bound to its registry.
///
/// # Examples
///
/// ```
/// use locale_rs_core::context::LocaleContext;
/// use locale_rs_core::registry::LocaleRegistry;
/// use locale_rs_core::settings::LocaleSettings;
///
/// let settings = LocaleSettings::from_toml_str(r#"
///     fallback = "en"
///     [locales]
///     en = "English"
///     vi = "Tiếng Việt"
/// "#).unwrap();
/// let registry = LocaleRegistry::new(settings);
///
/// let ctx = LocaleContext::new(&registry, "vi").unwrap();
/// assert_eq!(ctx.current(), "vi");
/// assert_eq!(ctx.fallback(), "en");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleContext<'r> {
    registry: &'r LocaleRegistry,
    current: String,
}

impl<'r> LocaleContext<'r> {
    /// Creates a context for `locale`, which must be in the catalog.
    pub fn new(registry: &'r LocaleRegistry, locale: impl Into<String>) -> LocaleResult<Self> {
        let current = locale.into();
        if !registry.has(&current) {
            return Err(LocaleError::UnknownLocale(current));
        }
        Ok(Self { registry, current })
    }

    /// Creates a context using the application default locale.
    pub fn default_for(registry: &'r LocaleRegistry) -> Self {
        Self {
            current: registry.default_locale().to_string(),
            registry,
        }
    }

    /// The locale this unit of work operates in.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// The registry's designated fallback locale.
    pub fn fallback(&self) -> &str {
        self.registry.fallback()
    }

    /// The registry this context was resolved against.
    pub const fn registry(&self) -> &'r LocaleRegistry {
        self.registry
    }
}
