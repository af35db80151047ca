//! Attribute key parsing.
//!
//! Raw attribute keys address a plain attribute, a locale-specific value, or
//! a locale-specific value with an inline default:
//!
//! - `"title"` — the attribute in the context's current locale
//! - `"title:fr"` — the attribute in `fr`, with fallback allowed
//! - `"title:fr|untitled"` — the attribute in `fr` or the literal default,
//!   with the fallback-locale lookup disabled
//!
//! An explicit default means "this locale or nothing": requesting a specific
//! locale together with a default never resolves through the fallback locale.

use locale_rs_core::LocaleContext;

/// A parsed attribute key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKey<'a> {
    /// The attribute name.
    pub key: &'a str,
    /// The addressed locale (the context's current locale when the raw key
    /// carried none).
    pub locale: &'a str,
    /// The inline default, if one was supplied.
    pub default: Option<&'a str>,
}

impl<'a> AttributeKey<'a> {
    /// Parses `raw` against the given locale context.
    ///
    /// Splits on the first `:`, then the first `|` of the remainder.
    pub fn parse(raw: &'a str, ctx: &'a LocaleContext<'_>) -> Self {
        match raw.split_once(':') {
            Some((key, rest)) => match rest.split_once('|') {
                Some((locale, default)) => Self {
                    key,
                    locale,
                    default: Some(default),
                },
                None => Self {
                    key,
                    locale: rest,
                    default: None,
                },
            },
            None => Self {
                key: raw,
                locale: ctx.current(),
                default: None,
            },
        }
    }

    /// Whether a missing translation may resolve through the fallback locale.
    ///
    /// True exactly when no inline default was supplied.
    pub const fn fallback_allowed(&self) -> bool {
        self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_rs_core::{LocaleRegistry, LocaleSettings};

    fn registry() -> LocaleRegistry {
        let settings = LocaleSettings::from_toml_str(
            r#"
                default = "vi"
                fallback = "en"

                [locales]
                en = "English"
                vi = "Tiếng Việt"
            "#,
        )
        .unwrap();
        LocaleRegistry::new(settings)
    }

    #[test]
    fn test_plain_key_uses_context_locale() {
        let r = registry();
        let ctx = LocaleContext::new(&r, "vi").unwrap();
        let parsed = AttributeKey::parse("title", &ctx);
        assert_eq!(parsed.key, "title");
        assert_eq!(parsed.locale, "vi");
        assert_eq!(parsed.default, None);
        assert!(parsed.fallback_allowed());
    }

    #[test]
    fn test_locale_suffix() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let parsed = AttributeKey::parse("title:en", &ctx);
        assert_eq!(parsed.key, "title");
        assert_eq!(parsed.locale, "en");
        assert!(parsed.fallback_allowed());
    }

    #[test]
    fn test_locale_with_default() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let parsed = AttributeKey::parse("title:en|untitled", &ctx);
        assert_eq!(parsed.key, "title");
        assert_eq!(parsed.locale, "en");
        assert_eq!(parsed.default, Some("untitled"));
        assert!(!parsed.fallback_allowed());
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        // Everything after the first '|' is the default, pipes included.
        let parsed = AttributeKey::parse("title:en|a|b", &ctx);
        assert_eq!(parsed.default, Some("a|b"));
    }

    #[test]
    fn test_empty_default_is_still_a_default() {
        let r = registry();
        let ctx = LocaleContext::default_for(&r);
        let parsed = AttributeKey::parse("title:en|", &ctx);
        assert_eq!(parsed.default, Some(""));
        assert!(!parsed.fallback_allowed());
    }
}
