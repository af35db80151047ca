//! Multi-locale validation-rule expansion.
//!
//! Forms that edit translatable attributes submit one value per locale under
//! keys like `en.title`, `vi.title`. This module rewrites a single-attribute
//! rule set into its per-locale expansion: every known locale gets a rule,
//! but only the fallback locale keeps a `required` constraint — the other
//! locales may legitimately be left blank and resolve through the fallback.
//!
//! Rules use the pipe-delimited string format (`"required|max:255"`).

use std::collections::BTreeMap;

use locale_rs_core::LocaleRegistry;

/// A map of attribute name to pipe-delimited rule string.
pub type RuleSet = BTreeMap<String, String>;

/// Removes the `required` constraint from a pipe-delimited rule string.
///
/// Only the bare `required` token is stripped; parameterized constraints
/// like `required_if:...` are left alone.
pub fn strip_required(rule: &str) -> String {
    rule.split('|')
        .filter(|token| *token != "required" && !token.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

/// Expands the rules of translatable attributes into per-locale rules.
///
/// For each attribute in `translatable` with a rule, the attribute's entry
/// is replaced by one `"{locale}.{attribute}"` entry per known locale: the
/// fallback locale keeps the rule unchanged, every other locale gets it with
/// `required` stripped. Non-translatable entries pass through untouched.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use locale_rs_core::{LocaleRegistry, LocaleSettings};
/// use locale_rs_web::rules::expand_translatable;
///
/// let settings = LocaleSettings::from_toml_str(r#"
///     fallback = "en"
///     [locales]
///     en = "English"
///     vi = "Tiếng Việt"
/// "#).unwrap();
/// let registry = LocaleRegistry::new(settings);
///
/// let mut rules = BTreeMap::new();
/// rules.insert("name".to_string(), "required|max:255".to_string());
/// rules.insert("status".to_string(), "required".to_string());
///
/// let expanded = expand_translatable(&rules, &["name"], &registry);
/// assert_eq!(expanded.get("en.name").unwrap(), "required|max:255");
/// assert_eq!(expanded.get("vi.name").unwrap(), "max:255");
/// assert_eq!(expanded.get("status").unwrap(), "required");
/// assert!(!expanded.contains_key("name"));
/// ```
pub fn expand_translatable(
    rules: &RuleSet,
    translatable: &[&str],
    registry: &LocaleRegistry,
) -> RuleSet {
    let fallback = registry.fallback();
    let mut expanded = RuleSet::new();

    for (attribute, rule) in rules {
        if !translatable.contains(&attribute.as_str()) {
            expanded.insert(attribute.clone(), rule.clone());
            continue;
        }
        let relaxed = strip_required(rule);
        for locale in registry.codes() {
            let value = if locale == fallback {
                rule.clone()
            } else {
                relaxed.clone()
            };
            expanded.insert(format!("{locale}.{attribute}"), value);
        }
    }
    expanded
}

/// Expands display labels of translatable attributes into per-locale keys.
///
/// Each translatable attribute's label is duplicated under
/// `"{locale}.{attribute}"` for every known locale and the original entry is
/// removed, so validation messages name the right form field.
pub fn expand_labels(
    labels: &BTreeMap<String, String>,
    translatable: &[&str],
    registry: &LocaleRegistry,
) -> BTreeMap<String, String> {
    let mut expanded = BTreeMap::new();
    for (attribute, label) in labels {
        if !translatable.contains(&attribute.as_str()) {
            expanded.insert(attribute.clone(), label.clone());
            continue;
        }
        for locale in registry.codes() {
            expanded.insert(format!("{locale}.{attribute}"), label.clone());
        }
    }
    expanded
}

/// Appends `rule` to every locale's expanded entry for `attribute`.
///
/// No-op for attributes not declared translatable. Entries missing for a
/// locale are created with just `rule`.
pub fn add_rule(
    rules: &mut RuleSet,
    attribute: &str,
    rule: &str,
    translatable: &[&str],
    registry: &LocaleRegistry,
) {
    if !translatable.contains(&attribute) {
        return;
    }
    for locale in registry.codes() {
        let key = format!("{locale}.{attribute}");
        match rules.get_mut(&key) {
            Some(existing) => {
                existing.push('|');
                existing.push_str(rule);
            }
            None => {
                rules.insert(key, rule.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_rs_core::LocaleSettings;

    fn registry() -> LocaleRegistry {
        let settings = LocaleSettings::from_toml_str(
            r#"
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
    fn test_strip_required() {
        assert_eq!(strip_required("required|max:255"), "max:255");
        assert_eq!(strip_required("required"), "");
        assert_eq!(strip_required("max:255|required|min:3"), "max:255|min:3");
        // Parameterized constraints survive.
        assert_eq!(
            strip_required("required_if:status,live|max:10"),
            "required_if:status,live|max:10"
        );
    }

    #[test]
    fn test_expand_keeps_required_on_fallback_only() {
        let r = registry();
        let mut rules = RuleSet::new();
        rules.insert("name".to_string(), "required|max:255".to_string());

        let expanded = expand_translatable(&rules, &["name"], &r);
        assert_eq!(expanded.get("en.name").map(String::as_str), Some("required|max:255"));
        assert_eq!(expanded.get("vi.name").map(String::as_str), Some("max:255"));
        assert!(!expanded.contains_key("name"));
    }

    #[test]
    fn test_expand_passes_plain_attributes_through() {
        let r = registry();
        let mut rules = RuleSet::new();
        rules.insert("status".to_string(), "required".to_string());

        let expanded = expand_translatable(&rules, &["name"], &r);
        assert_eq!(expanded.get("status").map(String::as_str), Some("required"));
        assert_eq!(expanded.len(), 1);
    }

    #[test]
    fn test_expand_rule_that_is_only_required() {
        let r = registry();
        let mut rules = RuleSet::new();
        rules.insert("name".to_string(), "required".to_string());

        let expanded = expand_translatable(&rules, &["name"], &r);
        assert_eq!(expanded.get("en.name").map(String::as_str), Some("required"));
        assert_eq!(expanded.get("vi.name").map(String::as_str), Some(""));
    }

    #[test]
    fn test_expand_labels() {
        let r = registry();
        let mut labels = BTreeMap::new();
        labels.insert("name".to_string(), "Name".to_string());
        labels.insert("status".to_string(), "Status".to_string());

        let expanded = expand_labels(&labels, &["name"], &r);
        assert_eq!(expanded.get("en.name").map(String::as_str), Some("Name"));
        assert_eq!(expanded.get("vi.name").map(String::as_str), Some("Name"));
        assert_eq!(expanded.get("status").map(String::as_str), Some("Status"));
        assert!(!expanded.contains_key("name"));
    }

    #[test]
    fn test_add_rule_appends_or_creates() {
        let r = registry();
        let mut rules = RuleSet::new();
        rules.insert("en.slug".to_string(), "max:64".to_string());

        add_rule(&mut rules, "slug", "alpha_dash", &["slug"], &r);
        assert_eq!(rules.get("en.slug").map(String::as_str), Some("max:64|alpha_dash"));
        assert_eq!(rules.get("vi.slug").map(String::as_str), Some("alpha_dash"));
    }

    #[test]
    fn test_add_rule_ignores_non_translatable() {
        let r = registry();
        let mut rules = RuleSet::new();
        add_rule(&mut rules, "status", "required", &["name"], &r);
        assert!(rules.is_empty());
    }
}
