//! Locale-aware query predicates.
//!
//! These are read-only convenience predicates that restrict base records by
//! properties of their translation records. They compile to an EXISTS
//! subquery over the translation table with positional parameters; executing
//! the resulting SQL is the storage collaborator's business.

use std::fmt::Write;

use locale_rs_core::LocaleContext;

use crate::meta::EntityMeta;
use crate::value::Value;

/// The comparison operators supported by translation filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Exact match (`=`).
    Eq,
    /// Pattern match (`LIKE`).
    Like,
}

impl CompareOp {
    /// The SQL operator token.
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
        }
    }
}

/// An EXISTS predicate over an entity's translation table.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use locale_rs_db::meta::EntityMeta;
/// use locale_rs_db::query::{CompareOp, TranslationExists};
/// use locale_rs_db::value::Value;
///
/// static POST: LazyLock<EntityMeta> = LazyLock::new(|| {
///     EntityMeta::new("posts", "post_translations", "post_id", &["title"])
/// });
///
/// let (sql, params) = TranslationExists::column(&POST, "title", CompareOp::Eq, "Hello")
///     .locale("en")
///     .to_sql();
/// assert!(sql.starts_with("EXISTS (SELECT 1 FROM \"post_translations\""));
/// assert_eq!(params, vec![Value::from("Hello"), Value::from("en")]);
/// ```
#[derive(Debug, Clone)]
pub struct TranslationExists {
    meta: &'static EntityMeta,
    column: Option<(String, CompareOp, Value)>,
    locale: Option<String>,
}

impl TranslationExists {
    /// Filter-by-translation-field: base records having a translation whose
    /// `key` compares to `value` under `op`, in any locale unless one is
    /// added with [`Self::locale`].
    pub fn column(
        meta: &'static EntityMeta,
        key: impl Into<String>,
        op: CompareOp,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            meta,
            column: Some((key.into(), op, value.into())),
            locale: None,
        }
    }

    /// Filter-by-locale-presence: base records having a translation record
    /// for `locale`.
    pub fn in_locale(meta: &'static EntityMeta, locale: impl Into<String>) -> Self {
        Self {
            meta,
            column: None,
            locale: Some(locale.into()),
        }
    }

    /// Filter-by-locale-presence for the context's current locale.
    pub fn in_current_locale(meta: &'static EntityMeta, ctx: &LocaleContext<'_>) -> Self {
        Self::in_locale(meta, ctx.current())
    }

    /// Additionally restricts the predicate to one locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Compiles the predicate to SQL with positional parameters.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let tt = self.meta.translation_table;
        let mut sql = format!(
            "EXISTS (SELECT 1 FROM \"{tt}\" WHERE \"{tt}\".\"{fk}\" = \"{t}\".\"{pk}\"",
            fk = self.meta.foreign_key,
            t = self.meta.table,
            pk = self.meta.pk_column,
        );
        let mut params = Vec::new();

        if let Some((key, op, value)) = &self.column {
            let _ = write!(sql, " AND \"{tt}\".\"{key}\" {} ?", op.sql());
            params.push(value.clone());
        }
        if let Some(locale) = &self.locale {
            let _ = write!(sql, " AND \"{tt}\".\"locale\" = ?");
            params.push(Value::from(locale.as_str()));
        }
        sql.push(')');
        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static POST: LazyLock<EntityMeta> = LazyLock::new(|| {
        EntityMeta::new("posts", "post_translations", "post_id", &["title", "body"])
    });

    #[test]
    fn test_where_translation_any_locale() {
        let (sql, params) =
            TranslationExists::column(&POST, "title", CompareOp::Eq, "Hello").to_sql();
        assert_eq!(
            sql,
            "EXISTS (SELECT 1 FROM \"post_translations\" \
             WHERE \"post_translations\".\"post_id\" = \"posts\".\"id\" \
             AND \"post_translations\".\"title\" = ?)"
        );
        assert_eq!(params, vec![Value::from("Hello")]);
    }

    #[test]
    fn test_where_translation_with_locale() {
        let (sql, params) = TranslationExists::column(&POST, "title", CompareOp::Like, "He%")
            .locale("en")
            .to_sql();
        assert!(sql.contains("\"post_translations\".\"title\" LIKE ?"));
        assert!(sql.ends_with("\"post_translations\".\"locale\" = ?)"));
        assert_eq!(params, vec![Value::from("He%"), Value::from("en")]);
    }

    #[test]
    fn test_translated_in() {
        let (sql, params) = TranslationExists::in_locale(&POST, "fr").to_sql();
        assert_eq!(
            sql,
            "EXISTS (SELECT 1 FROM \"post_translations\" \
             WHERE \"post_translations\".\"post_id\" = \"posts\".\"id\" \
             AND \"post_translations\".\"locale\" = ?)"
        );
        assert_eq!(params, vec![Value::from("fr")]);
    }

    #[test]
    fn test_translated_in_current_locale() {
        use locale_rs_core::{LocaleContext, LocaleRegistry, LocaleSettings};

        let settings = LocaleSettings::from_toml_str(
            r#"
                fallback = "en"
                [locales]
                en = "English"
                fr = "Français"
            "#,
        )
        .unwrap();
        let registry = LocaleRegistry::new(settings);
        let ctx = LocaleContext::new(&registry, "fr").unwrap();

        let (_, params) = TranslationExists::in_current_locale(&POST, &ctx).to_sql();
        assert_eq!(params, vec![Value::from("fr")]);
    }

    #[test]
    fn test_compare_op_sql() {
        assert_eq!(CompareOp::Eq.sql(), "=");
        assert_eq!(CompareOp::Like.sql(), "LIKE");
    }
}
