//! Core error types for locale-rs.
//!
//! This module provides the [`LocaleError`] enum covering configuration
//! errors, mass-assignment violations, and storage failures surfaced by the
//! translatable overlay. All failures are synchronous returns; no layer in
//! locale-rs retries.

use thiserror::Error;

/// The primary error type for locale-rs.
///
/// Note that a missing translation is *not* an error anywhere in this crate
/// family: reads resolve to the caller-supplied default (possibly nothing),
/// and the resolver returns `None` for an unknown winning candidate rather
/// than failing.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// A locale code was used that is not part of the configured catalog.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// An attribute was set through mass assignment under a totally-guarded
    /// policy without being individually fillable.
    ///
    /// `key` is the offending top-level key of the input map: the locale code
    /// when a translatable attribute was rejected, or the attribute name
    /// itself for a base attribute.
    #[error("Mass assignment violation for key '{key}' (attribute '{attribute}')")]
    MassAssignment {
        /// The top-level key of the rejected input.
        key: String,
        /// The attribute that was not fillable.
        attribute: String,
    },

    /// The locale catalog is missing, empty, or internally inconsistent.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A record's translations were accessed before being loaded.
    #[error("Translations have not been loaded for this record")]
    TranslationsNotLoaded,

    /// The storage collaborator reported a persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred (e.g. while reading a settings file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, LocaleError>`.
pub type LocaleResult<T> = Result<T, LocaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_display() {
        let err = LocaleError::UnknownLocale("xx".into());
        assert_eq!(err.to_string(), "Unknown locale: xx");
    }

    #[test]
    fn test_mass_assignment_names_locale() {
        let err = LocaleError::MassAssignment {
            key: "en".into(),
            attribute: "secret".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'en'"));
        assert!(msg.contains("'secret'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing settings");
        let err: LocaleError = io_err.into();
        assert!(err.to_string().contains("missing settings"));
    }
}
