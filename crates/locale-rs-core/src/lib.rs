//! # locale-rs-core
//!
//! Foundation types for locale-rs: the locale catalog ([`settings`]), the
//! read-only registry with fallback and resolution ([`registry`]), the
//! explicit per-request locale context ([`context`]), the shared error
//! type ([`error`]), and the tracing subscriber setup ([`logging`]).
//!
//! The registry answers "which locales exist, which one falls back, which
//! one is current"; everything record-related lives in `locale-rs-db`.
//!
//! ## Quick start
//!
//! ```
//! use locale_rs_core::prelude::*;
//!
//! let settings = LocaleSettings::from_toml_str(r#"
//!     fallback = "en"
//!     [locales]
//!     en = "English"
//!     fr = "Français"
//! "#).unwrap();
//! let registry = LocaleRegistry::new(settings);
//!
//! // Resolve the current locale from request signals.
//! let current = registry.resolve(&ResolutionSignals {
//!     input: None,
//!     session: Some("fr"),
//!     cookie: None,
//! });
//! assert_eq!(current, Some("fr"));
//!
//! let ctx = LocaleContext::new(&registry, "fr").unwrap();
//! assert_eq!(ctx.fallback(), "en");
//! ```

pub mod context;
pub mod error;
pub mod logging;
pub mod registry;
pub mod settings;

pub use context::LocaleContext;
pub use error::{LocaleError, LocaleResult};
pub use registry::{LocaleRegistry, LocaleSummary, ResolutionSignals};
pub use settings::LocaleSettings;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::context::LocaleContext;
    pub use crate::error::{LocaleError, LocaleResult};
    pub use crate::registry::{LocaleRegistry, LocaleSummary, ResolutionSignals};
    pub use crate::settings::LocaleSettings;
}
