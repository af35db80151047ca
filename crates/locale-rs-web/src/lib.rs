//! # locale-rs-web
//!
//! Request-facing plumbing around the locale registry:
//!
//! - [`switch`] — pure locale-switch decisions for the hosting HTTP
//!   pipeline (ignore list, explicit `/locale/{code}` switches, and the
//!   resolution chain)
//! - [`rules`] — per-locale expansion of validation rules and labels for
//!   forms editing translatable attributes
//!
//! Neither module owns any HTTP types; the hosting framework adapts the
//! returned decisions and rule maps to its own request/response handling.

pub mod rules;
pub mod switch;

pub use rules::{add_rule, expand_labels, expand_translatable, strip_required, RuleSet};
pub use switch::{decide, SwitchDecision};
