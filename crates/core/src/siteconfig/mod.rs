//! Per-site extraction overrides.
//!
//! A rule maps a host (leading `www.` ignored) to a CSS selector whose matches
//! replace the generic heuristic for that site.

pub mod directives;
pub mod loader;
pub mod parser;
pub mod rules;

pub use directives::Directive;
pub use loader::{DEFAULT_RULES_FILE, SiteRulesLoader, default_rules_path};
pub use parser::SiteRulesParser;
pub use rules::{SiteRule, SiteRules, normalize_host};
