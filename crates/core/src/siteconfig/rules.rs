use std::collections::HashMap;

use url::Url;

/// Per-site extraction override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRule {
    /// Normalised host the rule applies to.
    pub host: String,
    /// Display label.
    pub name: String,
    /// CSS selector for the article elements.
    pub selector: String,
    /// Declared page encoding, if any.
    pub encoding: Option<String>,
}

impl SiteRule {
    /// True when the rule asks for the Latin-1 byte re-pack.
    pub fn is_latin1(&self) -> bool {
        self.encoding.as_deref().is_some_and(|e| e.eq_ignore_ascii_case("ISO-8859-1"))
    }
}

/// Site rules keyed by normalised host.
#[derive(Debug, Clone, Default)]
pub struct SiteRules {
    rules: HashMap<String, SiteRule>,
}

impl SiteRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for its host.
    pub fn insert(&mut self, mut rule: SiteRule) {
        rule.host = normalize_host(&rule.host);
        self.rules.insert(rule.host.clone(), rule);
    }

    /// Rule for `host`, which may carry a `www.` prefix, a port or a scheme.
    pub fn get(&self, host: &str) -> Option<&SiteRule> {
        self.rules.get(&normalize_host(host))
    }

    pub fn contains(&self, host: &str) -> bool {
        self.get(host).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteRule> {
        self.rules.values()
    }
}

/// Lowercases a host and strips a leading `www.`.
///
/// Full URLs are reduced to their host first.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = if host.contains("://") {
        Url::parse(host)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| host.to_string())
    } else {
        host.split(['/', ':']).next().unwrap_or_default().to_string()
    };

    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
