use crate::error::{ReadabilityError, Result};
use crate::siteconfig::parser::SiteRulesParser;
use crate::siteconfig::rules::SiteRules;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the per-user rule file.
pub const DEFAULT_RULES_FILE: &str = "special_rules.txt";

/// Loads site rule files and caches them per path.
#[derive(Debug, Clone, Default)]
pub struct SiteRulesLoader {
    cache: HashMap<PathBuf, Arc<SiteRules>>,
}

impl SiteRulesLoader {
    /// Create a new loader with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the rules named by `path`, or the per-user default.
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// rule set.
    pub fn load(&mut self, path: Option<&Path>) -> Result<Arc<SiteRules>> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ReadabilityError::FileNotFound(path.to_path_buf()));
                }
                self.load_file(path)
            }
            None => match default_rules_path() {
                Some(path) if path.exists() => self.load_file(&path),
                _ => Ok(Arc::new(SiteRules::new())),
            },
        }
    }

    /// Parse a rule file, reusing the cached copy when present.
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<SiteRules>> {
        if let Some(rules) = self.cache.get(path) {
            return Ok(Arc::clone(rules));
        }

        let rules = Arc::new(SiteRulesParser::parse_file(path)?);
        self.cache.insert(path.to_path_buf(), Arc::clone(&rules));
        Ok(rules)
    }

    /// Clear the rule cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Default rule file location (`<config dir>/readability/special_rules.txt`).
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("readability").join(DEFAULT_RULES_FILE))
}
