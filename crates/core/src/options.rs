//! Extraction options.
//!
//! # Example
//!
//! ```rust
//! use readability_core::ReadabilityOptions;
//!
//! let options = ReadabilityOptions::builder()
//!     .min_text_length(0)
//!     .retry_length(1)
//!     .tags(["div", "p", "a"])
//!     .attributes(["href"])
//!     .build();
//! assert!(options.is_allowed_tag("a"));
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

/// Configuration record consulted by every pipeline stage.
#[derive(Debug, Clone)]
pub struct ReadabilityOptions {
    /// Paragraphs shorter than this are ignored when scoring (default: 25).
    ///
    /// Also the floor for the text length of conditionally cleaned containers.
    pub min_text_length: usize,

    /// Assembled articles shorter than this trigger one retry without
    /// unlikely-candidate pruning (default: 250).
    pub retry_length: usize,

    /// Tags kept by the whitelist pass (default: `div`, `p`).
    pub tags: HashSet<String>,

    /// Attributes kept on whitelisted tags (default: none).
    pub attributes: HashSet<String>,

    /// Site rule file; falls back to the per-user default when unset.
    pub exceptions_file: Option<PathBuf>,

    /// Emit trace events on the `readability` target.
    pub debug: bool,
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            min_text_length: 25,
            retry_length: 250,
            tags: ["div", "p"].into_iter().map(String::from).collect(),
            attributes: HashSet::new(),
            exceptions_file: None,
            debug: false,
        }
    }
}

impl ReadabilityOptions {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> ReadabilityOptionsBuilder {
        ReadabilityOptionsBuilder::new()
    }

    pub fn is_allowed_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_allowed_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }
}

/// Builder for ReadabilityOptions.
#[derive(Debug, Default)]
pub struct ReadabilityOptionsBuilder {
    options: ReadabilityOptions,
}

impl ReadabilityOptionsBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { options: ReadabilityOptions::default() }
    }

    /// Sets the minimum paragraph length considered by the scorer.
    pub fn min_text_length(mut self, value: usize) -> Self {
        self.options.min_text_length = value;
        self
    }

    /// Sets the length below which the retry pass runs.
    pub fn retry_length(mut self, value: usize) -> Self {
        self.options.retry_length = value;
        self
    }

    /// Replaces the tag whitelist. Names are lowercased.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.tags = normalize_names(tags);
        self
    }

    /// Replaces the preserved attribute set. Names are lowercased.
    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.attributes = normalize_names(attributes);
        self
    }

    /// Sets the site rule file.
    pub fn exceptions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.exceptions_file = Some(path.into());
        self
    }

    /// Enables trace logging.
    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    /// Builds the options.
    pub fn build(self) -> ReadabilityOptions {
        self.options
    }
}

fn normalize_names<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_ascii_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReadabilityOptions::default();
        assert_eq!(options.min_text_length, 25);
        assert_eq!(options.retry_length, 250);
        assert!(options.is_allowed_tag("div"));
        assert!(options.is_allowed_tag("p"));
        assert!(!options.is_allowed_tag("span"));
        assert!(options.attributes.is_empty());
        assert!(options.exceptions_file.is_none());
        assert!(!options.debug);
    }

    #[test]
    fn test_builder_overrides() {
        let options = ReadabilityOptions::builder()
            .min_text_length(0)
            .retry_length(1)
            .tags(["DIV", " p", "img", ""])
            .attributes(["SRC"])
            .exceptions_file("/tmp/rules.txt")
            .debug(true)
            .build();

        assert_eq!(options.min_text_length, 0);
        assert_eq!(options.retry_length, 1);
        assert!(options.is_allowed_tag("div"));
        assert!(options.is_allowed_tag("img"));
        assert!(options.is_allowed_tag("p"));
        assert_eq!(options.tags.len(), 3);
        assert!(options.is_allowed_attribute("src"));
        assert_eq!(options.exceptions_file, Some(PathBuf::from("/tmp/rules.txt")));
        assert!(options.debug);
    }
}
