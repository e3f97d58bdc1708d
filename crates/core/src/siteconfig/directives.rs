use crate::error::{ReadabilityError, Result};

/// A single `key: value` line of a site rule file.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Opens a new rule for this host.
    Host(String),
    /// Display label, informational only.
    Name(String),
    /// CSS selector whose matches form the article.
    Css(String),
    /// Declared page encoding.
    Encoding(String),
}

/// Parse a single directive line. Blank and comment lines are rejected.
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(ReadabilityError::SiteConfigError("Empty or comment line".to_string()));
    }

    let Some((key, value)) = line.split_once(':') else {
        return Err(ReadabilityError::SiteConfigError(format!("Missing ':' in directive: {}", line)));
    };

    let value = value.trim();
    if value.is_empty() {
        return Err(ReadabilityError::SiteConfigError(format!("Empty value for '{}'", key.trim())));
    }

    match key.trim() {
        "host" => Ok(Directive::Host(value.to_string())),
        "name" => Ok(Directive::Name(value.to_string())),
        "css" => Ok(Directive::Css(value.to_string())),
        "encoding" => Ok(Directive::Encoding(value.to_string())),
        other => Err(ReadabilityError::SiteConfigError(format!("Unknown directive: {}", other))),
    }
}
