use crate::error::{ReadabilityError, Result};
use crate::siteconfig::directives::{Directive, parse_directive};
use crate::siteconfig::rules::{SiteRule, SiteRules};
use scraper::Selector;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Site rule file parser.
///
/// Each `host:` line opens a rule; `name`, `css` and `encoding` fill it in.
///
/// ```text
/// # Portal O Dia
/// host: portalodia.com
/// name: Portal O Dia
/// css: div.texto p
/// encoding: ISO-8859-1
/// ```
#[derive(Debug)]
pub struct SiteRulesParser;

#[derive(Debug)]
struct PendingRule {
    line: usize,
    host: String,
    name: Option<String>,
    selector: Option<String>,
    encoding: Option<String>,
}

impl PendingRule {
    fn finish(self) -> Result<SiteRule> {
        let Some(selector) = self.selector else {
            return Err(ReadabilityError::SiteConfigError(format!(
                "Rule for {} at line {} has no css selector",
                self.host, self.line
            )));
        };

        Selector::parse(&selector).map_err(|e| {
            ReadabilityError::SiteConfigError(format!(
                "Invalid css selector for {} at line {}: {}",
                self.host, self.line, e
            ))
        })?;

        let name = self.name.unwrap_or_else(|| self.host.clone());
        Ok(SiteRule { host: self.host, name, selector, encoding: self.encoding })
    }
}

impl SiteRulesParser {
    /// Parse a rule file from disk.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SiteRules> {
        let file = std::fs::File::open(&path).map_err(|e| {
            ReadabilityError::SiteConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse rules from a reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<SiteRules> {
        let mut rules = SiteRules::new();
        let mut pending: Option<PendingRule> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .map_err(|e| ReadabilityError::SiteConfigError(format!("Read error at line {}: {}", line_number, e)))?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let directive = parse_directive(line).map_err(|e| {
                ReadabilityError::SiteConfigError(format!("Parse error at line {}: {}", line_number, e))
            })?;

            if let Directive::Host(host) = directive {
                if let Some(done) = pending.take() {
                    rules.insert(done.finish()?);
                }
                pending =
                    Some(PendingRule { line: line_number, host, name: None, selector: None, encoding: None });
                continue;
            }

            let Some(current) = pending.as_mut() else {
                return Err(ReadabilityError::SiteConfigError(format!(
                    "Directive outside of a host block at line {}",
                    line_number
                )));
            };

            match directive {
                Directive::Name(name) => current.name = Some(name),
                Directive::Css(css) => current.selector = Some(css),
                Directive::Encoding(encoding) => current.encoding = Some(encoding),
                Directive::Host(_) => {}
            }
        }

        if let Some(done) = pending {
            rules.insert(done.finish()?);
        }

        Ok(rules)
    }

    /// Parse rules from a string.
    pub fn parse_string(content: &str) -> Result<SiteRules> {
        Self::parse_reader(content.as_bytes())
    }
}
