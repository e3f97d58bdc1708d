//! Main content extraction API.
//!
//! [`Document`] owns one parsed page and runs the extraction pipeline on it:
//! special-case dispatch, unlikely-candidate pruning, paragraph scoring,
//! candidate selection, sibling assembly and sanitisation. When the assembled
//! article comes out too short the tree is rebuilt from the source snapshot
//! and the pipeline runs once more with pruning disabled.
//!
//! [`Readability`] is the reusable front door: it holds the options and the
//! site rules and hands out documents. Rule files are only read by
//! [`Readability::with_options`]; a bare [`Document`] has no site rules until
//! some are handed to it.
//!
//! # Example
//!
//! ```rust
//! use readability_core::{Document, ReadabilityOptions};
//!
//! let options = ReadabilityOptions::builder().min_text_length(0).retry_length(1).build();
//! let mut doc = Document::new("<div><p>Some content</p></div>", options);
//! assert!(doc.content().contains("Some content"));
//! ```

use std::sync::Arc;

use ego_tree::NodeId;
use scraper::Html;
use url::{Position, Url};

use crate::dom::Dom;
use crate::extract::ExtractedContent;
use crate::options::ReadabilityOptions;
use crate::preprocess::{self, strip_markup};
use crate::sanitize::{self, collapse_whitespace, repack_latin1};
use crate::scoring::{self, Candidate, Candidates};
use crate::siteconfig::{SiteRule, SiteRules, SiteRulesLoader, normalize_host};
use crate::special::{self, Site, SpecialCase};
use crate::{ReadabilityError, Result};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Extraction context for a single page.
pub struct Document {
    dom: Dom,
    source: String,
    base_uri: Option<String>,
    request: Option<String>,
    options: ReadabilityOptions,
    best_candidate: Option<Candidate>,
    rules: Arc<SiteRules>,
    used: bool,
}

impl Document {
    /// Parses `html` after stripping scripts, styles and comments.
    pub fn new(html: &str, options: ReadabilityOptions) -> Self {
        let source = strip_markup(html);
        let dom = Dom::parse(&source);
        Self::with_dom(dom, source, options)
    }

    /// Parses `html` with the default options.
    pub fn parse(html: &str) -> Self {
        Self::new(html, ReadabilityOptions::default())
    }

    /// Wraps a tree parsed elsewhere. Its serialisation becomes the reset
    /// snapshot.
    pub fn from_html(html: Html, options: ReadabilityOptions) -> Self {
        let source = html.html();
        Self::with_dom(Dom::from_html(html), source, options)
    }

    fn with_dom(dom: Dom, source: String, options: ReadabilityOptions) -> Self {
        Self {
            dom,
            source,
            base_uri: None,
            request: None,
            options,
            best_candidate: None,
            rules: Arc::default(),
            used: false,
        }
    }

    /// Host or base address the page was served from.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Request path, including query and fragment.
    pub fn with_request(mut self, request: impl Into<String>) -> Self {
        self.request = Some(request.into());
        self
    }

    /// Site rules consulted by the special-case dispatcher.
    pub fn with_rules(mut self, rules: Arc<SiteRules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn options(&self) -> &ReadabilityOptions {
        &self.options
    }

    /// Normalised host, empty when the origin is unknown.
    pub fn host(&self) -> String {
        self.base_uri.as_deref().map(normalize_host).unwrap_or_default()
    }

    pub fn request(&self) -> &str {
        self.request.as_deref().unwrap_or_default()
    }

    /// Whether a site rule is configured for this page's host.
    pub fn has_special_rule(&self) -> bool {
        self.site_rule().is_some()
    }

    fn site_rule(&self) -> Option<&SiteRule> {
        let host = self.host();
        if host.is_empty() {
            return None;
        }
        self.rules.get(&host)
    }

    /// Runs the special-case dispatcher for this page.
    pub fn special_case(&self) -> Option<(SpecialCase, String)> {
        let host = self.host();
        let site = Site { host: &host, request: self.request(), rule: self.site_rule() };
        special::dispatch(&self.dom, &site, self.options.debug)
    }

    pub fn remove_unlikely_candidates(&mut self) -> usize {
        preprocess::remove_unlikely_candidates(&mut self.dom, self.options.debug)
    }

    pub fn transform_misused_divs_into_paragraphs(&mut self) -> usize {
        preprocess::transform_misused_divs_into_paragraphs(&mut self.dom, self.options.debug)
    }

    pub fn score_paragraphs(&self) -> Candidates {
        scoring::score_paragraphs(&self.dom, self.options.min_text_length, self.options.debug)
    }

    /// Best candidate, computed once and memoised until [`Document::reset`].
    pub fn select_best_candidate(&mut self, candidates: &Candidates) -> Candidate {
        if let Some(best) = self.best_candidate {
            return best;
        }

        let best = crate::extract::select_best_candidate(&self.dom, candidates, self.options.debug);
        self.best_candidate = Some(best);
        best
    }

    /// Assembles the best candidate and its qualifying siblings into a
    /// detached container.
    pub fn get_article(&mut self, candidates: &Candidates) -> NodeId {
        let best = self.select_best_candidate(candidates);
        crate::extract::get_article(&mut self.dom, candidates, &best, self.options.debug)
    }

    pub fn sanitize(&mut self, node: NodeId, candidates: &Candidates) -> String {
        sanitize::sanitize(&mut self.dom, node, candidates, &self.options)
    }

    /// Rebuilds the tree from the source snapshot and forgets the best
    /// candidate.
    pub fn reset(&mut self) {
        self.dom = Dom::parse(&self.source);
        self.best_candidate = None;
    }

    /// Extracted article markup.
    pub fn content(&mut self) -> String {
        self.extract().content
    }

    /// Extracted article markup plus what the pipeline did to produce it.
    ///
    /// Calling this again on the same document starts from a fresh tree.
    pub fn extract(&mut self) -> ExtractedContent {
        if self.used {
            self.reset();
        }
        self.used = true;
        self.content_with(true)
    }

    fn content_with(&mut self, remove_unlikely_candidates: bool) -> ExtractedContent {
        let debug = self.options.debug;

        self.dom.remove_tags(&["script", "style"]);
        self.dom.remove_comments();

        if remove_unlikely_candidates && let Some((case, fragment)) = self.special_case() {
            debug_trace!(debug, case = case.as_str(), "special case matched");
            let mut content = collapse_whitespace(&fragment);
            if self.site_rule().is_some_and(SiteRule::is_latin1) {
                content = repack_latin1(&content);
            }
            return ExtractedContent {
                content,
                top_score: 0.0,
                element_count: 0,
                special_case: Some(case),
                retried: false,
            };
        }

        if remove_unlikely_candidates {
            self.remove_unlikely_candidates();
        }
        self.transform_misused_divs_into_paragraphs();

        let candidates = self.score_paragraphs();
        let best = self.select_best_candidate(&candidates);
        let article = self.get_article(&candidates);

        let length = self.dom.text(article).trim().chars().count();
        if remove_unlikely_candidates && length < self.options.retry_length {
            debug_trace!(debug, length, retry_length = self.options.retry_length, "article too short, retrying");
            self.reset();
            let mut retried = self.content_with(false);
            retried.retried = true;
            return retried;
        }

        let element_count = self.dom.element_children(article).len();
        let content = self.sanitize(article, &candidates);

        ExtractedContent { content, top_score: best.content_score, element_count, special_case: None, retried: false }
    }
}

/// Main entry point for content extraction.
///
/// Holds the options and, once loaded, the site rules shared by every
/// document it creates.
///
/// # Example
///
/// ```rust
/// use readability_core::Readability;
///
/// let reader = Readability::new();
/// let html = format!("<html><body><div><p>{}</p></div></body></html>", "Plenty of words. ".repeat(30));
/// let content = reader.content(&html);
/// assert!(content.contains("Plenty of words."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Readability {
    options: ReadabilityOptions,
    rules: Option<Arc<SiteRules>>,
}

impl Readability {
    /// Default options and no site rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom options with the site rules loaded up front.
    ///
    /// # Errors
    ///
    /// Returns [`ReadabilityError::FileNotFound`] when `exceptions_file` names
    /// a missing file, or [`ReadabilityError::SiteConfigError`] when the rule
    /// file is malformed.
    pub fn with_options(options: ReadabilityOptions) -> Result<Self> {
        let rules = SiteRulesLoader::new().load(options.exceptions_file.as_deref())?;
        Ok(Self { options, rules: Some(rules) })
    }

    pub fn options(&self) -> &ReadabilityOptions {
        &self.options
    }

    /// Builds a document, taking host and request from `url` when given.
    pub fn document(&self, html: &str, url: Option<&str>) -> Result<Document> {
        let mut doc = Document::new(html, self.options.clone());
        if let Some(rules) = &self.rules {
            doc = doc.with_rules(Arc::clone(rules));
        }

        if let Some(url) = url {
            let parsed = Url::parse(url).map_err(|e| ReadabilityError::InvalidUrl(format!("{}: {}", url, e)))?;
            let host = parsed
                .host_str()
                .ok_or_else(|| ReadabilityError::InvalidUrl(format!("{}: missing host", url)))?;
            doc = doc.with_base_uri(host).with_request(&parsed[Position::BeforePath..]);
        }

        Ok(doc)
    }

    pub fn content(&self, html: &str) -> String {
        self.extract(html).content
    }

    pub fn extract(&self, html: &str) -> ExtractedContent {
        let mut doc = Document::new(html, self.options.clone());
        if let Some(rules) = &self.rules {
            doc = doc.with_rules(Arc::clone(rules));
        }
        doc.extract()
    }

    /// Extracts with the page address available to the special cases.
    ///
    /// # Errors
    ///
    /// Returns [`ReadabilityError::InvalidUrl`] if `url` cannot be parsed.
    pub fn extract_url(&self, html: &str, url: &str) -> Result<ExtractedContent> {
        Ok(self.document(html, Some(url))?.extract())
    }

    /// Fetches `url` and extracts its content, dispatching on the address
    /// the page was finally served from.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_extract(&self, url: &str, config: &FetchConfig) -> Result<ExtractedContent> {
        let page = fetch_url(url, config).await?;
        let address = page.url.as_ref().map_or(url, Url::as_str);
        self.extract_url(&page.html, address)
    }
}

/// One-call extraction with the default options.
pub fn extract(html: &str) -> String {
    Readability::new().content(html)
}

/// One-call extraction with the page address.
///
/// # Errors
///
/// Returns [`ReadabilityError::InvalidUrl`] if `url` cannot be parsed.
pub fn extract_with_url(html: &str, url: &str) -> Result<String> {
    Ok(Readability::new().extract_url(html, url)?.content)
}

/// Fetches `url` with the default fetch settings and extracts its content.
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract(url: &str) -> Result<ExtractedContent> {
    Readability::new().fetch_and_extract(url, &FetchConfig::default()).await
}
