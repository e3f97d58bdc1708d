//! Pulls the main article out of an HTML page.
//!
//! Paragraphs vote for their containers, the best container is assembled with
//! its strong siblings, and the result is cleaned down to a small tag
//! whitelist. Video and slide hosts and sites with a configured CSS rule skip
//! the heuristic and get a fixed fragment instead.
//!
//! # Example
//!
//! ```rust
//! use readability_core::extract;
//!
//! let html = format!(
//!     "<html><body><div class='nav'>Menu</div><div><p>{}</p></div></body></html>",
//!     "A sentence worth reading, with a clause or two. ".repeat(10)
//! );
//! let content = extract(&html);
//! assert!(content.contains("worth reading"));
//! assert!(!content.contains("Menu"));
//! ```

#[macro_use]
mod macros;

pub mod dom;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod options;
pub mod patterns;
pub mod preprocess;
pub mod readability;
pub mod sanitize;
pub mod scoring;
pub mod siteconfig;
pub mod special;

pub use error::{ReadabilityError, Result};
pub use extract::{ExtractedContent, get_article, select_best_candidate};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Page, PageSource, fetch_file, fetch_stdin, fetch_url};
pub use options::{ReadabilityOptions, ReadabilityOptionsBuilder};
pub use preprocess::{remove_unlikely_candidates, strip_markup, transform_misused_divs_into_paragraphs};
#[cfg(feature = "fetch")]
pub use readability::fetch_and_extract;
pub use readability::{Document, Readability, extract, extract_with_url};
pub use sanitize::sanitize;
pub use scoring::{Candidate, Candidates, score_node, score_paragraphs};
pub use siteconfig::{SiteRule, SiteRules, SiteRulesLoader, SiteRulesParser};
pub use special::SpecialCase;
