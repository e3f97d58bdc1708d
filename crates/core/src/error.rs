//! Error types for readability operations.
//!
//! Extraction itself is infallible: a page with no usable content degrades to
//! the `body` fallback instead of failing. The variants below cover the
//! collaborators around it: fetching, reading files and loading site rules.
//!
//! # Example
//!
//! ```rust
//! use readability_core::{ReadabilityError, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     if path.is_empty() {
//!         return Err(ReadabilityError::InvalidUrl("empty input".to_string()));
//!     }
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for readability operations.
#[derive(Error, Debug)]
pub enum ReadabilityError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and non-success
    /// responses.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector from a site rule could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Site rule file errors.
    ///
    /// Returned when a rule file has an unknown directive, a directive outside
    /// of a `host:` block, or an entry with no selector.
    #[error("Site rule error: {0}")]
    SiteConfigError(String),
}

/// Result type alias for ReadabilityError.
pub type Result<T> = std::result::Result<T, ReadabilityError>;
