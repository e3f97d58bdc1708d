//! Where a page comes from.
//!
//! [`PageSource`] classifies a command-line style input (`-`, an HTTP(S)
//! address or a path) and [`PageSource::read`] turns it into a [`Page`]. A
//! page fetched over the network remembers the address it finally came from,
//! after redirects, so the special-case dispatcher sees the real host.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{ReadabilityError, Result};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP settings for [`fetch_url`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: concat!("Mozilla/5.0 (compatible; readability/", env!("CARGO_PKG_VERSION"), ")").to_string(),
        }
    }
}

/// Markup plus the address it was served from, when known.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    pub url: Option<Url>,
}

/// An input naming a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Stdin,
    Url(Url),
    File(PathBuf),
}

impl PageSource {
    /// `-` is stdin, an `http`/`https` address is fetched, anything else is a
    /// file path.
    pub fn parse(input: &str) -> Self {
        if input == "-" {
            return PageSource::Stdin;
        }

        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => PageSource::Url(url),
            _ => PageSource::File(PathBuf::from(input)),
        }
    }

    pub async fn read(&self, config: &FetchConfig) -> Result<Page> {
        match self {
            PageSource::Stdin => Ok(Page { html: fetch_stdin()?, url: None }),
            PageSource::Url(url) => fetch(url.clone(), config).await,
            PageSource::File(path) => Ok(Page { html: fetch_file(path)?, url: None }),
        }
    }
}

/// GETs `url` and returns its body with the post-redirect address.
///
/// Only `http` and `https` are accepted. Non-success statuses are reported as
/// [`ReadabilityError::HttpError`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<Page> {
    let parsed = Url::parse(url).map_err(|e| ReadabilityError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ReadabilityError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
    }

    fetch(parsed, config).await
}

async fn fetch(url: Url, config: &FetchConfig) -> Result<Page> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(ReadabilityError::HttpError)?;

    let response = client
        .get(url)
        .header("Accept", ACCEPT_HTML)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ReadabilityError::Timeout { timeout: config.timeout }
            } else {
                ReadabilityError::HttpError(e)
            }
        })?
        .error_for_status()?;

    let url = response.url().clone();
    let html = response.text().await?;

    Ok(Page { html, url: Some(url) })
}

/// Reads a saved page from disk.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadabilityError::FileNotFound(path.to_path_buf()));
    }

    Ok(fs::read_to_string(path)?)
}

/// Reads standard input to EOF.
pub fn fetch_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-", PageSource::Stdin)]
    #[case("page.html", PageSource::File(PathBuf::from("page.html")))]
    #[case("ftp://example.com/page.html", PageSource::File(PathBuf::from("ftp://example.com/page.html")))]
    #[case("https://vimeo.com/42", PageSource::Url(Url::parse("https://vimeo.com/42").unwrap()))]
    fn test_page_source_parse(#[case] input: &str, #[case] expected: PageSource) {
        assert_eq!(PageSource::parse(input), expected);
    }

    #[test]
    fn test_user_agent_names_the_crate_version() {
        let config = FetchConfig::default();
        assert!(config.user_agent.ends_with(concat!("readability/", env!("CARGO_PKG_VERSION"), ")")));
    }

    #[tokio::test]
    async fn test_fetch_url_rejects_unparsable_address() {
        let result = fetch_url("not-a-url", &FetchConfig::default()).await;
        assert!(matches!(result, Err(ReadabilityError::InvalidUrl(msg)) if msg.starts_with("not-a-url")));
    }

    #[tokio::test]
    async fn test_fetch_url_rejects_other_schemes() {
        let result = fetch_url("ftp://example.com/page.html", &FetchConfig::default()).await;
        assert!(matches!(result, Err(ReadabilityError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_file_source_has_no_address() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        fs::write(temp.path(), "<p>saved page</p>").unwrap();

        let page = PageSource::File(temp.path().to_path_buf()).read(&FetchConfig::default()).await.unwrap();
        assert_eq!(page.html, "<p>saved page</p>");
        assert!(page.url.is_none());
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(ReadabilityError::FileNotFound(_))));
    }
}
