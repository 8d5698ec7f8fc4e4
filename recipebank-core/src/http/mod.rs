//! Outgoing HTTP for URL-based extraction.
//!
//! Page fetches go through the [`HttpClient`] trait so extraction can be tested
//! against canned pages.

mod client;
mod page_text;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient};
pub use page_text::{visible_text, MAX_PAGE_TEXT_CHARS};

/// Parse `url` and require an http(s) scheme and a host.
pub fn parse_web_url(url: &str) -> Result<url::Url, crate::FetchError> {
    let parsed =
        url::Url::parse(url.trim()).map_err(|e| crate::FetchError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(crate::FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                other
            )))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(crate::FetchError::InvalidUrl("missing host".to_string()));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_url() {
        assert!(parse_web_url("https://example.com/recipe").is_ok());
        assert!(parse_web_url("  http://example.com  ").is_ok());
        assert!(parse_web_url("ftp://example.com/file").is_err());
        assert!(parse_web_url("example.com/recipe").is_err());
        assert!(parse_web_url("").is_err());
    }
}
