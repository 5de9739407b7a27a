//! URL helpers shared by the board client and the HTML extractors.

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(crate) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// Parses a configured page URL so relative links can be resolved against it.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`](crate::ScraperError::InvalidUrl) when
/// `page_url` is not an absolute URL.
pub(crate) fn parse_page_url(page_url: &str) -> Result<reqwest::Url, crate::ScraperError> {
    reqwest::Url::parse(page_url).map_err(|e| crate::ScraperError::InvalidUrl {
        url: page_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Resolves `href` against `base`, the way a browser follows a link.
///
/// Returns `None` for hrefs that cannot be joined (e.g. malformed schemes).
pub(crate) fn resolve_href(base: &reqwest::Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}
