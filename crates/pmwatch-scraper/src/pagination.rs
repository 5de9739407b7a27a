//! Page walking for paginated listings.
//!
//! Greenhouse reports `meta.total` alongside each page of jobs, and the
//! extractor keeps requesting `page=N` until that count is reached. FacetWP
//! listings expose their page index through the `fwp_paged` query parameter.

/// Maximum number of pages to walk before giving up on a listing.
/// Prevents infinite loops when a board keeps reporting more results.
pub(crate) const MAX_PAGES: usize = 50;

/// Query parameter FacetWP reads the requested page index from.
pub(crate) const FACETWP_PAGE_PARAM: &str = "fwp_paged";

/// Returns `true` when another Greenhouse page should be requested.
///
/// Stops when the board reports no total, when the total has been reached,
/// or when the last page came back empty.
#[must_use]
pub(crate) fn greenhouse_has_more(collected: usize, total: Option<u64>, last_batch: usize) -> bool {
    match total {
        Some(total) => last_batch > 0 && (collected as u64) < total,
        None => false,
    }
}

/// Returns `url` with `param` set to `page`, replacing any existing value.
#[must_use]
pub(crate) fn with_page_param(url: &reqwest::Url, param: &str, page: usize) -> reqwest::Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(param, &page.to_string());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greenhouse_stops_without_total() {
        assert!(!greenhouse_has_more(100, None, 100));
    }

    #[test]
    fn greenhouse_continues_below_total() {
        assert!(greenhouse_has_more(100, Some(250), 100));
    }

    #[test]
    fn greenhouse_stops_at_total() {
        assert!(!greenhouse_has_more(250, Some(250), 50));
    }

    #[test]
    fn greenhouse_stops_on_empty_page() {
        assert!(!greenhouse_has_more(100, Some(250), 0));
    }

    #[test]
    fn page_param_is_appended() {
        let url = reqwest::Url::parse("https://acme.example/careers/").unwrap();
        let paged = with_page_param(&url, FACETWP_PAGE_PARAM, 3);
        assert_eq!(paged.as_str(), "https://acme.example/careers/?fwp_paged=3");
    }

    #[test]
    fn page_param_replaces_existing_value_and_keeps_others() {
        let url =
            reqwest::Url::parse("https://acme.example/careers/?team=product&fwp_paged=2").unwrap();
        let paged = with_page_param(&url, FACETWP_PAGE_PARAM, 4);
        assert_eq!(
            paged.as_str(),
            "https://acme.example/careers/?team=product&fwp_paged=4"
        );
    }
}
