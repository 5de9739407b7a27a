//! FacetWP listing parsing.
//!
//! FacetWP is a WordPress filtering plugin. Its listings render postings
//! inside a `.facetwp-template` container and expose the page count on the
//! `.facetwp-page.last` pager link.

use std::sync::LazyLock;

use pmwatch_core::JobPosting;
use scraper::{Html, Selector};

use super::normalize::{element_text, facetwp_id, MIN_TITLE_CHARS};
use crate::client::{parse_page_url, resolve_href};
use crate::error::ScraperError;

static TEMPLATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".facetwp-template").expect("valid template selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));
static LAST_PAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".facetwp-page.last").expect("valid pager selector"));

/// The page count advertised by the pager, or 1 when there is no pager.
#[must_use]
pub fn last_page(html: &str) -> usize {
    let document = Html::parse_document(html);
    document
        .select(&LAST_PAGE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("data-page"))
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

/// Postings linked from the first `.facetwp-template` container.
///
/// Returns an empty list when the page has no template. Locations are not
/// present in FacetWP listings and are left empty.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `page_url` is not absolute.
pub fn parse_template(
    html: &str,
    page_url: &str,
    company: &str,
) -> Result<Vec<JobPosting>, ScraperError> {
    let base = parse_page_url(page_url)?;
    let document = Html::parse_document(html);
    let Some(template) = document.select(&TEMPLATE_SELECTOR).next() else {
        return Ok(Vec::new());
    };

    let mut postings = Vec::new();
    for link in template.select(&LINK_SELECTOR) {
        let title = element_text(link);
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let Some(url) = link
            .value()
            .attr("href")
            .and_then(|href| resolve_href(&base, href))
        else {
            continue;
        };
        postings.push(JobPosting {
            id: facetwp_id(&url, &title),
            title,
            company: company.to_owned(),
            location: String::new(),
            url,
        });
    }
    Ok(postings)
}
