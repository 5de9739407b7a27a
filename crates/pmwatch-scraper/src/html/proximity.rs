//! Posting discovery on server-rendered career pages.
//!
//! Career pages have no common markup, so postings are found by proximity:
//! every text node mentioning "product manager" is walked outward to the
//! nearest link. When that finds nothing, every link whose text or href
//! mentions "product manager" is taken instead.

use std::sync::LazyLock;

use pmwatch_core::{mentions_product_manager, JobPosting};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::normalize::{
    collapse_whitespace, element_text, generate_id, location_near, MIN_TITLE_CHARS,
};
use crate::client::{parse_page_url, resolve_href};
use crate::error::ScraperError;

static PRODUCT_MANAGER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)product\s+manager").expect("valid product manager regex"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Extracts product-manager postings from a static career page.
///
/// Links are resolved against `page_url`. Postings are deduplicated by id in
/// first-seen order.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `page_url` is not absolute.
pub fn extract_static_postings(
    html: &str,
    page_url: &str,
    company: &str,
) -> Result<Vec<JobPosting>, ScraperError> {
    let base = parse_page_url(page_url)?;
    let document = Html::parse_document(html);

    let postings = proximity_postings(&document, &base, company);
    if !postings.is_empty() {
        return Ok(postings);
    }

    tracing::debug!(company, "no postings near product manager text; scanning links");
    Ok(link_postings(&document, &base, company))
}

fn proximity_postings(document: &Html, base: &reqwest::Url, company: &str) -> Vec<JobPosting> {
    let mut postings: Vec<JobPosting> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if !PRODUCT_MANAGER_TEXT.is_match(text) {
            continue;
        }
        let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if matches!(parent.value().name(), "script" | "style") {
            continue;
        }

        let Some(anchor) = nearest_anchor(parent) else {
            continue;
        };
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };

        let mut title = element_text(anchor);
        if title.chars().count() < MIN_TITLE_CHARS {
            title = element_text(parent);
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            title = collapse_whitespace(text);
        }
        if !mentions_product_manager(&title) {
            continue;
        }

        let Some(url) = resolve_href(base, href) else {
            continue;
        };

        // A title wrapped directly in its link says nothing about location;
        // look at the element holding the link instead.
        let container = if parent.value().name() == "a" {
            parent.parent().and_then(ElementRef::wrap).unwrap_or(parent)
        } else {
            parent
        };
        let mut context = raw_text(container);
        if context.trim().is_empty() {
            if let Some(grandparent) = container.parent().and_then(ElementRef::wrap) {
                context = raw_text(grandparent);
            }
        }

        push_unique(
            &mut postings,
            JobPosting {
                id: generate_id(&url, &title),
                location: location_near(&context, &title),
                title,
                company: company.to_owned(),
                url,
            },
        );
    }

    postings
}

/// The parent itself when it is a link, else its first direct child link, else
/// the first following sibling link, else the grandparent's first direct
/// child link.
fn nearest_anchor(parent: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if parent.value().name() == "a" {
        return Some(parent);
    }
    if let Some(anchor) = child_anchor(parent) {
        return Some(anchor);
    }
    if let Some(anchor) = parent
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
    {
        return Some(anchor);
    }
    parent
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(child_anchor)
}

fn child_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}

fn link_postings(document: &Html, base: &reqwest::Url, company: &str) -> Vec<JobPosting> {
    let mut postings: Vec<JobPosting> = Vec::new();

    for link in document.select(&LINK_SELECTOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = element_text(link);
        if !mentions_product_manager(&title) && !href_mentions_product_manager(href) {
            continue;
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let Some(url) = resolve_href(base, href) else {
            continue;
        };

        let context = link
            .parent()
            .and_then(ElementRef::wrap)
            .map(raw_text)
            .unwrap_or_default();

        push_unique(
            &mut postings,
            JobPosting {
                id: generate_id(&url, &title),
                location: location_near(&context, &title),
                title,
                company: company.to_owned(),
                url,
            },
        );
    }

    postings
}

/// Slug-style hrefs spell the phrase with separators (`/jobs/product-manager-ai`).
fn href_mentions_product_manager(href: &str) -> bool {
    mentions_product_manager(&href.replace(['-', '_', '+'], " "))
}

fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

pub(crate) fn push_unique(postings: &mut Vec<JobPosting>, posting: JobPosting) {
    if !postings.iter().any(|p| p.id == posting.id) {
        postings.push(posting);
    }
}

#[cfg(test)]
#[path = "proximity_test.rs"]
mod tests;
