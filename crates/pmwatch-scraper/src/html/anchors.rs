//! Posting discovery on browser-rendered career pages.
//!
//! Rendered listings are usually link grids, so every link whose href looks
//! like a job URL becomes a candidate posting. Title relevance is left to the
//! caller.

use std::collections::HashSet;
use std::sync::LazyLock;

use pmwatch_core::JobPosting;
use scraper::{ElementRef, Html, Selector};

use super::normalize::{element_text, generate_id, location_near, MIN_TITLE_CHARS};
use super::proximity::push_unique;
use crate::client::{parse_page_url, resolve_href};
use crate::error::ScraperError;

/// Href fragments that mark a link as a job posting.
pub const JOB_URL_KEYWORDS: &[&str] = &[
    "/jobs/",
    "/job/",
    "/careers/",
    "/position",
    "/opening",
    "/role",
    "/apply",
];

/// Resolved-URL fragments that mark a link as marketing content, not a job.
pub const EXCLUDED_URL_SEGMENTS: &[&str] = &[
    "/guide",
    "/blog",
    "/roadmapping",
    "/resources",
    "/about",
    "/pricing",
];

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Returns `true` when the resolved `url` is not a known non-job section.
#[must_use]
pub fn is_valid_job_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    !EXCLUDED_URL_SEGMENTS
        .iter()
        .any(|segment| lower.contains(segment))
}

/// Extracts every job-like link from a rendered page.
///
/// Each distinct raw href is considered once. Links with fewer than five
/// characters of text, fragment-only hrefs, and excluded sections are skipped.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `page_url` is not absolute.
pub fn extract_rendered_postings(
    html: &str,
    page_url: &str,
    company: &str,
) -> Result<Vec<JobPosting>, ScraperError> {
    let base = parse_page_url(page_url)?;
    let document = Html::parse_document(html);

    let mut seen_hrefs: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::new();
    for link in document.select(&LINK_SELECTOR) {
        let Some(href) = link.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        if !JOB_URL_KEYWORDS.iter().any(|kw| href.contains(kw)) {
            continue;
        }
        if seen_hrefs.insert(href) {
            candidates.push((link, href));
        }
    }

    tracing::debug!(
        company,
        page_bytes = html.len(),
        candidates = candidates.len(),
        "job-like links found on rendered page"
    );

    let mut postings: Vec<JobPosting> = Vec::new();
    for (link, href) in candidates {
        let title = element_text(link);
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let Some(url) = resolve_href(&base, href) else {
            continue;
        };
        if !is_valid_job_url(&url) {
            continue;
        }

        let context = link
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| parent.text().collect::<Vec<_>>().join(" "))
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

    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://acme.example/company/careers";

    #[test]
    fn keeps_job_links_and_skips_everything_else() {
        let html = r##"
            <a href="/jobs/123">Senior Product Manager</a>
            <a href="/jobs/124">Backend Engineer</a>
            <a href="#open-roles">Open roles</a>
            <a href="/team">Meet the team</a>
            <a href="/jobs/125">Go</a>"##;

        let postings = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();
        let titles: Vec<&str> = postings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Product Manager", "Backend Engineer"]);
        assert_eq!(postings[0].url, "https://acme.example/jobs/123");
        assert_eq!(postings[0].id, "jobs-123-senior-product-manager");
    }

    #[test]
    fn excluded_sections_are_dropped_after_resolution() {
        let html = r#"
            <a href="/blog/careers/how-we-hire">How we hire product managers</a>
            <a href="/careers/pm-platform">PM, Platform</a>"#;

        let postings = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].url, "https://acme.example/careers/pm-platform");
    }

    #[test]
    fn repeated_hrefs_are_considered_once() {
        let html = r#"
            <a href="/jobs/9">Product Manager, Data</a>
            <a href="/jobs/9">Apply for this role</a>"#;

        let postings = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Product Manager, Data");
    }

    #[test]
    fn location_comes_from_link_container() {
        let html = r#"
            <div><a href="/jobs/7">Group Product Manager</a><span>Remote (US)</span></div>"#;

        let postings = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();
        assert_eq!(postings[0].location, "Remote (US)");
    }

    #[test]
    fn same_page_yields_same_postings() {
        let html = r#"
            <div><a href="/jobs/7">Group Product Manager</a><span>Remote (US)</span></div>
            <div><a href="/careers/pm-data">Product Manager, Data</a><span>Austin, TX</span></div>
            <div><a href="/jobs/8">Solutions Engineer</a></div>"#;

        let first = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();
        let second = extract_rendered_postings(html, PAGE_URL, "Acme").unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn url_validity_checks_excluded_segments() {
        assert!(is_valid_job_url("https://acme.example/jobs/1"));
        assert!(!is_valid_job_url("https://acme.example/Resources/jobs/1"));
        assert!(!is_valid_job_url("https://acme.example/pricing"));
    }
}
