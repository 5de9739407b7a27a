use std::collections::HashMap;
use std::sync::Mutex;

use super::*;

/// Serves canned DOMs by URL and records every render request.
#[derive(Default)]
struct FakeRenderer {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeRenderer {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_owned(), html.to_owned());
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Renderer for FakeRenderer {
    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        self.requested.lock().unwrap().push(url.to_owned());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::Render {
                url: url.to_owned(),
                reason: "no canned page".to_owned(),
            })
    }
}

fn extractor(renderer: FakeRenderer) -> Extractor<FakeRenderer> {
    let client = BoardClient::new(5, "pmwatch-test").unwrap();
    Extractor::new(client, renderer)
}

fn source(kind: &str, locator: &str) -> SourceConfig {
    SourceConfig {
        name: "Acme".to_owned(),
        kind: kind.to_owned(),
        locator: locator.to_owned(),
        title_filter: None,
        classify: false,
    }
}

fn posting(title: &str) -> JobPosting {
    JobPosting {
        id: title.to_lowercase().replace(' ', "-"),
        title: title.to_owned(),
        company: "Acme".to_owned(),
        location: String::new(),
        url: "https://acme.example/jobs/1".to_owned(),
    }
}

fn facetwp_page(links: &[(&str, &str)], last_page: usize) -> String {
    let items: String = links
        .iter()
        .map(|(href, title)| format!(r#"<div class="job"><a href="{href}">{title}</a></div>"#))
        .collect();
    format!(
        r#"<div class="facetwp-template">{items}</div>
           <div class="facetwp-pager"><a class="facetwp-page last" data-page="{last_page}">{last_page}</a></div>"#
    )
}

const LISTING: &str = "https://careers.acme.example/jobs/";

// ---------------------------------------------------------------------------
// Title filters
// ---------------------------------------------------------------------------

#[test]
fn keyword_filter_keeps_pm_adjacent_titles() {
    let kept = apply_title_filter(
        vec![
            posting("Head of Product"),
            posting("Software Engineer"),
            posting("Senior Product Manager"),
        ],
        TitleFilter::Keywords,
    );
    let titles: Vec<&str> = kept.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Head of Product", "Senior Product Manager"]);
}

#[test]
fn product_manager_filter_requires_literal_phrase() {
    let kept = apply_title_filter(
        vec![posting("Head of Product"), posting("Product Manager, AI")],
        TitleFilter::ProductManager,
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "Product Manager, AI");
}

#[test]
fn deferred_filter_keeps_everything() {
    let kept = apply_title_filter(
        vec![posting("Head of Product"), posting("Software Engineer")],
        TitleFilter::Deferred,
    );
    assert_eq!(kept.len(), 2);
}

// ---------------------------------------------------------------------------
// Rendered sources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rendered_source_defers_title_filtering() {
    let html = r#"
        <a href="/jobs/1">Senior Product Manager</a>
        <a href="/jobs/2">Staff Engineer</a>"#;
    let renderer = FakeRenderer::default().with_page("https://acme.example/careers", html);
    let extractor = extractor(renderer);

    let postings = extractor
        .extract(
            &source("rendered", "https://acme.example/careers"),
            SourceKind::Rendered,
        )
        .await
        .unwrap();

    assert_eq!(postings.len(), 2);
    assert!(postings.iter().all(|p| p.company == "Acme"));
}

#[tokio::test]
async fn explicit_filter_applies_to_rendered_source() {
    let html = r#"
        <a href="/jobs/1">Senior Product Manager</a>
        <a href="/jobs/2">Staff Engineer</a>"#;
    let renderer = FakeRenderer::default().with_page("https://acme.example/careers", html);
    let extractor = extractor(renderer);

    let mut src = source("rendered", "https://acme.example/careers");
    src.title_filter = Some(TitleFilter::ProductManager);
    let postings = extractor.extract(&src, SourceKind::Rendered).await.unwrap();

    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].title, "Senior Product Manager");
}

#[tokio::test]
async fn render_failure_fails_the_source() {
    let extractor = extractor(FakeRenderer::default());
    let err = extractor
        .extract(
            &source("rendered", "https://acme.example/careers"),
            SourceKind::Rendered,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::Render { .. }));
}

// ---------------------------------------------------------------------------
// FacetWP sources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn facetwp_walks_every_advertised_page() {
    let renderer = FakeRenderer::default()
        .with_page(
            LISTING,
            &facetwp_page(&[("/jobs/pm-1/", "Product Manager One")], 3),
        )
        .with_page(
            "https://careers.acme.example/jobs/?fwp_paged=2",
            &facetwp_page(&[("/jobs/pm-2/", "Product Manager Two")], 3),
        )
        .with_page(
            "https://careers.acme.example/jobs/?fwp_paged=3",
            &facetwp_page(
                &[
                    ("/jobs/pm-3/", "Product Manager Three"),
                    ("/jobs/pm-1/", "Product Manager One"),
                ],
                3,
            ),
        );
    let extractor = extractor(renderer);

    let postings = extractor
        .extract(&source("facetwp", LISTING), SourceKind::Facetwp)
        .await
        .unwrap();

    let ids: Vec<&str> = postings.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "pm-1-product-manager-one",
            "pm-2-product-manager-two",
            "pm-3-product-manager-three",
        ]
    );
    assert_eq!(extractor.renderer.requested().len(), 3);
}

#[tokio::test]
async fn facetwp_keeps_earlier_pages_when_a_later_page_fails() {
    let renderer = FakeRenderer::default()
        .with_page(
            LISTING,
            &facetwp_page(&[("/jobs/pm-1/", "Product Manager One")], 4),
        )
        .with_page(
            "https://careers.acme.example/jobs/?fwp_paged=2",
            &facetwp_page(&[("/jobs/pm-2/", "Product Manager Two")], 4),
        );
    let extractor = extractor(renderer);

    let postings = extractor
        .extract(&source("facetwp", LISTING), SourceKind::Facetwp)
        .await
        .unwrap();

    assert_eq!(postings.len(), 2);
    // Page 3 failed, so page 4 is never requested.
    assert_eq!(extractor.renderer.requested().len(), 3);
}

#[tokio::test]
async fn facetwp_first_page_failure_fails_the_source() {
    let extractor = extractor(FakeRenderer::default());
    let err = extractor
        .extract(&source("facetwp", LISTING), SourceKind::Facetwp)
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::Render { .. }));
}

#[tokio::test]
async fn facetwp_extraction_is_repeatable() {
    let renderer = FakeRenderer::default()
        .with_page(
            LISTING,
            &facetwp_page(
                &[
                    ("/jobs/pm-1/", "Product Manager One"),
                    ("/jobs/eng-1/", "Platform Engineer"),
                ],
                2,
            ),
        )
        .with_page(
            "https://careers.acme.example/jobs/?fwp_paged=2",
            &facetwp_page(&[("/jobs/pm-2/", "Product Manager Two")], 2),
        );
    let extractor = extractor(renderer);
    let src = source("facetwp", LISTING);

    let first = extractor.extract(&src, SourceKind::Facetwp).await.unwrap();
    let second = extractor.extract(&src, SourceKind::Facetwp).await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}
