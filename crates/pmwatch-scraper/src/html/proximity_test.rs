use super::*;

const PAGE_URL: &str = "https://acme.example/careers/";

#[test]
fn finds_anchor_wrapping_title_text() {
    let html = r#"
        <ul>
          <li><a href="/careers/senior-pm">Senior Product Manager</a> <span>San Francisco, CA</span></li>
          <li><a href="/careers/designer">Product Designer</a></li>
        </ul>"#;

    let postings = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    assert_eq!(postings.len(), 1);
    let p = &postings[0];
    assert_eq!(p.title, "Senior Product Manager");
    assert_eq!(p.url, "https://acme.example/careers/senior-pm");
    assert_eq!(p.company, "Acme");
    assert_eq!(p.id, "careers-senior-pm-senior-product-manager");
    assert_eq!(p.location, "San Francisco, CA");
}

#[test]
fn finds_sibling_anchor_and_uses_heading_title() {
    let html = r#"
        <div class="job">
          <h3>Staff Product Manager</h3>
          <a href="/apply/123">View</a>
          <p>Remote - US</p>
        </div>"#;

    let postings = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].title, "Staff Product Manager");
    assert_eq!(postings[0].url, "https://acme.example/apply/123");
}

#[test]
fn deduplicates_by_id() {
    let html = r#"
        <a href="/jobs/pm">Product Manager</a>
        <a href="/jobs/pm">Product Manager</a>"#;

    let postings = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    assert_eq!(postings.len(), 1);
}

#[test]
fn falls_back_to_links_with_pm_in_href() {
    let html = r#"
        <nav><a href="/openings/product-manager-growth">Growth Lead Role</a></nav>"#;

    let postings = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].title, "Growth Lead Role");
    assert_eq!(
        postings[0].url,
        "https://acme.example/openings/product-manager-growth"
    );
}

#[test]
fn ignores_pm_text_without_any_link() {
    let html = "<p>We are always looking for a great product manager.</p>";
    let postings = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    assert!(postings.is_empty());
}

#[test]
fn rejects_relative_page_url() {
    let err = extract_static_postings("<p></p>", "careers", "Acme").unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUrl { .. }));
}

#[test]
fn href_match_accepts_slug_separators() {
    assert!(href_mentions_product_manager("/jobs/senior-product-manager"));
    assert!(href_mentions_product_manager("/jobs/product_manager"));
    assert!(!href_mentions_product_manager("/jobs/product-designer"));
}

#[test]
fn same_page_yields_same_postings() {
    let html = r#"
        <section>
          <div class="job"><h3>Senior Product Manager, Billing</h3><a href="/careers/billing">View</a><p>Berlin, Germany</p></div>
          <div class="job"><a href="/careers/pm-growth">Product Manager, Growth</a><span>Remote - EU</span></div>
          <div class="job"><a href="/careers/eng">Staff Engineer</a></div>
        </section>"#;

    let first = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    let second = extract_static_postings(html, PAGE_URL, "Acme").unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn same_page_yields_same_fallback_postings() {
    let html = r#"<nav><a href="/openings/product-manager-ai">AI Roles Team</a></nav>"#;

    let first = extract_static_postings(html, PAGE_URL, "Acme").unwrap();
    let second = extract_static_postings(html, PAGE_URL, "Acme").unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}
