use super::*;

// ---------------------------------------------------------------------------
// slugify
// ---------------------------------------------------------------------------

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(
        slugify("Senior Product Manager, Platform"),
        "senior-product-manager-platform"
    );
}

#[test]
fn slugify_collapses_existing_hyphens_and_spaces() {
    assert_eq!(slugify("  Staff PM -- Growth  "), "staff-pm-growth");
}

#[test]
fn slugify_keeps_underscores_and_digits() {
    assert_eq!(slugify("PM_2 (AI/ML)"), "pm_2-aiml");
}

// ---------------------------------------------------------------------------
// generate_id
// ---------------------------------------------------------------------------

#[test]
fn generate_id_joins_path_and_title_slug() {
    assert_eq!(
        generate_id("https://acme.example/careers/pm-ai/", "Product Manager, AI"),
        "careers-pm-ai-product-manager-ai"
    );
}

#[test]
fn generate_id_uses_job_for_root_path() {
    assert_eq!(
        generate_id("https://acme.example/", "Product Manager"),
        "job-product-manager"
    );
}

#[test]
fn generate_id_truncates_slug_to_fifty_chars() {
    let title = "Principal Product Manager for Extremely Long Titles That Keep Going";
    let id = generate_id("https://acme.example/jobs/1", title);
    let slug = id.strip_prefix("jobs-1-").unwrap();
    assert_eq!(slug.chars().count(), 50);
}

#[test]
fn generate_id_is_stable() {
    let a = generate_id("https://acme.example/jobs/1", "Product Manager");
    let b = generate_id("https://acme.example/jobs/1", "Product Manager");
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// facetwp_id
// ---------------------------------------------------------------------------

#[test]
fn facetwp_id_uses_last_path_segment() {
    assert_eq!(
        facetwp_id(
            "https://careers.acme.example/jobs/senior-pm-12345/",
            "Senior PM (Remote)"
        ),
        "senior-pm-12345-senior-pm-remote"
    );
}

// ---------------------------------------------------------------------------
// extract_location
// ---------------------------------------------------------------------------

#[test]
fn location_prefers_remote_variants() {
    assert_eq!(extract_location("Remote - US"), "Remote - US");
    assert_eq!(extract_location("Fully remote (Americas)"), "remote (Americas)");
    assert_eq!(extract_location("San Francisco, CA or Remote"), "Remote");
}

#[test]
fn location_matches_city_state() {
    assert_eq!(extract_location("Team: Product · San Francisco, CA"), "San Francisco, CA");
}

#[test]
fn location_matches_city_country() {
    assert_eq!(extract_location("Based in Berlin, Germany"), "Berlin, Germany");
}

#[test]
fn location_empty_when_nothing_matches() {
    assert_eq!(extract_location("Apply now"), "");
}

#[test]
fn location_near_ignores_commas_inside_title() {
    let title = "Product Manager, Payments";
    assert_eq!(location_near("Product Manager, Payments\n  Apply", title), "");
    assert_eq!(
        location_near("Product Manager, Payments  New York, NY", title),
        "New York, NY"
    );
}

// ---------------------------------------------------------------------------
// collapse_whitespace
// ---------------------------------------------------------------------------

#[test]
fn collapse_whitespace_trims_and_joins() {
    assert_eq!(collapse_whitespace("  Product \n\t Manager  "), "Product Manager");
}
