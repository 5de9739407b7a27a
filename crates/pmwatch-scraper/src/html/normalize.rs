//! Text and identity helpers shared by the HTML extractors.
//!
//! Postings scraped from HTML carry no board-assigned id, so one is derived
//! from the posting URL and title. The derivation must stay stable across
//! runs or every posting would look new again.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

/// Titles shorter than this are treated as navigation noise ("Apply", "Jobs").
pub(crate) const MIN_TITLE_CHARS: usize = 5;

/// Maximum number of characters of the title slug kept in a derived id.
const MAX_SLUG_CHARS: usize = 50;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid slug strip regex"));
static SLUG_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid slug join regex"));
static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid alnum regex"));

static REMOTE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Remote\s*[–-]\s*\w+|Remote\s*\([^)]+\)|Remote)")
        .expect("valid remote location regex")
});
static CITY_STATE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2})\b")
        .expect("valid city/state location regex")
});
static CITY_COUNTRY_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z][a-z]+)")
        .expect("valid city/country location regex")
});

/// Collapses runs of whitespace to single spaces and trims the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Visible text of an element with whitespace collapsed.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&joined)
}

/// Lowercases `text`, drops punctuation, and joins words with hyphens.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    let joined = SLUG_JOIN.replace_all(&stripped, "-");
    joined.trim_matches('-').to_owned()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Derives a posting id from its URL path and title.
///
/// The path has its slashes trimmed and inner slashes turned into hyphens
/// (`job` when the path is empty), followed by the first 50 characters of the
/// title slug.
#[must_use]
pub fn generate_id(url: &str, title: &str) -> String {
    let path = reqwest::Url::parse(url)
        .map(|u| u.path().to_owned())
        .unwrap_or_default();
    let path_part = path.trim_matches('/').replace('/', "-");
    let path_part = if path_part.is_empty() {
        "job".to_owned()
    } else {
        path_part
    };
    format!(
        "{path_part}-{}",
        truncate_chars(&slugify(title), MAX_SLUG_CHARS)
    )
}

/// Derives a FacetWP posting id from the last URL path segment and the title.
#[must_use]
pub fn facetwp_id(url: &str, title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_ALNUM.replace_all(&lowered, "-");
    let slug = truncate_chars(slug.trim_matches('-'), MAX_SLUG_CHARS);
    let last_segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    format!("{last_segment}-{slug}")
}

/// Best-effort location lookup in free text near a posting link.
///
/// Tries remote variants first, then `City, ST`, then `City, Country`; the
/// first pattern that matches wins. Returns an empty string when nothing
/// matches.
#[must_use]
pub fn extract_location(text: &str) -> String {
    [&*REMOTE_LOCATION, &*CITY_STATE_LOCATION, &*CITY_COUNTRY_LOCATION]
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .unwrap_or_default()
}

/// Location lookup over the text surrounding a link, minus the link title.
///
/// Titles like "Product Manager, Payments" would otherwise read as a
/// `City, Country` location.
#[must_use]
pub fn location_near(context: &str, title: &str) -> String {
    let context = collapse_whitespace(context);
    if title.is_empty() {
        return extract_location(&context);
    }
    extract_location(&context.replace(title, " "))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
