//! Digest body and subject formatting.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use pmwatch_core::ScoredPosting;

/// Body sent when no posting qualified and no source failed.
pub const NOTHING_NEW: &str = "No new PM listings today.";

const SEPARATOR: &str = "----------------------------------------";

/// `New PM Jobs – YYYY-MM-DD`
#[must_use]
pub fn subject_for(date: NaiveDate) -> String {
    format!("New PM Jobs – {}", date.format("%Y-%m-%d"))
}

/// Renders the digest body.
///
/// Postings are grouped under their company, companies in alphabetical order,
/// postings within a company in the order given. Source errors are listed
/// after the postings.
#[must_use]
pub fn render_digest(postings: &[ScoredPosting], errors: &[String]) -> String {
    if postings.is_empty() && errors.is_empty() {
        return NOTHING_NEW.to_owned();
    }

    let mut by_company: BTreeMap<&str, Vec<&ScoredPosting>> = BTreeMap::new();
    for scored in postings {
        by_company
            .entry(scored.posting.company.as_str())
            .or_default()
            .push(scored);
    }

    let mut body = String::new();
    for (company, group) in &by_company {
        let _ = writeln!(body, "{company}:\n");
        for scored in group {
            write_block(&mut body, scored);
        }
    }

    if !errors.is_empty() {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str("Errors encountered:\n");
        for error in errors {
            let _ = writeln!(body, "  • {error}");
        }
    }

    body.trim_end().to_owned()
}

fn write_block(body: &mut String, scored: &ScoredPosting) {
    let posting = &scored.posting;
    let location = if posting.location.trim().is_empty() {
        "Not specified"
    } else {
        posting.location.as_str()
    };

    let _ = writeln!(body, "Score: {}/10", scored.score);
    let _ = writeln!(body, "Title: {}", posting.title);
    let _ = writeln!(body, "Company: {}", posting.company);
    let _ = writeln!(body, "Location: {location}");
    let _ = writeln!(body, "Summary: {}", scored.summary);
    let _ = writeln!(body, "Why: {}", scored.reason);
    let _ = writeln!(body, "URL: {}", posting.url);
    let _ = writeln!(body, "{SEPARATOR}\n");
}
