//! Title keyword matching for Product-Manager roles.

/// Phrases that mark a title as PM or PM-adjacent.
pub const PM_TITLE_KEYWORDS: &[&str] = &[
    "product manager",
    "platform manager",
    "product lead",
    "group product",
    "staff product",
    "head of product",
    "director of product",
];

/// Returns `true` when the lowercased title contains any PM keyword.
#[must_use]
pub fn is_relevant_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    PM_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Narrower check used by sources that only accept the literal phrase.
#[must_use]
pub fn mentions_product_manager(title: &str) -> bool {
    title.to_lowercase().contains("product manager")
}
