use serde::{Deserialize, Serialize};

/// A job posting extracted from one company's careers source.
///
/// `id` is the identity across runs: a posting whose title text drifts but
/// whose id is unchanged is still the same posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Source-native id, or a slug derived from URL path and title.
    pub id: String,
    pub title: String,
    pub company: String,
    /// Free-form location; empty when the source gives none.
    pub location: String,
    pub url: String,
}

/// A posting with the model's judgment attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPosting {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// Fit score on a 1–10 scale.
    pub score: u8,
    pub reason: String,
    pub summary: String,
}

impl ScoredPosting {
    #[must_use]
    pub fn new(posting: JobPosting, score: u8, reason: String, summary: String) -> Self {
        Self {
            posting,
            score,
            reason,
            summary,
        }
    }
}
