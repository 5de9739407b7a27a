//! Response shapes for the public job-board APIs.
//!
//! Only the fields the extractors read are modelled; everything else in the
//! payloads is ignored. Missing or null fields default to empty so one odd
//! posting does not fail the whole board.

use serde::Deserialize;

/// Top-level response from `GET /v1/boards/{token}/jobs`.
#[derive(Debug, Deserialize)]
pub struct GreenhouseJobsResponse {
    #[serde(default)]
    pub jobs: Vec<GreenhouseJob>,
    #[serde(default)]
    pub meta: Option<GreenhouseMeta>,
}

#[derive(Debug, Deserialize)]
pub struct GreenhouseJob {
    /// Numeric in practice; kept loose so a string id still parses.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<GreenhouseLocation>,
    #[serde(default)]
    pub absolute_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GreenhouseLocation {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GreenhouseMeta {
    #[serde(default)]
    pub total: Option<u64>,
}

/// Top-level response from `GET /posting-public/job/list`.
#[derive(Debug, Deserialize)]
pub struct AshbyJobsResponse {
    #[serde(default)]
    pub jobs: Vec<AshbyJob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AshbyJob {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
}

/// Renders a board-assigned id as the string stored in the seen set.
///
/// A missing, null or blank id falls back to the posting URL. Returns `None`
/// when neither is usable.
pub(crate) fn posting_id(id: &serde_json::Value, url: &str) -> Option<String> {
    let raw = match id {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.trim().to_owned(),
        other => other.to_string(),
    };
    if !raw.is_empty() {
        return Some(raw);
    }
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_owned())
}
