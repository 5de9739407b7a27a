//! Ashby public posting API.

use pmwatch_core::JobPosting;

use super::types::{posting_id, AshbyJobsResponse};
use crate::client::BoardClient;
use crate::error::ScraperError;

/// Fetches every posting on the Ashby board named `board_name`.
///
/// # Errors
///
/// Returns any [`ScraperError`] from the request or response decoding.
pub async fn fetch_ashby_jobs(
    client: &BoardClient,
    board_name: &str,
    company: &str,
) -> Result<Vec<JobPosting>, ScraperError> {
    let url = list_url(client.ashby_base(), board_name)?;
    let response: AshbyJobsResponse = client
        .get_json(url.as_str(), &format!("ashby board {board_name}"))
        .await?;

    Ok(response
        .jobs
        .into_iter()
        .filter_map(|job| {
            let url = job.job_url.unwrap_or_default();
            let Some(id) = posting_id(&job.id, &url) else {
                tracing::debug!(board_name, "skipping ashby job without id or url");
                return None;
            };
            Some(JobPosting {
                id,
                title: job.title.unwrap_or_default(),
                company: company.to_owned(),
                location: job.location_name.unwrap_or_default(),
                url,
            })
        })
        .collect())
}

fn list_url(base: &str, board_name: &str) -> Result<reqwest::Url, ScraperError> {
    let raw = format!("{base}/posting-public/job/list");
    let mut url = reqwest::Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("organizationHostedJobsPageName", board_name.trim());
    Ok(url)
}
