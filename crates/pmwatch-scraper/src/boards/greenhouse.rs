//! Greenhouse public boards API.

use pmwatch_core::JobPosting;

use super::types::{posting_id, GreenhouseJobsResponse};
use crate::client::BoardClient;
use crate::error::ScraperError;
use crate::pagination::{greenhouse_has_more, with_page_param, MAX_PAGES};

/// Fetches every job on the `board_token` board, following `page=N` while the
/// board reports more jobs than have been collected.
///
/// Ids are the board's numeric job ids rendered as strings. A job repeated on
/// a later page is kept once.
///
/// # Errors
///
/// Returns any [`ScraperError`] from the requests, or
/// [`ScraperError::PaginationLimit`] if the board never stops reporting more.
pub async fn fetch_greenhouse_jobs(
    client: &BoardClient,
    board_token: &str,
    company: &str,
) -> Result<Vec<JobPosting>, ScraperError> {
    let base = jobs_url(client.greenhouse_base(), board_token)?;
    let mut postings: Vec<JobPosting> = Vec::new();
    let mut page = 1usize;

    loop {
        if page > MAX_PAGES {
            return Err(ScraperError::PaginationLimit {
                url: base.to_string(),
                max_pages: MAX_PAGES,
            });
        }

        let url = if page == 1 {
            base.clone()
        } else {
            with_page_param(&base, "page", page)
        };

        let response: GreenhouseJobsResponse = client
            .get_json(url.as_str(), &format!("greenhouse board {board_token} page {page}"))
            .await?;

        let batch = response.jobs.len();
        for job in response.jobs {
            let url = job.absolute_url.unwrap_or_default();
            let Some(id) = posting_id(&job.id, &url) else {
                tracing::debug!(board_token, "skipping greenhouse job without id or url");
                continue;
            };
            if postings.iter().any(|p| p.id == id) {
                continue;
            }
            postings.push(JobPosting {
                id,
                title: job.title.unwrap_or_default(),
                company: company.to_owned(),
                location: job.location.and_then(|l| l.name).unwrap_or_default(),
                url,
            });
        }

        tracing::debug!(board_token, page, batch, total = postings.len(), "greenhouse page fetched");

        let total = response.meta.and_then(|m| m.total);
        if !greenhouse_has_more(postings.len(), total, batch) {
            break;
        }
        page += 1;
    }

    Ok(postings)
}

fn jobs_url(base: &str, board_token: &str) -> Result<reqwest::Url, ScraperError> {
    let raw = format!("{base}/v1/boards/{}/jobs", board_token.trim());
    let mut url = reqwest::Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("content", "true");
    Ok(url)
}
