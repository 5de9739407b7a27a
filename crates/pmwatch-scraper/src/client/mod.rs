//! HTTP client shared by the board API extractors and the static-page extractor.

mod origin;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;

pub(crate) use origin::{parse_page_url, resolve_href};

pub const GREENHOUSE_API_BASE: &str = "https://boards-api.greenhouse.io";
pub const ASHBY_API_BASE: &str = "https://api.ashbyhq.com";

/// HTTP client for job-board APIs and plain career pages.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Requests are not retried; a failed fetch fails its source
/// for this run and the next scheduled run tries again.
pub struct BoardClient {
    client: Client,
    greenhouse_base: String,
    ashby_base: String,
}

impl BoardClient {
    /// Creates a `BoardClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            greenhouse_base: GREENHOUSE_API_BASE.to_owned(),
            ashby_base: ASHBY_API_BASE.to_owned(),
        })
    }

    /// Points the Greenhouse and Ashby extractors at different hosts.
    #[must_use]
    pub fn with_base_urls(mut self, greenhouse_base: &str, ashby_base: &str) -> Self {
        self.greenhouse_base = greenhouse_base.trim_end_matches('/').to_owned();
        self.ashby_base = ashby_base.trim_end_matches('/').to_owned();
        self
    }

    pub(crate) fn greenhouse_base(&self) -> &str {
        &self.greenhouse_base
    }

    pub(crate) fn ashby_base(&self) -> &str {
        &self.ashby_base
    }

    /// Fetches `url` and deserializes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network or TLS failure.
    /// - [`ScraperError::Deserialize`]: response body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScraperError> {
        let body = self.get_text(url, "application/json").await?;
        serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Fetches `url` as an HTML document.
    ///
    /// # Errors
    ///
    /// Same status and transport errors as [`BoardClient::get_json`].
    pub async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        self.get_text(
            url,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .await
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited {
                domain: origin::extract_domain(url),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
