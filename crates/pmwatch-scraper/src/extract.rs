//! Dispatch from a configured source to the extractor for its kind.

use std::future::Future;

use pmwatch_core::{is_relevant_title, mentions_product_manager, JobPosting};
use pmwatch_core::{SourceConfig, SourceKind, TitleFilter};

use crate::boards::{fetch_ashby_jobs, fetch_greenhouse_jobs};
use crate::client::{parse_page_url, BoardClient};
use crate::error::ScraperError;
use crate::html::proximity::push_unique;
use crate::html::{extract_rendered_postings, extract_static_postings, facetwp};
use crate::pagination::{with_page_param, FACETWP_PAGE_PARAM, MAX_PAGES};
use crate::render::Renderer;

/// Turns one configured source into its current list of postings.
pub trait JobExtractor {
    /// Extracts postings for `source`, whose type has already been resolved
    /// to `kind`. The source's title filter has been applied to the result.
    fn extract(
        &self,
        source: &SourceConfig,
        kind: SourceKind,
    ) -> impl Future<Output = Result<Vec<JobPosting>, ScraperError>>;
}

/// Extractor backed by live HTTP fetches and a page renderer.
pub struct Extractor<R> {
    client: BoardClient,
    renderer: R,
}

impl<R: Renderer> Extractor<R> {
    #[must_use]
    pub fn new(client: BoardClient, renderer: R) -> Self {
        Self { client, renderer }
    }

    /// Renders a FacetWP listing page by page.
    ///
    /// A failure on the first page fails the source. A failure on a later page
    /// stops pagination and keeps what was collected so far.
    async fn facetwp_postings(
        &self,
        url: &str,
        company: &str,
    ) -> Result<Vec<JobPosting>, ScraperError> {
        let base = parse_page_url(url)?;
        let first = self.renderer.render(url).await?;

        let mut pages = facetwp::last_page(&first);
        if pages > MAX_PAGES {
            tracing::warn!(company, pages, max_pages = MAX_PAGES, "facetwp pager capped");
            pages = MAX_PAGES;
        }

        let mut postings = Vec::new();
        merge_unique(&mut postings, facetwp::parse_template(&first, url, company)?);

        for page in 2..=pages {
            let page_url = with_page_param(&base, FACETWP_PAGE_PARAM, page);
            let batch = match self.renderer.render(page_url.as_str()).await {
                Ok(html) => facetwp::parse_template(&html, url, company),
                Err(e) => Err(e),
            };
            match batch {
                Ok(batch) => merge_unique(&mut postings, batch),
                Err(e) => {
                    tracing::warn!(company, page, error = %e, "facetwp page failed; keeping earlier pages");
                    break;
                }
            }
        }

        tracing::debug!(company, pages, postings = postings.len(), "facetwp listing walked");
        Ok(postings)
    }
}

impl<R: Renderer> JobExtractor for Extractor<R> {
    async fn extract(
        &self,
        source: &SourceConfig,
        kind: SourceKind,
    ) -> Result<Vec<JobPosting>, ScraperError> {
        let company = source.name.as_str();
        let locator = source.locator.trim();

        let postings = match kind {
            SourceKind::Greenhouse => fetch_greenhouse_jobs(&self.client, locator, company).await?,
            SourceKind::Ashby => fetch_ashby_jobs(&self.client, locator, company).await?,
            SourceKind::Static => {
                let html = self.client.get_html(locator).await?;
                extract_static_postings(&html, locator, company)?
            }
            SourceKind::Rendered => {
                let html = self.renderer.render(locator).await?;
                extract_rendered_postings(&html, locator, company)?
            }
            SourceKind::Facetwp => self.facetwp_postings(locator, company).await?,
        };

        let extracted = postings.len();
        let filter = source.title_filter_for(kind);
        let kept = apply_title_filter(postings, filter);
        tracing::debug!(company, %kind, extracted, kept = kept.len(), ?filter, "source extracted");
        Ok(kept)
    }
}

/// Drops postings whose titles fail `filter`. Deferred and disabled filters
/// keep everything.
#[must_use]
pub fn apply_title_filter(postings: Vec<JobPosting>, filter: TitleFilter) -> Vec<JobPosting> {
    match filter {
        TitleFilter::Keywords => postings
            .into_iter()
            .filter(|p| is_relevant_title(&p.title))
            .collect(),
        TitleFilter::ProductManager => postings
            .into_iter()
            .filter(|p| mentions_product_manager(&p.title))
            .collect(),
        TitleFilter::Deferred | TitleFilter::None => postings,
    }
}

fn merge_unique(postings: &mut Vec<JobPosting>, batch: Vec<JobPosting>) {
    for posting in batch {
        push_unique(postings, posting);
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
