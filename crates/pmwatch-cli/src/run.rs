//! One monitoring run: extract every source, diff against the seen store,
//! filter and score new postings, send the digest, persist the store.

use std::path::Path;

use pmwatch_core::{is_relevant_title, JobPosting, ScoredPosting, SeenStore, SourceConfig};
use pmwatch_core::{SourceKind, TitleFilter};
use pmwatch_notify::Notifier;
use pmwatch_scorer::{PostingScorer, TitleClassifier};
use pmwatch_scraper::JobExtractor;

/// What the source loop produced for the digest.
#[derive(Debug, Default)]
pub(crate) struct RunOutcome {
    /// Postings at or above the score threshold, in source order.
    pub qualifying: Vec<ScoredPosting>,
    /// One line per failed source.
    pub errors: Vec<String>,
}

/// The stages a run is wired from.
pub(crate) struct Pipeline<'a, E, S, C> {
    pub extractor: &'a E,
    pub scorer: &'a S,
    pub classifier: &'a C,
    pub score_threshold: u8,
}

impl<E, S, C> Pipeline<'_, E, S, C>
where
    E: JobExtractor,
    S: PostingScorer,
    C: TitleClassifier,
{
    /// Processes `sources` in order, updating `seen` for every source that
    /// extracted successfully.
    ///
    /// A source's seen ids are replaced with every extracted id before
    /// relevance and score filtering, so a posting is judged once. Failed
    /// sources keep their previous ids.
    pub async fn process_sources(
        &self,
        sources: &[SourceConfig],
        seen: &mut SeenStore,
    ) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        for source in sources {
            let kind = match source.kind() {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "skipping source");
                    outcome.errors.push(e.to_string());
                    continue;
                }
            };

            let postings = match self.extractor.extract(source, kind).await {
                Ok(postings) => postings,
                Err(e) => {
                    tracing::error!(
                        source = %source.name,
                        %kind,
                        failure = e.class(),
                        error = %e,
                        "source failed"
                    );
                    outcome
                        .errors
                        .push(format!("Error processing {}: {e}", source.name));
                    continue;
                }
            };

            let fresh = seen.unseen(&source.name, &postings);
            seen.replace(&source.name, &postings);

            let relevant = self.relevant(source, kind, fresh).await;
            let mut kept = 0usize;
            for posting in relevant {
                let analysis = self.scorer.score_posting(&posting).await;
                if analysis.score >= self.score_threshold {
                    kept += 1;
                    outcome.qualifying.push(analysis.into_scored(posting));
                }
            }

            tracing::info!(
                source = %source.name,
                count = postings.len(),
                kept,
                "source processed"
            );
        }

        outcome
    }

    /// Title relevance for new postings from sources that defer filtering.
    async fn relevant(
        &self,
        source: &SourceConfig,
        kind: SourceKind,
        fresh: Vec<JobPosting>,
    ) -> Vec<JobPosting> {
        if source.title_filter_for(kind) != TitleFilter::Deferred {
            return fresh;
        }

        let mut relevant = Vec::with_capacity(fresh.len());
        for posting in fresh {
            if is_relevant_title(&posting.title)
                || (source.classify && self.classifier.is_pm_role(&posting.title).await)
            {
                relevant.push(posting);
            }
        }
        relevant
    }
}

/// Sends the digest, then persists the seen store whatever the delivery result.
///
/// # Errors
///
/// Returns an error if the seen store cannot be written.
pub(crate) async fn deliver_and_persist<N: Notifier>(
    notifier: &N,
    outcome: &RunOutcome,
    seen: &SeenStore,
    seen_path: &Path,
) -> anyhow::Result<bool> {
    let delivered = notifier
        .notify(&outcome.qualifying, &outcome.errors)
        .await;
    if !delivered {
        tracing::warn!("digest was not delivered; persisting seen store anyway");
    }

    seen.persist(seen_path).map_err(|e| {
        anyhow::anyhow!("failed to write seen store {}: {e}", seen_path.display())
    })?;
    tracing::info!(path = %seen_path.display(), companies = seen.companies().len(), "seen store saved");

    Ok(delivered)
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
