//! YES/NO classification of job titles that miss the PM keyword list.

use std::future::Future;

use crate::gemini::GeminiClient;

/// Decides whether a title is a Product Management role.
pub trait TitleClassifier {
    /// Returns `true` only on a positive answer; every failure is `false`.
    fn is_pm_role(&self, title: &str) -> impl Future<Output = bool>;
}

/// [`TitleClassifier`] backed by a lightweight Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    client: GeminiClient,
    model: String,
}

impl GeminiClassifier {
    #[must_use]
    pub fn new(client: GeminiClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_owned(),
        }
    }
}

/// Prompt asking for a bare YES or NO about `title`.
#[must_use]
pub fn build_prompt(title: &str) -> String {
    format!(
        "Is this job title a Product Management role or closely related \
         (e.g. Product Manager, Product Lead, Group PM, Head of Product, \
         Director of Product, Staff PM)? Reply with only YES or NO.\n\nTitle: {title}"
    )
}

/// `true` when the uppercased reply contains `YES`.
#[must_use]
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_uppercase().contains("YES")
}

impl TitleClassifier for GeminiClassifier {
    async fn is_pm_role(&self, title: &str) -> bool {
        if !self.client.has_credential() {
            tracing::warn!(title, "no model credential; title classified as not PM");
            return false;
        }

        match self.client.generate(&self.model, &build_prompt(title)).await {
            Ok(reply) => {
                let verdict = is_affirmative(&reply);
                tracing::debug!(title, verdict, "title classified");
                verdict
            }
            Err(e) => {
                let short: String = title.chars().take(50).collect();
                tracing::warn!(title = %short, error = %e, "title classification failed");
                false
            }
        }
    }
}
