//! Fit scoring of postings against the candidate rubric.

use std::future::Future;
use std::time::Duration;

use pmwatch_core::{JobPosting, ScoredPosting};
use serde_json::Value;

use crate::error::ModelError;
use crate::gemini::GeminiClient;
use crate::retry::retry_rate_limited;

pub const DEFAULT_SCORE: u8 = 5;
pub const UNAVAILABLE_REASON: &str = "Analysis unavailable";

const MAX_REASON_CHARS: usize = 200;
const MAX_SUMMARY_CHARS: usize = 500;

const CANDIDATE_PROFILE: &str = "\
You are evaluating PM job listings for a candidate with this profile:
- Targeting: Staff PM, Principal PM, Senior PM (in that order)
- Domains wanted: AI/ML Platforms, Agentic AI, B2B/Enterprise SaaS, Customer Experience/CRM Tech, Internal Developer/Workflow Tools
- Domains to avoid: Hardware, Consumer Social, Marketing/Growth-only roles
- Location: SF Bay Area hybrid/on-site OR Remote
- Strong yes: roles requiring builder mindset, Python/Swift prototyping, P&L ownership, technical depth in data/SQL/architecture
- Hard no: environments where PMs are blocked from data, SQL, system design
- Company stage: Scaleup (Series B to Pre-IPO) or Enterprise; open to well-funded AI seed/series A";

/// The model's judgment of one posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Fit on a 1–10 scale.
    pub score: u8,
    pub reason: String,
    pub summary: String,
}

impl Analysis {
    /// Neutral result used whenever the model cannot be consulted.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            score: DEFAULT_SCORE,
            reason: UNAVAILABLE_REASON.to_owned(),
            summary: String::new(),
        }
    }

    #[must_use]
    pub fn into_scored(self, posting: JobPosting) -> ScoredPosting {
        ScoredPosting::new(posting, self.score, self.reason, self.summary)
    }
}

/// Rates a posting for the candidate. Never fails; degraded calls yield
/// [`Analysis::unavailable`].
pub trait PostingScorer {
    fn score_posting(&self, posting: &JobPosting) -> impl Future<Output = Analysis>;
}

/// [`PostingScorer`] backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiScorer {
    client: GeminiClient,
    model: String,
    rate_limit_delay: Duration,
}

impl GeminiScorer {
    #[must_use]
    pub fn new(client: GeminiClient, model: &str, rate_limit_delay: Duration) -> Self {
        Self {
            client,
            model: model.to_owned(),
            rate_limit_delay,
        }
    }

    async fn request(&self, posting: &JobPosting) -> Result<Analysis, ModelError> {
        let prompt = build_prompt(posting);
        let reply = retry_rate_limited(1, self.rate_limit_delay, || {
            self.client.generate(&self.model, &prompt)
        })
        .await?;
        parse_analysis(&reply)
    }
}

impl PostingScorer for GeminiScorer {
    async fn score_posting(&self, posting: &JobPosting) -> Analysis {
        if !self.client.has_credential() {
            tracing::debug!(id = %posting.id, "no model credential; using neutral score");
            return Analysis::unavailable();
        }

        match self.request(posting).await {
            Ok(analysis) => {
                tracing::debug!(
                    company = %posting.company,
                    id = %posting.id,
                    score = analysis.score,
                    "posting scored"
                );
                analysis
            }
            Err(e) => {
                tracing::warn!(
                    company = %posting.company,
                    id = %posting.id,
                    error = %e,
                    "scoring failed; using neutral score"
                );
                Analysis::unavailable()
            }
        }
    }
}

/// Prompt sent for one posting. Only title, company and location are shown
/// to the model.
#[must_use]
pub fn build_prompt(posting: &JobPosting) -> String {
    let location = if posting.location.trim().is_empty() {
        "Not specified"
    } else {
        posting.location.as_str()
    };

    format!(
        "{CANDIDATE_PROFILE}

Evaluate this job listing based ONLY on the job title, company name, and location:
- Job Title: {title}
- Company: {company}
- Location: {location}

Return ONLY a JSON object with exactly these keys:
{{
    \"score\": <integer 1-10>,
    \"reason\": <one sentence max 20 words>,
    \"summary\": <two sentences describing the role based on title and company>
}}",
        title = posting.title,
        company = posting.company,
    )
}

/// Removes a surrounding Markdown code fence, preferring a `json` fence.
fn strip_fences(reply: &str) -> &str {
    let reply = reply.trim();
    let inner = if let Some((_, rest)) = reply.split_once("```json") {
        rest
    } else if let Some((_, rest)) = reply.split_once("```") {
        rest
    } else {
        return reply;
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn text_field(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn score_field(value: Option<&Value>) -> Result<u8, ModelError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_SCORE),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| ModelError::MalformedReply(format!("score {n} is not numeric")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| ModelError::MalformedReply(format!("score {s:?}: {e}")))?,
        Some(other) => {
            return Err(ModelError::MalformedReply(format!(
                "score has unexpected type: {other}"
            )))
        }
    };
    Ok(u8::try_from(raw.clamp(1, 10)).unwrap_or(DEFAULT_SCORE))
}

/// Decodes a model reply into an [`Analysis`].
///
/// Accepts the JSON object bare or inside a Markdown code fence. Missing keys
/// fall back to the neutral values; the score is clamped into 1..=10 and the
/// reason and summary are truncated to 200 and 500 characters.
///
/// # Errors
///
/// Returns [`ModelError::MalformedReply`] if the reply is not a JSON object or
/// the score is not a number.
pub fn parse_analysis(reply: &str) -> Result<Analysis, ModelError> {
    let body = strip_fences(reply);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ModelError::MalformedReply(format!("reply is not JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(ModelError::MalformedReply(
            "reply is not a JSON object".to_owned(),
        ));
    };

    Ok(Analysis {
        score: score_field(fields.get("score"))?,
        reason: truncate_chars(
            &text_field(fields.get("reason"), UNAVAILABLE_REASON),
            MAX_REASON_CHARS,
        ),
        summary: truncate_chars(&text_field(fields.get("summary"), ""), MAX_SUMMARY_CHARS),
    })
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
