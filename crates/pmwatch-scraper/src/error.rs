use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain}")]
    RateLimited { domain: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("pagination limit reached for {url}: exceeded {max_pages} pages")]
    PaginationLimit { url: String, max_pages: usize },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("render failed for {url}: {reason}")]
    Render { url: String, reason: String },
}

impl ScraperError {
    /// Short failure class used as a structured log field.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Http(_)
            | Self::RateLimited { .. }
            | Self::NotFound { .. }
            | Self::UnexpectedStatus { .. } => "fetch",
            Self::Deserialize { .. } | Self::InvalidUrl { .. } => "parse",
            Self::PaginationLimit { .. } => "pagination",
            Self::Render { .. } => "render",
        }
    }
}
