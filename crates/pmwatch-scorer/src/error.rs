use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by model {model}")]
    RateLimited { model: String },

    #[error("unexpected HTTP status {status} from model {model}")]
    UnexpectedStatus { status: u16, model: String },

    #[error("malformed model reply: {0}")]
    MalformedReply(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingCredential,
}
