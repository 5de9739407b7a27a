//! Language-model stages of the posting pipeline.
//!
//! Scores new postings against a fixed candidate rubric and classifies
//! ambiguous titles as PM or not, both through the Gemini `generateContent`
//! REST endpoint. Every failure degrades to a neutral result; nothing here
//! aborts a run.

pub mod classifier;
pub mod error;
pub mod gemini;
pub mod scorer;

mod retry;

pub use classifier::{GeminiClassifier, TitleClassifier};
pub use error::ModelError;
pub use gemini::GeminiClient;
pub use scorer::{parse_analysis, Analysis, GeminiScorer, PostingScorer};
