//! Shared types and configuration for pmwatch.
//!
//! Holds the posting records every stage passes around, the source list
//! loader, environment configuration, the seen-id store and the title
//! relevance keywords.

pub mod app_config;
pub mod config;
pub mod posting;
pub mod relevance;
pub mod seen;
pub mod sources;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use posting::{JobPosting, ScoredPosting};
pub use relevance::{is_relevant_title, mentions_product_manager};
pub use seen::SeenStore;
pub use sources::{load_sources, SourceConfig, SourceKind, SourcesFile, TitleFilter};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation failed: {0}")]
    Validation(String),

    #[error("Unknown company type '{kind}' for {name}")]
    UnknownSourceType { name: String, kind: String },
}
