pub mod boards;
pub mod client;
pub mod error;
pub mod extract;
pub mod html;
pub mod pagination;
pub mod render;

pub use client::BoardClient;
pub use error::ScraperError;
pub use extract::{apply_title_filter, Extractor, JobExtractor};
pub use render::{ChromiumRenderer, Renderer};
