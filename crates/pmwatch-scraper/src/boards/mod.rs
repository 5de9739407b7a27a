//! Extractors for hosted job-board APIs.

mod ashby;
mod greenhouse;
pub mod types;

pub use ashby::fetch_ashby_jobs;
pub use greenhouse::fetch_greenhouse_jobs;
