//! Persisted record of posting ids observed per company.
//!
//! The store is loaded once at run start, mutated in memory while sources are
//! processed, and written back once at the end. Each company's id list is
//! replaced wholesale after a successful scrape and left untouched otherwise.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::posting::JobPosting;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenStore {
    companies: BTreeMap<String, Vec<String>>,
}

impl SeenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the store from `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and also yields an empty store, so the run proceeds as if every
    /// posting were new.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no seen store yet; starting empty");
                return Self::new();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read seen store");
                return Self::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, Vec<String>>>(&content) {
            Ok(companies) => Self { companies },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "seen store is corrupt; starting empty");
                Self::new()
            }
        }
    }

    /// Write the store to `path` as pretty-printed JSON.
    ///
    /// The JSON is written to a sibling temp file first and renamed over the
    /// target, so a crash mid-write never leaves a truncated store.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing or renaming the file.
    pub fn persist(&self, path: &Path) -> std::io::Result<()> {
        let body = serde_json::to_string_pretty(&self.companies).map_err(std::io::Error::other)?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = std::path::PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, body)?;
        std::fs::rename(&tmp_path, path)
    }

    /// Ids recorded for `company`, empty when the company was never scraped.
    #[must_use]
    pub fn ids(&self, company: &str) -> &[String] {
        self.companies
            .get(company)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Postings from `postings` whose ids are not recorded for `company`.
    #[must_use]
    pub fn unseen(&self, company: &str, postings: &[JobPosting]) -> Vec<JobPosting> {
        let seen: HashSet<&str> = self.ids(company).iter().map(String::as_str).collect();
        postings
            .iter()
            .filter(|p| !seen.contains(p.id.as_str()))
            .cloned()
            .collect()
    }

    /// Replace the ids for `company` with the ids of `postings`, in order.
    pub fn replace(&mut self, company: &str, postings: &[JobPosting]) {
        let ids = postings.iter().map(|p| p.id.clone()).collect();
        self.companies.insert(company.to_string(), ids);
    }

    #[must_use]
    pub fn companies(&self) -> &BTreeMap<String, Vec<String>> {
        &self.companies
    }
}
