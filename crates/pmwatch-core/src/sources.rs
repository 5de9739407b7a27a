use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The closed set of source shapes an extractor exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Greenhouse boards API (board token locator).
    Greenhouse,
    /// Ashby posting API (board token locator).
    Ashby,
    /// Plain HTTP fetch plus DOM-proximity heuristics (URL locator).
    Static,
    /// Headless-browser render plus anchor scan (URL locator).
    Rendered,
    /// FacetWP paginated listing rendered in a headless browser (URL locator).
    Facetwp,
}

impl SourceKind {
    /// Resolve a configured `type` string. Returns `None` for unknown values.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "greenhouse" => Some(Self::Greenhouse),
            "ashby" => Some(Self::Ashby),
            "static" => Some(Self::Static),
            "rendered" | "playwright" => Some(Self::Rendered),
            "facetwp" => Some(Self::Facetwp),
            _ => None,
        }
    }

    /// Title policy applied when a source does not set one explicitly.
    #[must_use]
    pub fn default_title_filter(self) -> TitleFilter {
        match self {
            Self::Greenhouse => TitleFilter::Keywords,
            Self::Ashby => TitleFilter::ProductManager,
            // Both static strategies select on the phrase themselves; the
            // link fallback also accepts href-only matches.
            Self::Static => TitleFilter::None,
            Self::Rendered | Self::Facetwp => TitleFilter::Deferred,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Greenhouse => write!(f, "greenhouse"),
            SourceKind::Ashby => write!(f, "ashby"),
            SourceKind::Static => write!(f, "static"),
            SourceKind::Rendered => write!(f, "rendered"),
            SourceKind::Facetwp => write!(f, "facetwp"),
        }
    }
}

/// Where title relevance filtering happens for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleFilter {
    /// Extractor keeps titles matching any PM keyword.
    Keywords,
    /// Extractor keeps titles containing "product manager".
    ProductManager,
    /// Extractor keeps everything; the relevance stage filters new postings.
    Deferred,
    /// No title filtering at all.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Company name; also the seen-store key.
    pub name: String,
    /// Raw source type. Resolved with [`SourceConfig::kind`] at run time so an
    /// unknown value fails only that source.
    #[serde(rename = "type")]
    pub kind: String,
    /// Board token or full URL, depending on the type.
    pub locator: String,
    #[serde(default)]
    pub title_filter: Option<TitleFilter>,
    /// Send keyword misses to the title classifier (deferred sources only).
    #[serde(default)]
    pub classify: bool,
}

impl SourceConfig {
    /// Resolve the configured type string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSourceType`] for unrecognised types.
    pub fn kind(&self) -> Result<SourceKind, ConfigError> {
        SourceKind::parse(&self.kind).ok_or_else(|| ConfigError::UnknownSourceType {
            name: self.name.clone(),
            kind: self.kind.clone(),
        })
    }

    /// The explicit title policy, or the kind's default.
    #[must_use]
    pub fn title_filter_for(&self, kind: SourceKind) -> TitleFilter {
        self.title_filter
            .unwrap_or_else(|| kind.default_title_filter())
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

/// Load and validate the sources configuration from a YAML file.
///
/// Source types are not validated here; see [`SourceConfig::kind`].
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        if source.locator.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty locator",
                source.name
            )));
        }

        // Names key the seen store, so two entries sharing one would clobber
        // each other's id sets.
        if !seen_names.insert(source.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
