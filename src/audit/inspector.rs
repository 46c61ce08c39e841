//! Page inspection seam.
//!
//! The engine never touches a live DOM. It hands a [`FactsQuery`] to a [`PageInspector`]
//! and scores whatever [`PageFacts`] come back. [`SnapshotInspector`] replays a captured
//! page from JSON.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::facts::{FactsQuery, PageFacts};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectionError {
    #[error("page inspector unavailable: {0}")]
    Unavailable(String),
    #[error("inspection script raised an exception: {0}")]
    Script(String),
    #[error("page inspection timed out after {millis}ms")]
    TimedOut { millis: u128 },
    #[error("page inspection returned no facts")]
    Empty,
}

/// Capability that answers a facts query against one loaded page.
#[async_trait]
pub trait PageInspector: Send + Sync {
    /// Captures every requested group from a single page state.
    async fn evaluate(&self, query: &FactsQuery) -> Result<PageFacts, InspectionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read page snapshot {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("page snapshot is not valid facts JSON")]
    Parse(#[from] serde_json::Error),
}

/// Serves a previously captured page.
#[derive(Debug, Clone)]
pub struct SnapshotInspector {
    facts: PageFacts,
}

impl SnapshotInspector {
    pub fn new(facts: PageFacts) -> Self {
        Self { facts }
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let facts = serde_json::from_str(raw)?;
        Ok(Self::new(facts))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&raw)
    }

    pub fn facts(&self) -> &PageFacts {
        &self.facts
    }
}

#[async_trait]
impl PageInspector for SnapshotInspector {
    async fn evaluate(&self, query: &FactsQuery) -> Result<PageFacts, InspectionError> {
        debug!(groups = query.groups.len(), "serving facts from snapshot");
        Ok(self.facts.restricted_to(query))
    }
}
