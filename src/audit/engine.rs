use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::domain::Device;
use super::inspector::{InspectionError, PageInspector};
use super::registry::{ProfileEntry, ProfileRegistry, RegistryError};
use super::report::AuditReport;
use crate::config::AuditConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    UnknownProfile(#[from] RegistryError),
    #[error("audit run {generation} was superseded by a newer run")]
    Superseded { generation: u64 },
}

pub type Clock = fn() -> DateTime<Utc>;

/// Runs one profile against one inspector: a single bounded facts query, then the check.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    registry: ProfileRegistry,
    config: AuditConfig,
    clock: Clock,
}

impl AuditEngine {
    pub fn new(registry: ProfileRegistry, config: AuditConfig) -> Self {
        Self {
            registry,
            config,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }


    pub async fn audit(
        &self,
        inspector: &dyn PageInspector,
        profile_id: &str,
        device: Device,
    ) -> Result<AuditReport, AuditError> {
        let entry = self.registry.lookup(profile_id)?;
        Ok(self.run(inspector, entry, device).await)
    }

    /// Inspection failures never escape: they become the failure report.
    pub async fn run(
        &self,
        inspector: &dyn PageInspector,
        entry: &ProfileEntry,
        device: Device,
    ) -> AuditReport {
        let profile = &entry.profile;
        match self.inspect(inspector, entry).await {
            Ok(facts) => {
                let output = entry.run(&facts);
                debug!(
                    metrics = output.metrics.len(),
                    diagnostics = output.diagnostics.len(),
                    "checks completed"
                );
                AuditReport::assemble(profile, device, output, (self.clock)())
            }
            Err(err) => {
                warn!(profile = %profile.id, error = %err, "page inspection failed");
                AuditReport::failed(profile, device, err.to_string(), (self.clock)())
            }
        }
    }

    async fn inspect(
        &self,
        inspector: &dyn PageInspector,
        entry: &ProfileEntry,
    ) -> Result<super::facts::PageFacts, InspectionError> {
        let query = entry.query();
        let limit = self.config.inspection_timeout;
        let facts = timeout(limit, inspector.evaluate(&query))
            .await
            .map_err(|_| InspectionError::TimedOut {
                millis: limit.as_millis(),
            })??;

        if facts.answers_nothing(&query) {
            return Err(InspectionError::Empty);
        }
        Ok(facts)
    }
}
