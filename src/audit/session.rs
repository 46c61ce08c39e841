use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, Instrument};

use super::domain::Device;
use super::engine::{AuditEngine, AuditError};
use super::inspector::PageInspector;
use super::report::AuditReport;
use crate::telemetry;

struct LiveReport {
    generation: u64,
    report: Arc<AuditReport>,
}

/// Owns the inspector and the single live report. The most recently started run wins.
pub struct AuditSession {
    inspector: Arc<dyn PageInspector>,
    engine: AuditEngine,
    generation: AtomicU64,
    live: Mutex<Option<LiveReport>>,
}

impl AuditSession {
    pub fn new(inspector: Arc<dyn PageInspector>, engine: AuditEngine) -> Self {
        Self {
            inspector,
            engine,
            generation: AtomicU64::new(0),
            live: Mutex::new(None),
        }
    }

    pub fn engine(&self) -> &AuditEngine {
        &self.engine
    }

    /// Generation stamped on the most recently started run.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn run_audit(
        &self,
        profile_id: &str,
        device: Device,
    ) -> Result<Arc<AuditReport>, AuditError> {
        let entry = self.engine.registry().lookup(profile_id)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = telemetry::audit_span(entry.profile.id, device, generation);

        let report = self
            .engine
            .run(self.inspector.as_ref(), entry, device)
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        let mut live = self.live.lock().expect("live report mutex poisoned");
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale audit result");
            return Err(AuditError::Superseded { generation });
        }

        let report = Arc::new(report);
        info!(
            overall_score = report.overall_score(),
            failed = report.is_failed(),
            "audit completed"
        );
        *live = Some(LiveReport {
            generation,
            report: Arc::clone(&report),
        });
        Ok(report)
    }

    pub fn latest(&self) -> Option<Arc<AuditReport>> {
        self.live
            .lock()
            .expect("live report mutex poisoned")
            .as_ref()
            .map(|live| Arc::clone(&live.report))
    }

    pub fn latest_generation(&self) -> Option<u64> {
        self.live
            .lock()
            .expect("live report mutex poisoned")
            .as_ref()
            .map(|live| live.generation)
    }
}
