use crate::audit::{AuditEngine, ProfileRegistry};
use crate::config::AuditConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared state behind the `/api/v1` routes.
#[derive(Debug, Clone)]
pub(crate) struct AuditApi {
    pub(crate) engine: AuditEngine,
}

impl AuditApi {
    pub(crate) fn new(config: AuditConfig) -> Self {
        Self {
            engine: AuditEngine::new(ProfileRegistry::standard(), config),
        }
    }

    pub(crate) fn registry(&self) -> &ProfileRegistry {
        self.engine.registry()
    }
}
