use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::audit::domain::{Device, ProfileId};
use crate::audit::engine::{AuditEngine, AuditError};
use crate::audit::facts::PageFacts;
use crate::audit::inspector::{InspectionError, PageInspector};
use crate::audit::registry::{ProfileRegistry, RegistryError};
use crate::audit::session::AuditSession;
use crate::config::AuditConfig;

fn engine() -> AuditEngine {
    AuditEngine::new(ProfileRegistry::standard(), AuditConfig::default()).with_clock(fixed_clock)
}

fn session(inspector: impl PageInspector + 'static) -> AuditSession {
    AuditSession::new(Arc::new(inspector), engine())
}

#[tokio::test]
async fn engine_queries_inspector_once_per_run() {
    let inspector = StaticInspector::new(empty_page());

    let report = engine()
        .audit(&inspector, "blind", Device::Desktop)
        .await
        .expect("known profile");

    assert_eq!(inspector.calls(), 1);
    assert_eq!(report.profile_id(), ProfileId::Blind);
    assert_eq!(report.overall_score(), 60);
    assert_eq!(report.timestamp(), fixed_clock());
    assert!(!report.is_failed());
}

#[tokio::test]
async fn engine_rejects_unknown_profile_without_inspecting() {
    let inspector = StaticInspector::new(empty_page());

    let err = engine()
        .audit(&inspector, "vertigo", Device::Desktop)
        .await
        .expect_err("unknown profile");

    assert_eq!(
        err,
        AuditError::UnknownProfile(RegistryError::UnknownProfile("vertigo".to_string()))
    );
    assert_eq!(inspector.calls(), 0);
}

#[tokio::test]
async fn inspector_errors_become_failure_reports() {
    let inspector = FailingInspector(InspectionError::Script("ReferenceError".to_string()));

    let report = engine()
        .audit(&inspector, "motor", Device::Mobile)
        .await
        .expect("failure report, not error");

    assert!(report.is_failed());
    assert_eq!(report.overall_score(), 0);
    assert!(report.metrics().is_empty());
    assert!(report.sub_scores().is_empty());
    assert_eq!(report.device(), Device::Mobile);
    assert!(report
        .failure_reason()
        .is_some_and(|reason| reason.contains("ReferenceError")));
}

#[tokio::test]
async fn empty_facts_become_failure_reports() {
    let inspector = StaticInspector::new(PageFacts::default());

    let report = engine()
        .audit(&inspector, "dyslexia", Device::Desktop)
        .await
        .expect("failure report");

    assert!(report.is_failed());
    assert_eq!(
        report.failure_reason(),
        Some(InspectionError::Empty.to_string().as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn hanging_inspector_times_out_into_failure_report() {
    let config = AuditConfig {
        inspection_timeout: Duration::from_millis(250),
        ..AuditConfig::default()
    };
    let engine = AuditEngine::new(ProfileRegistry::standard(), config).with_clock(fixed_clock);
    let started = tokio::time::Instant::now();

    let report = engine
        .audit(&HangingInspector, "adhd", Device::Desktop)
        .await
        .expect("failure report");

    assert!(report.is_failed());
    assert_eq!(
        report.failure_reason(),
        Some("page inspection timed out after 250ms")
    );
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn session_keeps_latest_report() {
    let session = session(StaticInspector::new(empty_page()));
    assert!(session.latest().is_none());

    let first = session
        .run_audit("blind", Device::Desktop)
        .await
        .expect("first run");
    let second = session
        .run_audit("photosensitive", Device::Mobile)
        .await
        .expect("second run");

    let latest = session.latest().expect("live report");
    assert!(Arc::ptr_eq(&latest, &second));
    assert!(!Arc::ptr_eq(&latest, &first));
    assert_eq!(session.latest_generation(), Some(2));
}

#[tokio::test]
async fn unknown_profile_leaves_live_report_untouched() {
    let session = session(StaticInspector::new(empty_page()));
    let report = session
        .run_audit("keyboard", Device::Desktop)
        .await
        .expect("known profile");

    let err = session
        .run_audit("vertigo", Device::Desktop)
        .await
        .expect_err("unknown profile");

    assert!(matches!(err, AuditError::UnknownProfile(_)));
    assert_eq!(session.current_generation(), 1);
    assert!(Arc::ptr_eq(&session.latest().expect("live"), &report));
}

#[tokio::test]
async fn stale_result_is_discarded_after_newer_run_starts() {
    let (inspector, release) = GatedInspector::new(empty_page());
    let session = Arc::new(session(inspector));

    let slow = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.run_audit("blind", Device::Desktop).await }
    });
    while session.current_generation() < 1 {
        tokio::task::yield_now().await;
    }

    let fresh = session
        .run_audit("photosensitive", Device::Desktop)
        .await
        .expect("newer run completes");
    release.send(()).expect("slow run still waiting");

    let stale = slow.await.expect("task joins");
    assert_eq!(stale, Err(AuditError::Superseded { generation: 1 }));

    let live = session.latest().expect("live report");
    assert!(Arc::ptr_eq(&live, &fresh));
    assert_eq!(live.profile_id(), ProfileId::Photosensitive);
    assert_eq!(session.latest_generation(), Some(2));
}
