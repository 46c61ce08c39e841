use crate::audit::{AuditReport, Device, PageFacts, Profile, ProfileSummary, SnapshotInspector};
use crate::error::AppError;
use crate::infra::{AppState, AuditApi};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AuditRequest {
    pub(crate) profile: String,
    #[serde(default)]
    pub(crate) device: Device,
    #[serde(default)]
    pub(crate) facts: PageFacts,
}

pub(crate) fn audit_router(api: Arc<AuditApi>) -> Router {
    Router::new()
        .route("/api/v1/profiles", get(list_profiles))
        .route("/api/v1/profiles/:profile_id", get(profile_detail))
        .route("/api/v1/audits", post(submit_audit))
        .with_state(api)
}

pub(crate) fn with_audit_routes(api: Arc<AuditApi>) -> Router {
    audit_router(api)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_profiles(State(api): State<Arc<AuditApi>>) -> Json<Vec<ProfileSummary>> {
    Json(api.registry().summaries())
}

pub(crate) async fn profile_detail(
    State(api): State<Arc<AuditApi>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = api.registry().get_profile(&profile_id)?;
    Ok(Json(*profile))
}

/// Audits a captured page. Inspection failures still answer 200 with a failed report.
pub(crate) async fn submit_audit(
    State(api): State<Arc<AuditApi>>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditReport>, AppError> {
    let AuditRequest {
        profile,
        device,
        facts,
    } = request;

    let inspector = SnapshotInspector::new(facts);
    let report = api.engine.audit(&inspector, &profile, device).await?;
    info!(
        profile = %report.profile_id(),
        %device,
        overall = report.overall_score(),
        failed = report.is_failed(),
        "audit served"
    );

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_audit_routes(Arc::new(AuditApi::new(AuditConfig::default()))).layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_audit(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/audits")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_flag_set() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn profiles_are_listed_in_catalog_order() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/profiles")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let profiles = body.as_array().expect("array of profiles");
        assert_eq!(profiles.len(), 12);
        assert_eq!(profiles[0]["id"], "blind");
        assert_eq!(profiles[11]["id"], "anxiety");
    }

    #[tokio::test]
    async fn unknown_profile_detail_is_not_found() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/profiles/vertigo")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["error"],
            "audit error: unknown accessibility profile 'vertigo'"
        );
    }

    #[tokio::test]
    async fn profile_detail_lists_dimensions() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/profiles/deaf")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["category"], "hearing");
        assert_eq!(body["dimensions"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn audit_endpoint_scores_bare_page_for_blind_profile() {
        let request = post_audit(json!({
            "profile": "blind",
            "device": "mobile",
            "facts": { "headings": [], "controls": [], "regions": [] }
        }));

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["profileId"], "blind");
        assert_eq!(body["device"], "mobile");
        assert_eq!(body["overallScore"], 60);
        assert_eq!(body["subScores"]["landmarks"], 30);
        assert_eq!(body["failed"], false);
        assert!(body.get("failureReason").is_none());
    }

    #[tokio::test]
    async fn audit_endpoint_accepts_heading_without_level() {
        let request = post_audit(json!({
            "profile": "blind",
            "facts": {
                "headings": [{ "text": "Home" }],
                "controls": [],
                "regions": []
            }
        }));

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["failed"], false);
        assert_eq!(body["subScores"]["headings"], 50);
        assert_eq!(body["metrics"][0]["value"], 1);
    }

    #[tokio::test]
    async fn audit_endpoint_returns_failed_report_for_missing_facts() {
        let request = post_audit(json!({ "profile": "deaf" }));

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["failed"], true);
        assert_eq!(body["overallScore"], 0);
        assert_eq!(body["device"], "desktop");
    }

    #[tokio::test]
    async fn audit_endpoint_rejects_unknown_profile() {
        let request = post_audit(json!({ "profile": "vertigo", "facts": {} }));

        let response = app(true).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
