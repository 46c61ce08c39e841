use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{CheckOutput, Device, Diagnostic, Metric, Profile, ProfileId, SubScores};
use super::scoring::{overall_score, ScoreBand};

/// Immutable outcome of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    profile_id: ProfileId,
    profile_name: &'static str,
    device: Device,
    timestamp: DateTime<Utc>,
    metrics: Vec<Metric>,
    diagnostics: Vec<Diagnostic>,
    sub_scores: SubScores,
    overall_score: u8,
    failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_reason: Option<String>,
}

impl AuditReport {
    /// Packages a check output and derives the overall score from its sub-scores.
    pub fn assemble(
        profile: &Profile,
        device: Device,
        output: CheckOutput,
        captured_at: DateTime<Utc>,
    ) -> Self {
        let overall_score = overall_score(&output.sub_scores);
        Self {
            profile_id: profile.id,
            profile_name: profile.name,
            device,
            timestamp: captured_at,
            metrics: output.metrics,
            diagnostics: output.diagnostics,
            sub_scores: output.sub_scores,
            overall_score,
            failed: false,
            failure_reason: None,
        }
    }

    /// Zero-score report produced when the page could not be inspected.
    pub fn failed(
        profile: &Profile,
        device: Device,
        reason: impl Into<String>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            profile_id: profile.id,
            profile_name: profile.name,
            device,
            timestamp: captured_at,
            metrics: Vec::new(),
            diagnostics: Vec::new(),
            sub_scores: SubScores::default(),
            overall_score: 0,
            failed: true,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    pub fn profile_name(&self) -> &str {
        self.profile_name
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn sub_scores(&self) -> &SubScores {
        &self.sub_scores
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn overall_band(&self) -> ScoreBand {
        ScoreBand::classify(self.overall_score)
    }

    pub fn dimension_bands(&self) -> Vec<(&str, u8, ScoreBand)> {
        self.sub_scores
            .iter()
            .map(|(dimension, score)| (dimension, score, ScoreBand::classify(score)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{MetricStatus, ProfileCategory};
    use chrono::TimeZone;

    fn profile() -> Profile {
        Profile {
            id: ProfileId::Blind,
            name: "Blind",
            category: ProfileCategory::Vision,
            description: "Screen reader users",
            checks: ["headings", "ariaLabels", "landmarks", "skipLinks"],
            dimensions: ["headings", "aria", "landmarks", "skipLinks"],
        }
    }

    fn captured_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn assemble_derives_overall_score() {
        let output = CheckOutput {
            metrics: vec![Metric::new("Landmarks", 0usize, MetricStatus::Error)],
            diagnostics: vec![Diagnostic::error("No landmarks found", "Add landmarks")],
            sub_scores: SubScores::from_dimensions(profile().dimensions, [50, 100, 30, 60]),
            ..CheckOutput::default()
        };

        let report = AuditReport::assemble(&profile(), Device::Mobile, output, captured_at());

        assert_eq!(report.overall_score(), 60);
        assert_eq!(report.overall_band(), ScoreBand::NeedsImprovement);
        assert_eq!(report.device(), Device::Mobile);
        assert!(!report.is_failed());
        assert_eq!(report.dimension_bands().len(), 4);
    }

    #[test]
    fn failed_report_is_empty_and_zero() {
        let report = AuditReport::failed(&profile(), Device::Desktop, "inspector unavailable", captured_at());

        assert!(report.is_failed());
        assert_eq!(report.overall_score(), 0);
        assert!(report.metrics().is_empty());
        assert!(report.diagnostics().is_empty());
        assert!(report.sub_scores().is_empty());
        assert_eq!(report.failure_reason(), Some("inspector unavailable"));
    }

    #[test]
    fn serializes_camel_case_wire_form() {
        let report = AuditReport::failed(&profile(), Device::Desktop, "timed out", captured_at());
        let json = serde_json::to_value(&report).expect("serializes");

        assert_eq!(json["profileId"], "blind");
        assert_eq!(json["overallScore"], 0);
        assert_eq!(json["failed"], true);
        assert_eq!(json["failureReason"], "timed out");
        assert!(json["subScores"].as_object().expect("map").is_empty());
    }
}
