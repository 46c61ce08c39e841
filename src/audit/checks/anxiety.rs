use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{AlertFact, ControlFact, DocumentFacts, FactGroup, PageFacts};
use super::{ratio_score, Band, Findings, PLACEHOLDER_SCORE};

pub(crate) const DIMENSIONS: Dimensions = ["timers", "pressure", "clarity", "recovery"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Document, FactGroup::Alerts, FactGroup::Controls];

/// Minimum visible characters for a call to action to count as clear.
const CLEAR_LABEL_CHARS: usize = 2;

fn urgency_pattern() -> &'static Regex {
    static URGENCY: OnceLock<Regex> = OnceLock::new();
    URGENCY.get_or_init(|| {
        Regex::new(r"(?i)\d{1,2}:\d{2}|countdown|timer|hurry|limited time").expect("valid regex")
    })
}

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("timers");
    let timers = match facts.document.as_ref() {
        Some(document) => time_pressure(document, &mut findings),
        None => findings.unobserved("Time Pressure"),
    };
    findings.begin("recovery");
    let recovery = match facts.alerts.as_deref() {
        Some(alerts) => error_states(alerts, &mut findings),
        None => findings.unobserved("Error States"),
    };
    findings.begin("clarity");
    let clarity = match facts.controls.as_deref() {
        Some(controls) => calls_to_action(controls, &mut findings),
        None => findings.unobserved("Clear CTAs"),
    };
    findings.begin("pressure");
    let pressure = match facts.controls.as_deref() {
        Some(controls) => form_length(controls, &mut findings),
        None => findings.unobserved("Form Fields"),
    };

    findings.finish(DIMENSIONS, [timers, pressure, clarity, recovery])
}

fn time_pressure(document: &DocumentFacts, findings: &mut Findings) -> u8 {
    if !urgency_pattern().is_match(&document.body_text) {
        findings.metric("Time Pressure", "None", MetricStatus::Pass);
        return 100;
    }
    findings.metric("Time Pressure", "Detected", MetricStatus::Warning);
    findings.warning("Time pressure detected", "Countdown or urgency language found");
    60
}

fn error_states(alerts: &[AlertFact], findings: &mut Findings) -> u8 {
    let states = alerts.iter().filter(|alert| alert.is_error_state()).count();
    findings.metric("Error States", states, MetricStatus::Info);
    findings.neutral(PLACEHOLDER_SCORE)
}

fn calls_to_action(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let buttons: Vec<&ControlFact> = controls
        .iter()
        .filter(|control| control.is_button_like())
        .collect();
    let clear = buttons
        .iter()
        .filter(|button| button.trimmed_text().chars().count() > CLEAR_LABEL_CHARS)
        .count();
    let unclear = buttons.len() - clear;

    let status = if unclear == 0 {
        MetricStatus::Pass
    } else {
        MetricStatus::Warning
    };
    findings.metric("Clear CTAs", format!("{clear}/{}", buttons.len()), status);
    if unclear > 0 {
        findings.warning(
            "Unclear calls to action",
            format!("{unclear} buttons have little or no visible text"),
        );
    }
    ratio_score(clear, buttons.len())
}

fn form_length(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let fields = controls.iter().filter(|control| control.is_form_field()).count();
    let band = Band::with_limits(fields, 10, 20);

    findings.metric("Form Fields", fields, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Long forms", format!("{fields} fields on one page"));
            80
        }
        Band::Error => {
            findings.error(
                "Complex forms",
                format!("{fields} fields - consider breaking into steps"),
            );
            60
        }
    }
}
