use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{ControlFact, FactGroup, PageFacts, StylesheetFacts};
use super::{decay, removed_from_tab_order, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["keyboard", "clickAreas", "focus", "gestures"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Controls, FactGroup::Stylesheets];

/// Minimum target edge in CSS pixels.
const MIN_TARGET_PX: f64 = 44.0;

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("keyboard");
    let keyboard = match facts.controls.as_deref() {
        Some(controls) => keyboard_reach(controls, &mut findings),
        None => findings.unobserved("Focusable Elements"),
    };
    findings.begin("clickAreas");
    let click_areas = match facts.controls.as_deref() {
        Some(controls) => click_areas(controls, &mut findings),
        None => findings.unobserved("Small Click Targets"),
    };
    findings.begin("focus");
    let focus = match facts.stylesheets.as_ref() {
        Some(stylesheets) => focus_styles(stylesheets, &mut findings),
        None => findings.unobserved("Focus Styles"),
    };
    findings.begin("gestures");
    let gestures = match facts.controls.as_deref() {
        Some(controls) => drag_and_drop(controls, &mut findings),
        None => findings.unobserved("Draggable Elements"),
    };

    findings.finish(DIMENSIONS, [keyboard, click_areas, focus, gestures])
}

fn keyboard_reach(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let focusable = controls
        .iter()
        .filter(|control| control.is_focusable_candidate())
        .count();
    findings.metric("Focusable Elements", focusable, MetricStatus::Info);

    let removed = removed_from_tab_order(controls);
    if removed == 0 {
        return 100;
    }
    findings.warning(
        "Elements removed from tab order",
        format!("{removed} elements have tabindex=\"-1\""),
    );
    decay(removed, 10, 50)
}

fn click_areas(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let targets: Vec<_> = controls
        .iter()
        .filter(|control| control.is_click_target())
        .collect();
    if !targets.is_empty() && !targets.iter().any(|control| control.is_measured()) {
        return findings.unobserved("Small Click Targets");
    }

    let small = targets
        .iter()
        .filter(|control| control.is_undersized(MIN_TARGET_PX))
        .count();
    let band = Band::of_count(small, 5);

    findings.metric("Small Click Targets", small, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some small click targets",
                format!("{small} elements could be larger"),
            );
            decay(small, 8, 50)
        }
        Band::Error => {
            findings.error(
                "Click targets too small",
                format!("{small} elements under 44x44px minimum"),
            );
            decay(small, 8, 0)
        }
    }
}

fn focus_styles(stylesheets: &StylesheetFacts, findings: &mut Findings) -> u8 {
    let Some(rules) = stylesheets.focus_rules else {
        return findings.unobserved("Focus Styles");
    };
    if rules > 0 {
        findings.metric("Focus Styles", "Present", MetricStatus::Pass);
        return 100;
    }
    findings.metric("Focus Styles", "Missing", MetricStatus::Error);
    findings.error("Missing focus styles", "No custom :focus styles detected");
    40
}

fn drag_and_drop(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let draggable = controls.iter().filter(|control| control.draggable).count();
    if draggable == 0 {
        findings.metric("Draggable Elements", draggable, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Draggable Elements", draggable, MetricStatus::Warning);
    findings.warning(
        "Drag-and-drop detected",
        format!("{draggable} elements require keyboard alternative"),
    );
    70
}
