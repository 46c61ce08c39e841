use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{ControlFact, FactGroup, PageFacts};
use super::{decay, has_skip_link, removed_from_tab_order, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["tabOrder", "focusTraps", "shortcuts", "skipLinks"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Controls];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    let controls = facts.controls.as_deref();

    findings.begin("tabOrder");
    let tab_order = match controls {
        Some(controls) => tab_order(controls, &mut findings),
        None => findings.unobserved("Hidden from Tab"),
    };
    findings.begin("skipLinks");
    let skip_links = match controls {
        Some(controls) => skip_link(controls, &mut findings),
        None => findings.unobserved("Skip Link"),
    };
    findings.begin("focusTraps");
    let focus_traps = match controls {
        Some(controls) => mouse_only(controls, &mut findings),
        None => findings.unobserved("Mouse-only Events"),
    };
    findings.begin("shortcuts");
    let shortcuts = findings.placeholder("Keyboard Shortcuts");

    findings.finish(DIMENSIONS, [tab_order, focus_traps, shortcuts, skip_links])
}

fn tab_order(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let focusable = controls
        .iter()
        .filter(|control| control.is_focusable_candidate())
        .count();
    findings.metric("Focusable Elements", focusable, MetricStatus::Info);

    let hidden = removed_from_tab_order(controls);
    let band = Band::of_count(hidden, 5);
    findings.metric("Hidden from Tab", hidden, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some elements hidden from keyboard",
                format!("{hidden} elements have tabindex=\"-1\""),
            );
            decay(hidden, 5, 0)
        }
        Band::Error => {
            findings.error(
                "Elements hidden from keyboard",
                format!("{hidden} elements have tabindex=\"-1\""),
            );
            50
        }
    }
}

fn skip_link(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    if has_skip_link(controls, false) {
        findings.metric("Skip Link", "Present", MetricStatus::Pass);
        100
    } else {
        findings.metric("Skip Link", "Missing", MetricStatus::Warning);
        findings.warning("No skip link detected", "Add a \"Skip to main content\" link");
        60
    }
}

fn mouse_only(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let mouse_only = controls.iter().filter(|control| control.is_mouse_only()).count();
    if mouse_only == 0 {
        findings.metric("Mouse-only Events", mouse_only, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Mouse-only Events", mouse_only, MetricStatus::Error);
    findings.error(
        "Mouse-only interactions",
        format!("{mouse_only} elements need keyboard equivalents"),
    );
    50
}
