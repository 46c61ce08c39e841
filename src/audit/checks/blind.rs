use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{ControlFact, FactGroup, HeadingFact, PageFacts, RegionFact};
use super::{decay, has_skip_link, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["headings", "aria", "landmarks", "skipLinks"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Headings, FactGroup::Controls, FactGroup::Regions];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("headings");
    let headings = match facts.headings.as_deref() {
        Some(headings) => heading_structure(headings, &mut findings),
        None => findings.unobserved("Headings Found"),
    };
    findings.begin("aria");
    let aria = match facts.controls.as_deref() {
        Some(controls) => accessible_names(controls, &mut findings),
        None => findings.unobserved("Unlabeled Elements"),
    };
    findings.begin("landmarks");
    let landmarks = match facts.regions.as_deref() {
        Some(regions) => landmark_coverage(regions, &mut findings),
        None => findings.unobserved("Landmarks"),
    };
    findings.begin("skipLinks");
    let skip_links = match facts.controls.as_deref() {
        Some(controls) => skip_link(controls, &mut findings),
        None => findings.unobserved("Skip Link"),
    };

    findings.finish(DIMENSIONS, [headings, aria, landmarks, skip_links])
}

fn heading_structure(headings: &[HeadingFact], findings: &mut Findings) -> u8 {
    let status = if headings.is_empty() {
        MetricStatus::Error
    } else {
        MetricStatus::Pass
    };
    findings.metric("Headings Found", headings.len(), status);

    let h1_count = headings.iter().filter(|heading| heading.level == Some(1)).count();
    match h1_count {
        0 => {
            findings.error("Missing H1 heading", "Page should have exactly one H1");
            50
        }
        1 => 100,
        count => {
            findings.warning("Multiple H1 headings", format!("Found {count} H1 elements"));
            70
        }
    }
}

fn accessible_names(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let unlabeled = controls
        .iter()
        .filter(|control| control.is_native_control() && !control.has_accessible_name())
        .count();
    let band = Band::of_count(unlabeled, 5);
    findings.metric("Unlabeled Elements", unlabeled, band.status());
    findings.flag(
        band,
        "Elements missing accessible names",
        "Elements missing accessible names",
        format!("{unlabeled} interactive elements lack labels"),
    );
    decay(unlabeled, 10, 0)
}

fn landmark_coverage(regions: &[RegionFact], findings: &mut Findings) -> u8 {
    let landmarks = regions.iter().filter(|region| region.is_landmark()).count();
    match landmarks {
        0 => {
            findings.metric("Landmarks", landmarks, MetricStatus::Error);
            findings.error(
                "No landmarks found",
                "Add semantic landmarks (main, nav, header, footer)",
            );
            30
        }
        1 | 2 => {
            findings.metric("Landmarks", landmarks, MetricStatus::Warning);
            findings.warning("Few landmarks", "Consider adding more semantic structure");
            70
        }
        _ => {
            findings.metric("Landmarks", landmarks, MetricStatus::Pass);
            100
        }
    }
}

fn skip_link(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    if has_skip_link(controls, true) {
        findings.metric("Skip Link", "Present", MetricStatus::Pass);
        100
    } else {
        findings.metric("Skip Link", "Missing", MetricStatus::Warning);
        findings.warning("No skip link detected", "Add a \"Skip to main content\" link");
        60
    }
}
