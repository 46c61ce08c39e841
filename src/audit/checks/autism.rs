use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{AnimationFact, ControlFact, FactGroup, MediaFact, PageFacts, RegionFact};
use super::{autoplay_media, decay, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["consistency", "predictability", "sensory", "labels"];
pub(crate) const FACTS: &[FactGroup] = &[
    FactGroup::Regions,
    FactGroup::Media,
    FactGroup::Animations,
    FactGroup::Controls,
];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("consistency");
    let consistency = match facts.regions.as_deref() {
        Some(regions) => consistent_navigation(regions, &mut findings),
        None => findings.unobserved("Navigation Areas"),
    };
    findings.begin("sensory");
    let sensory = match (facts.media.as_deref(), facts.animations.as_deref()) {
        (Some(media), Some(animations)) => sensory_load(media, animations, &mut findings),
        _ => findings.unobserved("Sensory Load"),
    };
    findings.begin("labels");
    let labels = match facts.controls.as_deref() {
        Some(controls) => button_labels(controls, &mut findings),
        None => findings.unobserved("Unlabeled Buttons"),
    };
    findings.begin("predictability");
    let predictability = findings.placeholder("Predictability");

    findings.finish(DIMENSIONS, [consistency, predictability, sensory, labels])
}

fn consistent_navigation(regions: &[RegionFact], findings: &mut Findings) -> u8 {
    let navs = regions.iter().filter(|region| region.is_tag("nav")).count();
    if navs > 0 {
        findings.metric("Navigation Areas", navs, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Navigation Areas", navs, MetricStatus::Warning);
    findings.warning(
        "No consistent navigation",
        "Add a nav element so navigation stays in one place",
    );
    60
}

fn sensory_load(media: &[MediaFact], animations: &[AnimationFact], findings: &mut Findings) -> u8 {
    let declared = animations.iter().filter(|fact| fact.is_declared()).count();
    let load = autoplay_media(media) + declared;
    let band = Band::of_count(load, 5);

    findings.metric("Sensory Load", load, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some sensory load",
                format!("{load} animated or auto-playing elements"),
            );
            decay(load, 10, 60)
        }
        Band::Error => {
            findings.error("High sensory load", "Too many animations/auto-play elements");
            40
        }
    }
}

fn button_labels(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let unlabeled = controls
        .iter()
        .filter(|control| control.is_button())
        .filter(|button| button.trimmed_text().is_empty() && !button.has_aria_label())
        .count();
    if unlabeled == 0 {
        findings.metric("Unlabeled Buttons", unlabeled, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Unlabeled Buttons", unlabeled, MetricStatus::Error);
    findings.error(
        "Buttons without labels",
        format!("{unlabeled} buttons need clear text"),
    );
    50
}
