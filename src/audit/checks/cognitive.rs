use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{
    AnimationFact, ControlFact, FactGroup, HeadingFact, MediaFact, PageFacts, RegionFact,
};
use super::{autoplay_media, decay, navigation_items, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["layout", "navigation", "wording", "distractions"];
pub(crate) const FACTS: &[FactGroup] = &[
    FactGroup::Controls,
    FactGroup::Regions,
    FactGroup::Animations,
    FactGroup::Media,
    FactGroup::Headings,
];

/// Recommended upper bound on navigation entries.
const NAVIGATION_COMFORT: usize = 7;

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("navigation");
    let navigation = match facts.controls.as_deref() {
        Some(controls) => navigation(controls, &mut findings),
        None => findings.unobserved("Navigation Items"),
    };
    findings.begin("layout");
    let layout = match facts.regions.as_deref() {
        Some(regions) => layout(regions, &mut findings),
        None => findings.unobserved("Layout Structure"),
    };
    findings.begin("distractions");
    let distractions = match (facts.animations.as_deref(), facts.media.as_deref()) {
        (Some(animations), Some(media)) => distractions(animations, media, &mut findings),
        _ => findings.unobserved("Distractions"),
    };
    findings.begin("wording");
    let wording = match facts.headings.as_deref() {
        Some(headings) => wording(headings, &mut findings),
        None => findings.unobserved("Content Headings"),
    };

    findings.finish(DIMENSIONS, [layout, navigation, wording, distractions])
}

fn navigation(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let items = navigation_items(controls);
    let band = Band::with_limits(items, NAVIGATION_COMFORT, 12);

    findings.metric("Navigation Items", items, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Navigation may be overwhelming",
                "Consider grouping or reducing items",
            );
            70
        }
        Band::Error => {
            findings.error(
                "Complex navigation",
                format!("{items} items (recommended: 5-7)"),
            );
            decay(items - NAVIGATION_COMFORT, 8, 0)
        }
    }
}

fn layout(regions: &[RegionFact], findings: &mut Findings) -> u8 {
    let present = |tag: &str| regions.iter().any(|region| region.is_tag(tag));
    let score = [("main", 33u8), ("header", 33), ("nav", 34)]
        .into_iter()
        .filter(|(tag, _)| present(*tag))
        .map(|(_, weight)| weight)
        .sum::<u8>();

    let value = format!("{score}%");
    if score >= 66 {
        findings.metric("Layout Structure", value, MetricStatus::Pass);
        return 100;
    }
    if score >= 33 {
        findings.metric("Layout Structure", value, MetricStatus::Warning);
        findings.warning(
            "Incomplete page layout",
            "Use main, header and nav so every page shares one structure",
        );
    } else {
        findings.metric("Layout Structure", value, MetricStatus::Error);
        findings.error(
            "No page layout structure",
            "Add main, header and nav elements",
        );
    }
    score
}

fn distractions(animations: &[AnimationFact], media: &[MediaFact], findings: &mut Findings) -> u8 {
    let inline = animations.iter().filter(|fact| fact.inline).count();
    let count = inline + autoplay_media(media);
    let band = Band::of_count(count, 3);

    findings.metric("Distractions", count, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some distractions",
                format!("{count} animated or auto-playing elements"),
            );
            90
        }
        Band::Error => {
            findings.error(
                "Too many distractions",
                "Reduce auto-playing content and animations",
            );
            decay(count, 15, 0)
        }
    }
}

fn wording(headings: &[HeadingFact], findings: &mut Findings) -> u8 {
    let count = headings.len();
    match count {
        0 => {
            findings.metric("Content Headings", count, MetricStatus::Error);
            findings.error("No content headings", "Break content into titled sections");
            40
        }
        1 | 2 => {
            findings.metric("Content Headings", count, MetricStatus::Warning);
            findings.warning(
                "Few content headings",
                format!("Only {count} headings structure the page"),
            );
            70
        }
        _ => {
            findings.metric("Content Headings", count, MetricStatus::Pass);
            100
        }
    }
}
