use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{AnimationFact, ControlFact, FactGroup, MediaFact, PageFacts, TextFact};
use super::{autoplay_media, decay, navigation_items, running_animations, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["visualNoise", "hierarchy", "spacing", "distractions"];
pub(crate) const FACTS: &[FactGroup] = &[
    FactGroup::Media,
    FactGroup::Animations,
    FactGroup::Text,
    FactGroup::Controls,
];

const LONG_PARAGRAPH_WORDS: u32 = 100;
const NAVIGATION_COMFORT: usize = 7;

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("distractions");
    let distractions = match facts.media.as_deref() {
        Some(media) => auto_play(media, &mut findings),
        None => findings.unobserved("Auto-play Media"),
    };
    findings.begin("visualNoise");
    let visual_noise = match facts.animations.as_deref() {
        Some(animations) => visual_noise(animations, &mut findings),
        None => findings.unobserved("Animations"),
    };
    findings.begin("hierarchy");
    let hierarchy = match facts.text.as_deref() {
        Some(text) => long_paragraphs(text, &mut findings),
        None => findings.unobserved("Long Paragraphs"),
    };
    findings.begin("spacing");
    let spacing = match facts.controls.as_deref() {
        Some(controls) => navigation(controls, &mut findings),
        None => findings.unobserved("Navigation Items"),
    };

    findings.finish(DIMENSIONS, [visual_noise, hierarchy, spacing, distractions])
}

fn auto_play(media: &[MediaFact], findings: &mut Findings) -> u8 {
    let autoplay = autoplay_media(media);
    if autoplay == 0 {
        findings.metric("Auto-play Media", autoplay, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Auto-play Media", autoplay, MetricStatus::Error);
    findings.error("Auto-playing media", "Causes major distraction for ADHD users");
    40
}

fn visual_noise(animations: &[AnimationFact], findings: &mut Findings) -> u8 {
    let running = running_animations(animations);
    let band = Band::with_limits(running, 3, 8);

    findings.metric("Animations", running, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Multiple animations", "Consider reducing visual motion");
            70
        }
        Band::Error => {
            findings.error(
                "Too many animations",
                format!("{running} animated elements cause distraction"),
            );
            decay(running, 8, 0)
        }
    }
}

fn long_paragraphs(text: &[TextFact], findings: &mut Findings) -> u8 {
    let long = text
        .iter()
        .filter(|fact| fact.tag_in(&["p"]) && fact.word_count > LONG_PARAGRAPH_WORDS)
        .count();
    let band = Band::of_count(long, 3);

    findings.metric("Long Paragraphs", long, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some long content blocks",
                format!("{long} paragraphs over 100 words"),
            );
            85
        }
        Band::Error => {
            findings.error(
                "Content blocks too long",
                format!("{long} paragraphs over 100 words"),
            );
            decay(long, 15, 0)
        }
    }
}

fn navigation(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let items = navigation_items(controls);
    let band = Band::with_limits(items, NAVIGATION_COMFORT, 12);

    findings.metric("Navigation Items", items, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Busy navigation", format!("{items} items compete for attention"));
            90
        }
        Band::Error => {
            findings.error(
                "Navigation too complex",
                format!("{items} items - overwhelming for ADHD"),
            );
            decay(items - NAVIGATION_COMFORT, 8, 0)
        }
    }
}
