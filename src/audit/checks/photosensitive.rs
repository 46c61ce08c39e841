use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{AnimationFact, FactGroup, ImageFact, MediaFact, PageFacts};
use super::{decay, running_animations, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["flashing", "animations", "autoPlay", "motion"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Animations, FactGroup::Media, FactGroup::Images];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("animations");
    let animations = match facts.animations.as_deref() {
        Some(animations) => animations_present(animations, &mut findings),
        None => findings.unobserved("Animations"),
    };
    findings.begin("autoPlay");
    let auto_play = match facts.media.as_deref() {
        Some(media) => auto_play(media, &mut findings),
        None => findings.unobserved("Auto-play Media"),
    };
    findings.begin("flashing");
    let flashing = match facts.images.as_deref() {
        Some(images) => animated_gifs(images, &mut findings),
        None => findings.unobserved("Animated GIFs"),
    };
    findings.begin("motion");
    let motion = findings.placeholder("Motion Preference");

    findings.finish(DIMENSIONS, [flashing, animations, auto_play, motion])
}

fn animations_present(animations: &[AnimationFact], findings: &mut Findings) -> u8 {
    let running = running_animations(animations);
    let band = Band::of_count(running, 5);

    findings.metric("Animations", running, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Some animations present", "Ensure no flashing > 3 times/second");
            70
        }
        Band::Error => {
            findings.error(
                "Many animations detected",
                format!("{running} animated elements may trigger photosensitivity"),
            );
            decay(running, 10, 0)
        }
    }
}

fn auto_play(media: &[MediaFact], findings: &mut Findings) -> u8 {
    let videos = media.iter().filter(|m| m.autoplay && m.is_video()).count();
    let audio = media.iter().filter(|m| m.autoplay && m.is_audio()).count();
    let total = videos + audio;

    if total == 0 {
        findings.metric("Auto-play Media", total, MetricStatus::Pass);
        return 100;
    }

    findings.metric("Auto-play Media", total, MetricStatus::Error);
    if videos > 0 {
        findings.error(
            "Auto-playing video",
            format!("{videos} videos auto-play - may cause discomfort"),
        );
    } else {
        findings.error(
            "Auto-playing audio",
            format!("{audio} audio elements auto-play - may cause discomfort"),
        );
    }
    30
}

fn animated_gifs(images: &[ImageFact], findings: &mut Findings) -> u8 {
    let gifs = images.iter().filter(|image| image.is_gif()).count();
    if gifs == 0 {
        findings.metric("Animated GIFs", gifs, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Animated GIFs", gifs, MetricStatus::Warning);
    findings.warning(
        "Animated GIFs found",
        format!("{gifs} GIFs - ensure no rapid flashing"),
    );
    70
}
