use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{AlertFact, FactGroup, MediaFact, PageFacts};
use super::{ratio_score, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["captions", "transcripts", "visualAlerts", "audio"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Media, FactGroup::Alerts];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("captions");
    let captions = match facts.media.as_deref() {
        Some(media) => captions(media, &mut findings),
        None => findings.unobserved("Videos"),
    };
    findings.begin("transcripts");
    let transcripts = match facts.media.as_deref() {
        Some(media) => transcripts(media, &mut findings),
        None => findings.unobserved("Audio Elements"),
    };
    findings.begin("visualAlerts");
    let visual_alerts = match facts.alerts.as_deref() {
        Some(alerts) => visual_alerts(alerts, &mut findings),
        None => findings.unobserved("Visual Alerts"),
    };
    findings.begin("audio");
    let audio = findings.placeholder("Audio Descriptions");

    findings.finish(DIMENSIONS, [captions, transcripts, visual_alerts, audio])
}

fn captions(media: &[MediaFact], findings: &mut Findings) -> u8 {
    let videos: Vec<&MediaFact> = media.iter().filter(|m| m.is_video()).collect();
    let captioned = videos.iter().filter(|video| video.caption_tracks > 0).count();

    findings.metric("Videos", videos.len(), MetricStatus::Info);
    let missing = videos.len() - captioned;
    if missing > 0 {
        findings.error(
            "Videos missing captions",
            format!("{missing} videos without captions"),
        );
    }
    ratio_score(captioned, videos.len())
}

fn transcripts(media: &[MediaFact], findings: &mut Findings) -> u8 {
    let audio = media.iter().filter(|m| m.is_audio()).count();
    if audio == 0 {
        findings.metric("Audio Elements", audio, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Audio Elements", audio, MetricStatus::Warning);
    findings.warning(
        "Audio content found",
        format!("{audio} audio elements - provide transcripts"),
    );
    60
}

fn visual_alerts(alerts: &[AlertFact], findings: &mut Findings) -> u8 {
    let announced = alerts.iter().filter(|alert| alert.is_announced()).count();
    if announced > 0 {
        findings.metric("Visual Alerts", announced, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Visual Alerts", announced, MetricStatus::Warning);
    findings.warning(
        "No visual alerts",
        "Expose status changes through role=\"alert\" or aria-live regions",
    );
    70
}
