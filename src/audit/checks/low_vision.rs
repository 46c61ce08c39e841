use super::super::color::{is_low_contrast, LOW_VISION_MIN_DIFFERENCE};
use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{DocumentFacts, FactGroup, PageFacts, TextFact};
use super::{decay, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["textSize", "contrast", "zoomable", "focus"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Text, FactGroup::Document];

const MIN_FONT_PX: f64 = 16.0;
const BODY_TAGS: [&str; 5] = ["p", "span", "li", "td", "th"];
const CONTRAST_TAGS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];
const ZOOM_BLOCKERS: [&str; 3] = ["maximum-scale=1", "user-scalable=no", "user-scalable=0"];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("textSize");
    let text_size = match facts.text.as_deref() {
        Some(text) => text_size(text, &mut findings),
        None => findings.unobserved("Small Text"),
    };
    findings.begin("zoomable");
    let zoomable = match facts.document.as_ref() {
        Some(document) => zoom(document, &mut findings),
        None => findings.unobserved("Zoom"),
    };
    findings.begin("contrast");
    let contrast = match facts.text.as_deref() {
        Some(text) => contrast(text, &mut findings),
        None => findings.unobserved("Low Contrast"),
    };
    findings.begin("focus");
    let focus = findings.placeholder("Focus Indicators");

    findings.finish(DIMENSIONS, [text_size, contrast, zoomable, focus])
}

fn text_size(text: &[TextFact], findings: &mut Findings) -> u8 {
    let small = text
        .iter()
        .filter(|fact| fact.tag_in(&BODY_TAGS))
        .filter(|fact| fact.font_size_px().map(|px| px < MIN_FONT_PX).unwrap_or(false))
        .count();
    let band = Band::of_count(small, 10);

    findings.metric("Small Text", small, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some text below 16px",
                format!("{small} elements under 16px"),
            );
            85
        }
        Band::Error => {
            findings.error(
                "Text too small for low vision",
                format!("{small} elements under 16px"),
            );
            decay(small, 5, 0)
        }
    }
}

fn zoom(document: &DocumentFacts, findings: &mut Findings) -> u8 {
    let viewport = document.viewport.as_deref().unwrap_or_default();
    let blocked = ZOOM_BLOCKERS
        .iter()
        .any(|blocker| viewport.contains(blocker));

    if blocked {
        findings.metric("Zoom", "Blocked", MetricStatus::Error);
        findings.error("Zoom is disabled", "Remove user-scalable=no from viewport");
        30
    } else {
        findings.metric("Zoom", "Allowed", MetricStatus::Pass);
        100
    }
}

fn contrast(text: &[TextFact], findings: &mut Findings) -> u8 {
    let low_contrast = text
        .iter()
        .filter(|fact| fact.tag_in(&CONTRAST_TAGS))
        .filter(|fact| {
            is_low_contrast(
                fact.color.as_deref(),
                fact.background_color.as_deref(),
                LOW_VISION_MIN_DIFFERENCE,
            )
        })
        .count();
    let band = Band::of_count(low_contrast, 5);

    findings.metric("Low Contrast", low_contrast, band.status());
    findings.flag(
        band,
        "Some low contrast text",
        "Low contrast text",
        format!("{low_contrast} text blocks are hard to distinguish from their background"),
    );
    decay(low_contrast, 10, 0)
}
