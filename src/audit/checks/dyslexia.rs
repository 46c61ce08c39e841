use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{FactGroup, PageFacts, TextFact};
use super::{decay, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["spacing", "lineHeight", "fontSize", "alignment"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Text];

const MIN_LINE_HEIGHT_RATIO: f64 = 1.5;
const MIN_FONT_PX: f64 = 14.0;
const BODY_TAGS: [&str; 4] = ["p", "span", "li", "td"];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    let text = facts.text.as_deref();

    findings.begin("lineHeight");
    let line_height = match text {
        Some(text) => line_height(text, &mut findings),
        None => findings.unobserved("Line Height Issues"),
    };
    findings.begin("fontSize");
    let font_size = match text {
        Some(text) => font_size(text, &mut findings),
        None => findings.unobserved("Small Text Elements"),
    };
    findings.begin("alignment");
    let alignment = match text {
        Some(text) => alignment(text, &mut findings),
        None => findings.unobserved("Justified Text"),
    };
    findings.begin("spacing");
    let spacing = findings.placeholder("Letter Spacing");

    findings.finish(DIMENSIONS, [spacing, line_height, font_size, alignment])
}

fn paragraphs(text: &[TextFact]) -> impl Iterator<Item = &TextFact> {
    text.iter().filter(|fact| fact.tag_in(&["p"]))
}

fn is_tight(fact: &TextFact) -> bool {
    match (fact.line_height_px(), fact.font_size_px()) {
        (Some(line), Some(size)) if line != 0.0 && size != 0.0 => {
            line / size < MIN_LINE_HEIGHT_RATIO
        }
        _ => false,
    }
}

fn line_height(text: &[TextFact], findings: &mut Findings) -> u8 {
    let tight = paragraphs(text).filter(|fact| is_tight(fact)).count();
    let band = Band::of_count(tight, 3);

    findings.metric("Line Height Issues", tight, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Some tight line spacing", "Consider line-height of 1.5 or more");
            70
        }
        Band::Error => {
            findings.error(
                "Poor line spacing",
                format!("{tight} paragraphs with tight line-height"),
            );
            decay(tight, 15, 0)
        }
    }
}

fn font_size(text: &[TextFact], findings: &mut Findings) -> u8 {
    let small = text
        .iter()
        .filter(|fact| fact.tag_in(&BODY_TAGS))
        .filter(|fact| fact.font_size_px().map(|px| px < MIN_FONT_PX).unwrap_or(false))
        .count();
    let band = Band::of_count(small, 10);

    findings.metric("Small Text Elements", small, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning("Some small text", "Recommend minimum 16px for body text");
            70
        }
        Band::Error => {
            findings.error("Text too small", format!("{small} elements under 14px"));
            decay(small, 5, 0)
        }
    }
}

fn alignment(text: &[TextFact], findings: &mut Findings) -> u8 {
    let justified = paragraphs(text).filter(|fact| fact.is_justified()).count();
    if justified == 0 {
        findings.metric("Justified Text", justified, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Justified Text", justified, MetricStatus::Warning);
    findings.warning(
        "Justified text found",
        format!("{justified} paragraphs - use left-align instead"),
    );
    70
}
