use super::super::color::{is_low_contrast, COLORBLIND_MIN_DIFFERENCE};
use super::super::domain::{CheckOutput, Dimensions, MetricStatus};
use super::super::facts::{ControlFact, FactGroup, ImageFact, PageFacts, TextFact};
use super::{decay, ratio_score, Band, Findings};

pub(crate) const DIMENSIONS: Dimensions = ["contrast", "altText", "colorOnly", "forms"];
pub(crate) const FACTS: &[FactGroup] = &[FactGroup::Images, FactGroup::Controls, FactGroup::Text];

const CONTRAST_TAGS: [&str; 11] = [
    "p", "span", "h1", "h2", "h3", "h4", "h5", "h6", "a", "button", "label",
];

pub(crate) fn run(facts: &PageFacts) -> CheckOutput {
    let mut findings = Findings::new();

    findings.begin("altText");
    let alt_text = match facts.images.as_deref() {
        Some(images) => alt_text(images, &mut findings),
        None => findings.unobserved("Alt Text Coverage"),
    };
    findings.begin("colorOnly");
    let color_only = match facts.controls.as_deref() {
        Some(controls) => color_only_links(controls, &mut findings),
        None => findings.unobserved("Color-Only Links"),
    };
    findings.begin("contrast");
    let contrast = match facts.text.as_deref() {
        Some(text) => contrast(text, &mut findings),
        None => findings.unobserved("Contrast Issues"),
    };
    findings.begin("forms");
    let forms = match facts.controls.as_deref() {
        Some(controls) => form_labels(controls, &mut findings),
        None => findings.unobserved("Unlabeled Forms"),
    };

    findings.finish(DIMENSIONS, [contrast, alt_text, color_only, forms])
}

fn alt_text(images: &[ImageFact], findings: &mut Findings) -> u8 {
    let missing = images.iter().filter(|image| image.missing_alt()).count();
    let coverage = ratio_score(images.len() - missing, images.len());
    let band = Band::of_count(missing, 3);

    findings.metric("Images Analyzed", images.len(), MetricStatus::Info);
    findings.metric("Alt Text Coverage", format!("{coverage}%"), band.status());
    findings.flag(
        band,
        "Images missing alt text",
        "Images missing alt text",
        format!("Found {missing} images without alt"),
    );
    decay(missing, 15, 0)
}

fn color_only_links(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let color_only = controls
        .iter()
        .filter(|control| {
            control.is_link() && !control.trimmed_text().is_empty() && !control.is_underlined()
        })
        .count();
    let band = Band::of_count(color_only, 3);

    findings.metric("Color-Only Links", color_only, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some links rely on color only",
                format!("{color_only} links could be harder to identify"),
            );
            decay(color_only, 10, 50)
        }
        Band::Error => {
            findings.error(
                "Links rely on color only",
                format!("{color_only} links without underline"),
            );
            decay(color_only, 10, 0)
        }
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
                COLORBLIND_MIN_DIFFERENCE,
            )
        })
        .count();
    let band = Band::of_count(low_contrast, 5);

    findings.metric("Contrast Issues", low_contrast, band.status());
    match band {
        Band::Pass => 100,
        Band::Warning => {
            findings.warning(
                "Some low contrast text",
                format!("{low_contrast} elements may be hard to read"),
            );
            decay(low_contrast, 8, 50)
        }
        Band::Error => {
            findings.error(
                "Low contrast text",
                format!("{low_contrast} elements with poor contrast"),
            );
            decay(low_contrast, 8, 0)
        }
    }
}

fn form_labels(controls: &[ControlFact], findings: &mut Findings) -> u8 {
    let unlabeled = controls
        .iter()
        .filter(|control| control.is_form_field() && !control.has_label && !control.has_aria_label())
        .count();

    if unlabeled == 0 {
        findings.metric("Unlabeled Forms", unlabeled, MetricStatus::Pass);
        return 100;
    }
    findings.metric("Unlabeled Forms", unlabeled, MetricStatus::Warning);
    findings.warning(
        "Form fields missing labels",
        format!("{unlabeled} inputs without labels"),
    );
    decay(unlabeled, 15, 0)
}
