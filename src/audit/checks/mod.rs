//! Per-profile check functions.
//!
//! Every check is a pure `fn(&PageFacts) -> CheckOutput`. Each dimension classifies one
//! observation into pass, warning or error bands; leaving the pass band appends exactly one
//! diagnostic and pulls the dimension below 100. A dimension whose fact group was not
//! captured records an informational metric and scores [`UNOBSERVED_SCORE`].

pub(crate) mod adhd;
pub(crate) mod anxiety;
pub(crate) mod autism;
pub(crate) mod blind;
pub(crate) mod cognitive;
pub(crate) mod colorblind;
pub(crate) mod deaf;
pub(crate) mod dyslexia;
pub(crate) mod keyboard;
pub(crate) mod low_vision;
pub(crate) mod motor;
pub(crate) mod photosensitive;

use std::collections::BTreeSet;

use super::domain::{
    CheckOutput, Diagnostic, Dimensions, Metric, MetricStatus, MetricValue, SubScores,
    DIMENSION_COUNT,
};
use super::facts::{AnimationFact, ControlFact, MediaFact};

/// Neutral score for a dimension whose facts were not captured.
pub const UNOBSERVED_SCORE: u8 = 80;
/// Fixed score for dimensions the engine only acknowledges.
pub const PLACEHOLDER_SCORE: u8 = 80;

/// Signature shared by every profile's check function.
pub type CheckFn = fn(&super::facts::PageFacts) -> CheckOutput;

/// Severity band an observation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Band {
    Pass,
    Warning,
    Error,
}

impl Band {
    /// Zero passes, up to `warning_limit` warns, anything above errors.
    pub(crate) fn of_count(count: usize, warning_limit: usize) -> Self {
        Self::with_limits(count, 0, warning_limit)
    }

    /// Up to `pass_limit` passes, up to `warning_limit` warns, anything above errors.
    pub(crate) fn with_limits(count: usize, pass_limit: usize, warning_limit: usize) -> Self {
        if count <= pass_limit {
            Self::Pass
        } else if count <= warning_limit {
            Self::Warning
        } else {
            Self::Error
        }
    }

    pub(crate) fn status(self) -> MetricStatus {
        match self {
            Self::Pass => MetricStatus::Pass,
            Self::Warning => MetricStatus::Warning,
            Self::Error => MetricStatus::Error,
        }
    }
}

/// `max(floor, 100 - step * count)` without overflow.
pub(crate) fn decay(count: usize, step: u32, floor: u8) -> u8 {
    let penalty = (count as u64).saturating_mul(u64::from(step));
    100u64.saturating_sub(penalty).max(u64::from(floor)) as u8
}

/// `round(part / total * 100)`, or 100 when there is nothing to measure.
///
/// Any shortfall stays below 100 even when rounding would reach it.
pub(crate) fn ratio_score(part: usize, total: usize) -> u8 {
    if part >= total {
        return 100;
    }
    let rounded = ((part as f64 / total as f64) * 100.0).round() as u8;
    rounded.min(99)
}

/// Accumulates metrics and diagnostics while a check walks its dimensions.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    metrics: Vec<Metric>,
    diagnostics: Vec<Diagnostic>,
    current: Option<&'static str>,
    flagged: BTreeSet<&'static str>,
    neutral: BTreeSet<&'static str>,
}

impl Findings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attributes the diagnostics and neutral scores that follow to `dimension`.
    pub(crate) fn begin(&mut self, dimension: &'static str) {
        self.current = Some(dimension);
    }

    pub(crate) fn metric(
        &mut self,
        name: &str,
        value: impl Into<MetricValue>,
        status: MetricStatus,
    ) {
        self.metrics.push(Metric::new(name, value, status));
    }

    pub(crate) fn warning(&mut self, title: &str, detail: impl Into<String>) {
        self.push(Diagnostic::warning(title, detail));
    }

    pub(crate) fn error(&mut self, title: &str, detail: impl Into<String>) {
        self.push(Diagnostic::error(title, detail));
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        if let Some(dimension) = self.current {
            self.flagged.insert(dimension);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Records a diagnostic matching `band`; passing bands record nothing.
    pub(crate) fn flag(
        &mut self,
        band: Band,
        warning_title: &str,
        error_title: &str,
        detail: impl Into<String>,
    ) {
        match band {
            Band::Pass => {}
            Band::Warning => self.warning(warning_title, detail),
            Band::Error => self.error(error_title, detail),
        }
    }

    pub(crate) fn unobserved(&mut self, metric: &str) -> u8 {
        self.metric(metric, "Not captured", MetricStatus::Info);
        self.neutral(UNOBSERVED_SCORE)
    }

    pub(crate) fn placeholder(&mut self, metric: &str) -> u8 {
        self.metric(metric, "Checked", MetricStatus::Info);
        self.neutral(PLACEHOLDER_SCORE)
    }

    /// Scores the current dimension without measuring it.
    pub(crate) fn neutral(&mut self, score: u8) -> u8 {
        if let Some(dimension) = self.current {
            self.neutral.insert(dimension);
        }
        score
    }

    pub(crate) fn finish(self, dimensions: Dimensions, scores: [u8; DIMENSION_COUNT]) -> CheckOutput {
        CheckOutput {
            metrics: self.metrics,
            diagnostics: self.diagnostics,
            sub_scores: SubScores::from_dimensions(dimensions, scores),
            flagged: self.flagged,
            neutral: self.neutral,
        }
    }
}

pub(crate) fn running_animations(animations: &[AnimationFact]) -> usize {
    animations.iter().filter(|fact| fact.is_running()).count()
}

pub(crate) fn autoplay_media(media: &[MediaFact]) -> usize {
    media.iter().filter(|fact| fact.autoplay).count()
}

/// Links and buttons inside navigation regions.
pub(crate) fn navigation_items(controls: &[ControlFact]) -> usize {
    controls
        .iter()
        .filter(|control| control.in_navigation && (control.is_link() || control.is_button()))
        .count()
}

/// In-page link whose text mentions skipping; optionally also `#main`/`#content` targets.
pub(crate) fn has_skip_link(controls: &[ControlFact], accept_main_targets: bool) -> bool {
    controls
        .iter()
        .filter(|control| control.is_in_page_link())
        .any(|link| {
            link.text.to_lowercase().contains("skip")
                || (accept_main_targets
                    && matches!(link.href.as_deref(), Some("#main") | Some("#content")))
        })
}

/// Candidates carrying `tabindex="-1"`.
pub(crate) fn removed_from_tab_order(controls: &[ControlFact]) -> usize {
    controls
        .iter()
        .filter(|control| control.is_focusable_candidate() && control.removed_from_tab_order())
        .count()
}
