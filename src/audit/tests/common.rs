use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::oneshot;

use crate::audit::facts::{
    AlertFact, AnimationFact, ControlFact, DocumentFacts, FactsQuery, HeadingFact, ImageFact,
    MediaFact, MediaKind, PageFacts, RegionFact, StylesheetFacts, TextFact,
};
use crate::audit::inspector::{InspectionError, PageInspector};

pub(super) fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Every fact group captured, nothing found.
pub(super) fn empty_page() -> PageFacts {
    PageFacts {
        document: Some(DocumentFacts::default()),
        headings: Some(Vec::new()),
        controls: Some(Vec::new()),
        regions: Some(Vec::new()),
        images: Some(Vec::new()),
        text: Some(Vec::new()),
        media: Some(Vec::new()),
        animations: Some(Vec::new()),
        alerts: Some(Vec::new()),
        stylesheets: Some(StylesheetFacts {
            focus_rules: Some(0),
        }),
    }
}

pub(super) fn heading(level: u8, text: &str) -> HeadingFact {
    HeadingFact {
        level: Some(level),
        text: text.to_string(),
    }
}

pub(super) fn control(tag: &str, text: &str) -> ControlFact {
    ControlFact {
        tag: tag.to_string(),
        text: text.to_string(),
        width: Some(120.0),
        height: Some(48.0),
        text_decoration: Some("underline".to_string()),
        ..ControlFact::default()
    }
}

pub(super) fn link(href: &str, text: &str) -> ControlFact {
    ControlFact {
        href: Some(href.to_string()),
        ..control("a", text)
    }
}

pub(super) fn nav_link(text: &str) -> ControlFact {
    ControlFact {
        in_navigation: true,
        ..link("/section", text)
    }
}

pub(super) fn input(labelled: bool) -> ControlFact {
    ControlFact {
        has_label: labelled,
        ..control("input", "")
    }
}

pub(super) fn region(tag: &str) -> RegionFact {
    RegionFact {
        tag: tag.to_string(),
        role: None,
    }
}

pub(super) fn image(src: &str, alt: Option<&str>) -> ImageFact {
    ImageFact {
        src: Some(src.to_string()),
        alt: alt.map(str::to_string),
    }
}

pub(super) fn text(tag: &str, font_size: &str) -> TextFact {
    TextFact {
        tag: tag.to_string(),
        font_size: Some(font_size.to_string()),
        line_height: Some("28px".to_string()),
        text_align: Some("left".to_string()),
        color: Some("rgb(20, 20, 20)".to_string()),
        background_color: Some("rgba(0, 0, 0, 0)".to_string()),
        word_count: 40,
    }
}

pub(super) fn colored_text(tag: &str, color: &str, background: &str) -> TextFact {
    TextFact {
        color: Some(color.to_string()),
        background_color: Some(background.to_string()),
        ..text(tag, "18px")
    }
}

pub(super) fn video(autoplay: bool, caption_tracks: u32) -> MediaFact {
    MediaFact {
        kind: MediaKind::Video,
        autoplay,
        caption_tracks,
    }
}

pub(super) fn audio(autoplay: bool) -> MediaFact {
    MediaFact {
        kind: MediaKind::Audio,
        autoplay,
        caption_tracks: 0,
    }
}

pub(super) fn animation(value: &str, inline: bool) -> AnimationFact {
    AnimationFact {
        animation: value.to_string(),
        inline,
    }
}

pub(super) fn alert(role: Option<&str>, aria_live: Option<&str>, classes: &[&str]) -> AlertFact {
    AlertFact {
        role: role.map(str::to_string),
        aria_live: aria_live.map(str::to_string),
        classes: classes.iter().map(|class| class.to_string()).collect(),
    }
}

pub(super) fn titles(diagnostics: &[crate::audit::Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.title.as_str()).collect()
}

/// Inspector that answers with a fixed page and counts its calls.
pub(super) struct StaticInspector {
    facts: PageFacts,
    calls: AtomicUsize,
}

impl StaticInspector {
    pub(super) fn new(facts: PageFacts) -> Self {
        Self {
            facts,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageInspector for StaticInspector {
    async fn evaluate(&self, query: &FactsQuery) -> Result<PageFacts, InspectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.facts.restricted_to(query))
    }
}

/// Inspector whose first call blocks until released; later calls answer immediately.
pub(super) struct GatedInspector {
    facts: PageFacts,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedInspector {
    pub(super) fn new(facts: PageFacts) -> (Self, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        let inspector = Self {
            facts,
            gate: Mutex::new(Some(gate)),
        };
        (inspector, release)
    }
}

#[async_trait]
impl PageInspector for GatedInspector {
    async fn evaluate(&self, query: &FactsQuery) -> Result<PageFacts, InspectionError> {
        let gate = self.gate.lock().expect("gate mutex poisoned").take();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| InspectionError::Unavailable("gate dropped".to_string()))?;
        }
        Ok(self.facts.restricted_to(query))
    }
}

/// Inspector that never answers.
pub(super) struct HangingInspector;

#[async_trait]
impl PageInspector for HangingInspector {
    async fn evaluate(&self, _query: &FactsQuery) -> Result<PageFacts, InspectionError> {
        std::future::pending().await
    }
}

pub(super) struct FailingInspector(pub(super) InspectionError);

#[async_trait]
impl PageInspector for FailingInspector {
    async fn evaluate(&self, _query: &FactsQuery) -> Result<PageFacts, InspectionError> {
        Err(self.0.clone())
    }
}
