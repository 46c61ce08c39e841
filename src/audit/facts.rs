//! Typed contract between the engine and the page inspector.
//!
//! A [`FactsQuery`] names the fact groups a profile needs; the inspector answers with a
//! [`PageFacts`] captured from one page state. Groups that were not captured stay `None`,
//! which checks treat as "no observation".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Independently capturable section of a page snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactGroup {
    Document,
    Headings,
    Controls,
    Regions,
    Images,
    Text,
    Media,
    Animations,
    Alerts,
    Stylesheets,
}

/// Structured facts request sent to the inspector in a single round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsQuery {
    pub groups: BTreeSet<FactGroup>,
}

impl FactsQuery {
    pub fn new(groups: impl IntoIterator<Item = FactGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    pub fn requests(&self, group: FactGroup) -> bool {
        self.groups.contains(&group)
    }
}

/// Observations about one coherent page state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFacts {
    pub document: Option<DocumentFacts>,
    pub headings: Option<Vec<HeadingFact>>,
    pub controls: Option<Vec<ControlFact>>,
    pub regions: Option<Vec<RegionFact>>,
    pub images: Option<Vec<ImageFact>>,
    pub text: Option<Vec<TextFact>>,
    pub media: Option<Vec<MediaFact>>,
    pub animations: Option<Vec<AnimationFact>>,
    pub alerts: Option<Vec<AlertFact>>,
    pub stylesheets: Option<StylesheetFacts>,
}

impl PageFacts {
    pub fn has(&self, group: FactGroup) -> bool {
        match group {
            FactGroup::Document => self.document.is_some(),
            FactGroup::Headings => self.headings.is_some(),
            FactGroup::Controls => self.controls.is_some(),
            FactGroup::Regions => self.regions.is_some(),
            FactGroup::Images => self.images.is_some(),
            FactGroup::Text => self.text.is_some(),
            FactGroup::Media => self.media.is_some(),
            FactGroup::Animations => self.animations.is_some(),
            FactGroup::Alerts => self.alerts.is_some(),
            FactGroup::Stylesheets => self.stylesheets.is_some(),
        }
    }

    /// True when none of the requested groups were captured.
    pub fn answers_nothing(&self, query: &FactsQuery) -> bool {
        !query.groups.iter().any(|group| self.has(*group))
    }

    /// Copy containing only the requested groups.
    pub fn restricted_to(&self, query: &FactsQuery) -> Self {
        let keep = |group| query.requests(group);
        Self {
            document: self.document.clone().filter(|_| keep(FactGroup::Document)),
            headings: self.headings.clone().filter(|_| keep(FactGroup::Headings)),
            controls: self.controls.clone().filter(|_| keep(FactGroup::Controls)),
            regions: self.regions.clone().filter(|_| keep(FactGroup::Regions)),
            images: self.images.clone().filter(|_| keep(FactGroup::Images)),
            text: self.text.clone().filter(|_| keep(FactGroup::Text)),
            media: self.media.clone().filter(|_| keep(FactGroup::Media)),
            animations: self.animations.clone().filter(|_| keep(FactGroup::Animations)),
            alerts: self.alerts.clone().filter(|_| keep(FactGroup::Alerts)),
            stylesheets: self.stylesheets.clone().filter(|_| keep(FactGroup::Stylesheets)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFacts {
    /// `content` attribute of `meta[name="viewport"]`.
    pub viewport: Option<String>,
    /// Rendered text of `document.body`.
    pub body_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingFact {
    /// 1 for `h1` through 6 for `h6`; `None` when the capture could not tell.
    pub level: Option<u8>,
    pub text: String,
}

/// Interactive candidate element: native controls, anything with a tabindex, button role,
/// draggable flag or inline mouse handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlFact {
    pub tag: String,
    pub role: Option<String>,
    pub text: String,
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    /// A `label[for]` pointing at this element's id exists.
    pub has_label: bool,
    pub tabindex: Option<i32>,
    /// Rendered size in CSS pixels; `None` when the element was not laid out.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub draggable: bool,
    pub href: Option<String>,
    /// Computed `text-decoration`.
    pub text_decoration: Option<String>,
    /// Inline event handler attributes such as `onmousedown`.
    pub handlers: Vec<String>,
    /// Inside `nav` or `[role="navigation"]`.
    pub in_navigation: bool,
}

impl ControlFact {
    fn tag_is(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    fn role_is(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .map(|value| value.trim().eq_ignore_ascii_case(role))
            .unwrap_or(false)
    }

    /// `button, a, input, select, textarea`
    pub fn is_native_control(&self) -> bool {
        self.tag_is(&["button", "a", "input", "select", "textarea"])
    }

    /// `a, button, input, select, textarea, [tabindex]`
    pub fn is_focusable_candidate(&self) -> bool {
        self.is_native_control() || self.tabindex.is_some()
    }

    /// `button, a, [role="button"]`
    pub fn is_click_target(&self) -> bool {
        self.tag_is(&["button", "a"]) || self.role_is("button")
    }

    /// `button, [role="button"]`
    pub fn is_button_like(&self) -> bool {
        self.tag_is(&["button"]) || self.role_is("button")
    }

    pub fn is_button(&self) -> bool {
        self.tag_is(&["button"])
    }

    pub fn is_link(&self) -> bool {
        self.tag_is(&["a"])
    }

    /// `input, select, textarea`
    pub fn is_form_field(&self) -> bool {
        self.tag_is(&["input", "select", "textarea"])
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    fn non_blank(value: &Option<String>) -> bool {
        value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
    }

    pub fn has_aria_label(&self) -> bool {
        Self::non_blank(&self.aria_label)
    }

    pub fn has_accessible_name(&self) -> bool {
        self.has_aria_label()
            || Self::non_blank(&self.aria_labelledby)
            || !self.trimmed_text().is_empty()
            || self.has_label
    }

    pub fn removed_from_tab_order(&self) -> bool {
        self.tabindex == Some(-1)
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.iter().any(|h| h.eq_ignore_ascii_case(name))
    }

    /// `[onmousedown]:not([onkeydown])` or `[onmouseover]:not([onfocus])`
    pub fn is_mouse_only(&self) -> bool {
        (self.has_handler("onmousedown") && !self.has_handler("onkeydown"))
            || (self.has_handler("onmouseover") && !self.has_handler("onfocus"))
    }

    pub fn is_in_page_link(&self) -> bool {
        self.is_link()
            && self
                .href
                .as_deref()
                .map(|href| href.starts_with('#'))
                .unwrap_or(false)
    }

    /// Both edges were measured and at least one falls under `min_px`.
    pub fn is_undersized(&self, min_px: f64) -> bool {
        match (self.width, self.height) {
            (Some(width), Some(height)) => width < min_px || height < min_px,
            _ => false,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    pub fn is_underlined(&self) -> bool {
        self.text_decoration
            .as_deref()
            .map(|value| value.contains("underline"))
            .unwrap_or(false)
    }
}

/// Sectioning or landmark element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionFact {
    pub tag: String,
    pub role: Option<String>,
}

impl RegionFact {
    const LANDMARK_TAGS: [&'static str; 5] = ["main", "nav", "header", "footer", "aside"];
    const LANDMARK_ROLES: [&'static str; 4] = ["main", "navigation", "banner", "contentinfo"];

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn is_landmark(&self) -> bool {
        Self::LANDMARK_TAGS.iter().any(|tag| self.is_tag(tag))
            || self
                .role
                .as_deref()
                .map(|role| {
                    Self::LANDMARK_ROLES
                        .iter()
                        .any(|candidate| role.trim().eq_ignore_ascii_case(candidate))
                })
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFact {
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl ImageFact {
    pub fn missing_alt(&self) -> bool {
        self.alt.as_deref().map(|alt| alt.trim().is_empty()).unwrap_or(true)
    }

    pub fn is_gif(&self) -> bool {
        self.src
            .as_deref()
            .map(|src| src.to_ascii_lowercase().contains(".gif"))
            .unwrap_or(false)
    }
}

/// Text-bearing element with its computed typography and colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFact {
    pub tag: String,
    pub font_size: Option<String>,
    pub line_height: Option<String>,
    pub text_align: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub word_count: u32,
}

impl TextFact {
    pub fn tag_in(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    pub fn font_size_px(&self) -> Option<f64> {
        self.font_size.as_deref().and_then(leading_number)
    }

    pub fn line_height_px(&self) -> Option<f64> {
        self.line_height.as_deref().and_then(leading_number)
    }

    pub fn is_justified(&self) -> bool {
        self.text_align
            .as_deref()
            .map(|align| align.trim().eq_ignore_ascii_case("justify"))
            .unwrap_or(false)
    }
}

/// Parses the leading decimal number of a CSS length such as `"15.5px"`.
pub fn leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(idx, ch)| {
            !(ch.is_ascii_digit() || *ch == '.' || (*idx == 0 && (*ch == '-' || *ch == '+')))
        })
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    /// Missing or unrecognised element kind; counted by neither check.
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFact {
    pub kind: MediaKind,
    pub autoplay: bool,
    /// `track[kind="captions"]` plus `track[kind="subtitles"]` children.
    pub caption_tracks: u32,
}

impl MediaFact {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn is_audio(&self) -> bool {
        self.kind == MediaKind::Audio
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationFact {
    /// Computed `animation` shorthand.
    pub animation: String,
    /// The element's `style` attribute mentions `animation`.
    pub inline: bool,
}

impl AnimationFact {
    pub fn is_declared(&self) -> bool {
        let value = self.animation.trim();
        !value.is_empty() && !value.eq_ignore_ascii_case("none")
    }

    /// Declared and not a zero-duration placeholder.
    pub fn is_running(&self) -> bool {
        self.is_declared() && !self.animation.contains("0s")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertFact {
    pub role: Option<String>,
    pub aria_live: Option<String>,
    pub classes: Vec<String>,
}

impl AlertFact {
    /// `[role="alert"], [aria-live]`
    pub fn is_announced(&self) -> bool {
        self.role
            .as_deref()
            .map(|role| role.trim().eq_ignore_ascii_case("alert"))
            .unwrap_or(false)
            || self.aria_live.is_some()
    }

    /// `.error, .warning, [role="alert"]`
    pub fn is_error_state(&self) -> bool {
        self.classes
            .iter()
            .any(|class| class == "error" || class == "warning")
            || self
                .role
                .as_deref()
                .map(|role| role.trim().eq_ignore_ascii_case("alert"))
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetFacts {
    /// Readable rules whose selector text contains `:focus`; `None` when the sheets could
    /// not be read.
    pub focus_rules: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_mirrors_css_lengths() {
        assert_eq!(leading_number("16px"), Some(16.0));
        assert_eq!(leading_number(" 13.5px"), Some(13.5));
        assert_eq!(leading_number("normal"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn restricted_to_drops_unrequested_groups() {
        let facts = PageFacts {
            headings: Some(vec![HeadingFact {
                level: Some(1),
                text: "Welcome".to_string(),
            }]),
            images: Some(Vec::new()),
            ..PageFacts::default()
        };
        let query = FactsQuery::new([FactGroup::Headings, FactGroup::Controls]);

        let restricted = facts.restricted_to(&query);

        assert!(restricted.has(FactGroup::Headings));
        assert!(!restricted.has(FactGroup::Images));
        assert!(!restricted.has(FactGroup::Controls));
        assert!(!restricted.answers_nothing(&query));
    }

    #[test]
    fn accessible_name_sources() {
        let bare = ControlFact {
            tag: "button".to_string(),
            text: "   ".to_string(),
            ..ControlFact::default()
        };
        assert!(!bare.has_accessible_name());

        let labelled = ControlFact {
            aria_labelledby: Some("caption".to_string()),
            ..bare.clone()
        };
        assert!(labelled.has_accessible_name());

        let for_label = ControlFact {
            tag: "input".to_string(),
            has_label: true,
            ..ControlFact::default()
        };
        assert!(for_label.has_accessible_name());
    }

    #[test]
    fn mouse_only_requires_missing_keyboard_twin() {
        let handler = |names: &[&str]| ControlFact {
            tag: "div".to_string(),
            handlers: names.iter().map(|n| n.to_string()).collect(),
            ..ControlFact::default()
        };
        assert!(handler(&["onmousedown"]).is_mouse_only());
        assert!(!handler(&["onmousedown", "onkeydown"]).is_mouse_only());
        assert!(handler(&["onmouseover"]).is_mouse_only());
        assert!(!handler(&["onmouseover", "onfocus"]).is_mouse_only());
    }

    #[test]
    fn zero_duration_animations_are_not_running() {
        let fact = |value: &str| AnimationFact {
            animation: value.to_string(),
            inline: false,
        };
        assert!(fact("spin 2s linear infinite").is_running());
        assert!(!fact("none").is_declared());
        assert!(fact("fade 0s ease").is_declared());
        assert!(!fact("fade 0s ease").is_running());
    }

    #[test]
    fn landmarks_match_tags_and_roles() {
        let region = |tag: &str, role: Option<&str>| RegionFact {
            tag: tag.to_string(),
            role: role.map(str::to_string),
        };
        assert!(region("nav", None).is_landmark());
        assert!(region("div", Some("contentinfo")).is_landmark());
        assert!(!region("section", None).is_landmark());
    }
}
