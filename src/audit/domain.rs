use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed catalog of accessibility lenses an audit can run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    Blind,
    Colorblind,
    Lowvision,
    Photosensitive,
    Deaf,
    Motor,
    Keyboard,
    Dyslexia,
    Cognitive,
    Adhd,
    Autism,
    Anxiety,
}

impl ProfileId {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Blind,
            Self::Colorblind,
            Self::Lowvision,
            Self::Photosensitive,
            Self::Deaf,
            Self::Motor,
            Self::Keyboard,
            Self::Dyslexia,
            Self::Cognitive,
            Self::Adhd,
            Self::Autism,
            Self::Anxiety,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blind => "blind",
            Self::Colorblind => "colorblind",
            Self::Lowvision => "lowvision",
            Self::Photosensitive => "photosensitive",
            Self::Deaf => "deaf",
            Self::Motor => "motor",
            Self::Keyboard => "keyboard",
            Self::Dyslexia => "dyslexia",
            Self::Cognitive => "cognitive",
            Self::Adhd => "adhd",
            Self::Autism => "autism",
            Self::Anxiety => "anxiety",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = UnknownProfileId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| UnknownProfileId(value.to_string()))
    }
}

/// Raised when a profile key does not name an entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown accessibility profile '{0}'")]
pub struct UnknownProfileId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileCategory {
    Vision,
    Hearing,
    Motor,
    Cognitive,
}

impl ProfileCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::Hearing => "hearing",
            Self::Motor => "motor",
            Self::Cognitive => "cognitive",
        }
    }
}

/// Number of sub-score dimensions every profile declares.
pub const DIMENSION_COUNT: usize = 4;

/// Ordered sub-score keys of a profile.
pub type Dimensions = [&'static str; DIMENSION_COUNT];

/// Static catalog entry describing one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: &'static str,
    pub category: ProfileCategory,
    pub description: &'static str,
    pub checks: [&'static str; DIMENSION_COUNT],
    pub dimensions: Dimensions,
}

impl Profile {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id,
            name: self.name,
            category: self.category,
            description: self.description,
        }
    }
}

/// Catalog view used to populate profile pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub name: &'static str,
    pub category: ProfileCategory,
    pub description: &'static str,
}

/// Device context carried into a report. Does not alter check logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
}

impl Device {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            other => Err(format!("unsupported device '{other}' (expected desktop or mobile)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Pass,
    Warning,
    Error,
    Info,
}

impl MetricStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Either a raw count or a short label such as `"Present"` or `"75%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Label(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        Self::Count(value as u64)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

/// One raw observation surfaced verbatim in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
    pub status: MetricStatus,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: impl Into<MetricValue>, status: MetricStatus) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Warning,
    Error,
}

impl DiagnosticKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Actionable finding raised when an observation leaves its pass band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub title: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn warning(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Dimension name to 0–100 score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubScores(BTreeMap<String, u8>);

impl SubScores {
    /// Pairs each declared dimension with its score, clamping to 100.
    pub fn from_dimensions(dimensions: Dimensions, scores: [u8; DIMENSION_COUNT]) -> Self {
        let entries = dimensions
            .iter()
            .zip(scores)
            .map(|(dimension, score)| (dimension.to_string(), score.min(100)))
            .collect();
        Self(entries)
    }

    pub fn get(&self, dimension: &str) -> Option<u8> {
        self.0.get(dimension).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> + '_ {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn covers(&self, dimensions: &Dimensions) -> bool {
        self.len() == dimensions.len() && dimensions.iter().all(|d| self.0.contains_key(*d))
    }
}

/// Everything a check function produces for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutput {
    pub metrics: Vec<Metric>,
    pub diagnostics: Vec<Diagnostic>,
    pub sub_scores: SubScores,
    /// Dimensions that raised at least one diagnostic.
    pub flagged: BTreeSet<&'static str>,
    /// Dimensions given a neutral score because nothing was measured.
    pub neutral: BTreeSet<&'static str>,
}
