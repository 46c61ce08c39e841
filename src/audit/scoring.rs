use serde::Serialize;

use super::domain::{MetricStatus, SubScores};

/// Unweighted mean of the sub-scores, rounded half up. Empty input scores 0.
pub fn overall_score(sub_scores: &SubScores) -> u8 {
    let count = sub_scores.len() as u32;
    if count == 0 {
        return 0;
    }
    let total: u32 = sub_scores.values().map(u32::from).sum();
    ((total * 2 + count) / (count * 2)).min(100) as u8
}

/// Display severity band for any 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreBand {
    pub const GOOD_FROM: u8 = 90;
    pub const NEEDS_IMPROVEMENT_FROM: u8 = 50;

    pub fn classify(score: u8) -> Self {
        if score >= Self::GOOD_FROM {
            Self::Good
        } else if score >= Self::NEEDS_IMPROVEMENT_FROM {
            Self::NeedsImprovement
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsImprovement => "needs improvement",
            Self::Poor => "poor",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#0cce6b",
            Self::NeedsImprovement => "#ffa400",
            Self::Poor => "#ff4e42",
        }
    }

    pub const fn background(self) -> &'static str {
        match self {
            Self::Good => "rgba(12, 206, 107, 0.15)",
            Self::NeedsImprovement => "rgba(255, 164, 0, 0.15)",
            Self::Poor => "rgba(255, 78, 66, 0.15)",
        }
    }

    pub const fn status(self) -> MetricStatus {
        match self {
            Self::Good => MetricStatus::Pass,
            Self::NeedsImprovement => MetricStatus::Warning,
            Self::Poor => MetricStatus::Error,
        }
    }
}
