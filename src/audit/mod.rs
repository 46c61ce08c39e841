//! Profile-driven accessibility audits.
//!
//! A run resolves a profile from the [`ProfileRegistry`], asks the [`PageInspector`] for
//! the fact groups that profile needs, scores them with the profile's check function and
//! packages the result as an [`AuditReport`]. [`AuditSession`] keeps only the newest run.

pub(crate) mod checks;
pub mod color;
pub mod domain;
pub mod engine;
pub mod facts;
pub mod inspector;
pub mod narrator;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use checks::{CheckFn, PLACEHOLDER_SCORE, UNOBSERVED_SCORE};
pub use domain::{
    CheckOutput, Device, Diagnostic, DiagnosticKind, Dimensions, Metric, MetricStatus,
    MetricValue, Profile, ProfileCategory, ProfileId, ProfileSummary, SubScores,
    UnknownProfileId,
};
pub use engine::{AuditEngine, AuditError};
pub use facts::{FactGroup, FactsQuery, PageFacts};
pub use inspector::{InspectionError, PageInspector, SnapshotError, SnapshotInspector};
pub use narrator::{
    steps_for, FixedJitter, ProgressJitter, ProgressNarrator, ProgressUpdate, RandomJitter,
};
pub use registry::{ProfileEntry, ProfileRegistry, RegistryError};
pub use report::AuditReport;
pub use scoring::{overall_score, ScoreBand};
pub use session::AuditSession;
