//! Cosmetic progress narration shown while an audit runs.
//!
//! Nothing here feeds back into the report; the narrator only needs to know when the
//! work it decorates has finished.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use super::domain::ProfileId;

pub const MIN_INCREMENT: u8 = 5;
pub const MAX_INCREMENT: u8 = 15;
/// Progress never reaches 100 until the work completes.
pub const PROGRESS_CEILING: u8 = 95;

const DEFAULT_STEPS: &[&str] = &[
    "Loading page structure",
    "Collecting page facts",
    "Running accessibility checks",
    "Scoring results",
    "Preparing report",
];

/// Ordered step labels for a profile key; unknown keys get a generic list.
pub fn steps_for(profile_id: &str) -> &'static [&'static str] {
    let Ok(id) = profile_id.parse::<ProfileId>() else {
        return DEFAULT_STEPS;
    };
    match id {
        ProfileId::Blind => &[
            "Reading heading outline",
            "Checking accessible names",
            "Mapping landmarks",
            "Looking for skip links",
            "Preparing report",
        ],
        ProfileId::Colorblind => &[
            "Reviewing image alternatives",
            "Checking link styling",
            "Measuring text contrast",
            "Checking form labels",
            "Preparing report",
        ],
        ProfileId::Lowvision => &[
            "Measuring text sizes",
            "Checking zoom support",
            "Measuring text contrast",
            "Preparing report",
        ],
        ProfileId::Photosensitive => &[
            "Scanning animations",
            "Checking auto-playing media",
            "Looking for animated images",
            "Preparing report",
        ],
        ProfileId::Deaf => &[
            "Checking video captions",
            "Looking for audio content",
            "Checking visual alerts",
            "Preparing report",
        ],
        ProfileId::Motor => &[
            "Checking keyboard reach",
            "Measuring click targets",
            "Checking focus styles",
            "Looking for drag interactions",
            "Preparing report",
        ],
        ProfileId::Keyboard => &[
            "Walking tab order",
            "Looking for mouse-only handlers",
            "Looking for skip links",
            "Preparing report",
        ],
        ProfileId::Dyslexia => &[
            "Measuring line height",
            "Measuring text sizes",
            "Checking text alignment",
            "Preparing report",
        ],
        ProfileId::Cognitive => &[
            "Counting navigation items",
            "Checking page layout",
            "Looking for distractions",
            "Reviewing content headings",
            "Preparing report",
        ],
        ProfileId::Adhd => &[
            "Checking auto-playing media",
            "Measuring visual noise",
            "Reviewing content length",
            "Counting navigation items",
            "Preparing report",
        ],
        ProfileId::Autism => &[
            "Checking navigation consistency",
            "Measuring sensory load",
            "Checking button labels",
            "Preparing report",
        ],
        ProfileId::Anxiety => &[
            "Scanning for time pressure",
            "Reviewing error states",
            "Checking calls to action",
            "Measuring form length",
            "Preparing report",
        ],
    }
}

/// Source of per-tick progress increments.
pub trait ProgressJitter {
    /// Next increment, expected within `MIN_INCREMENT..=MAX_INCREMENT`.
    fn increment(&mut self) -> u8;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl ProgressJitter for RandomJitter {
    fn increment(&mut self) -> u8 {
        rand::thread_rng().gen_range(MIN_INCREMENT..=MAX_INCREMENT)
    }
}

/// Constant increment for deterministic runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub u8);

impl ProgressJitter for FixedJitter {
    fn increment(&mut self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub step: &'static str,
    pub step_index: usize,
    pub progress: u8,
}

#[derive(Debug, Clone)]
pub struct ProgressNarrator {
    steps: &'static [&'static str],
    step: usize,
    progress: u8,
}

impl ProgressNarrator {
    pub fn new(steps: &'static [&'static str]) -> Self {
        let steps = if steps.is_empty() { DEFAULT_STEPS } else { steps };
        Self {
            steps,
            step: 0,
            progress: 0,
        }
    }

    pub fn for_profile(profile_id: &str) -> Self {
        Self::new(steps_for(profile_id))
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn current(&self) -> ProgressUpdate {
        ProgressUpdate {
            step: self.steps[self.step],
            step_index: self.step,
            progress: self.progress,
        }
    }

    pub fn tick(&mut self, jitter: &mut impl ProgressJitter) -> ProgressUpdate {
        let increment = jitter.increment().clamp(MIN_INCREMENT, MAX_INCREMENT);
        self.progress = self.progress.saturating_add(increment).min(PROGRESS_CEILING);
        self.step = (self.step + 1).min(self.steps.len() - 1);
        self.current()
    }

    pub fn complete(&mut self) -> ProgressUpdate {
        self.progress = 100;
        self.step = self.steps.len() - 1;
        self.current()
    }

    /// Emits a tick every `cadence` until `work` resolves, then the completed state.
    pub async fn narrate<F, J, E>(
        mut self,
        cadence: Duration,
        jitter: &mut J,
        work: F,
        mut emit: E,
    ) -> F::Output
    where
        F: Future,
        J: ProgressJitter,
        E: FnMut(ProgressUpdate),
    {
        tokio::pin!(work);
        let mut ticker = tokio::time::interval(cadence);
        ticker.tick().await;
        emit(self.current());

        loop {
            tokio::select! {
                biased;
                output = &mut work => {
                    emit(self.complete());
                    return output;
                }
                _ = ticker.tick() => emit(self.tick(jitter)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profiles_fall_back_to_default_steps() {
        assert_eq!(steps_for("vertigo"), DEFAULT_STEPS);
        assert_ne!(steps_for("blind"), DEFAULT_STEPS);
    }

    #[test]
    fn progress_is_capped_until_complete() {
        let mut narrator = ProgressNarrator::for_profile("deaf");
        let mut jitter = FixedJitter(15);
        let mut last = narrator.current();
        for _ in 0..20 {
            let update = narrator.tick(&mut jitter);
            assert!(update.progress >= last.progress);
            assert!(update.progress <= PROGRESS_CEILING);
            assert!(update.step_index < steps_for("deaf").len());
            last = update;
        }
        assert_eq!(last.progress, PROGRESS_CEILING);
        assert_eq!(narrator.complete().progress, 100);
    }

    #[test]
    fn out_of_range_jitter_is_clamped() {
        let mut narrator = ProgressNarrator::for_profile("adhd");
        assert_eq!(narrator.tick(&mut FixedJitter(0)).progress, MIN_INCREMENT);
        assert_eq!(
            narrator.tick(&mut FixedJitter(200)).progress,
            MIN_INCREMENT + MAX_INCREMENT
        );
    }

    #[test]
    fn random_jitter_stays_in_bounds() {
        let mut jitter = RandomJitter;
        for _ in 0..200 {
            let increment = jitter.increment();
            assert!((MIN_INCREMENT..=MAX_INCREMENT).contains(&increment));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn narrate_ticks_until_work_finishes() {
        let narrator = ProgressNarrator::for_profile("motor");
        let mut updates = Vec::new();
        let output = narrator
            .narrate(
                Duration::from_millis(100),
                &mut FixedJitter(10),
                async {
                    tokio::time::sleep(Duration::from_millis(350)).await;
                    "done"
                },
                |update| updates.push(update),
            )
            .await;

        assert_eq!(output, "done");
        assert_eq!(updates.first().map(|u| u.progress), Some(0));
        assert_eq!(updates.last().map(|u| u.progress), Some(100));
        assert!(updates.len() >= 4, "expected ticks, got {updates:?}");
    }
}
