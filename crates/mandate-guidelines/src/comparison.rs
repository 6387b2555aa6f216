//! Guideline version comparison.
//!
//! Comparing two versions is simulated: after a fixed delay the same change
//! set is returned whichever versions were chosen. The state machine is
//! `Idle -> Comparing -> Result`, published over a watch channel so a front
//! end can show a spinner while [`VersionComparison::compare`] holds the
//! mutable borrow.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{GuidelineError, GuidelineResult, Side};

/// Guideline versions offered for comparison, oldest first.
pub const GUIDELINE_VERSIONS: [&str; 4] = [
    "Guideline v1.0 (Jan 2024)",
    "Guideline v1.1 (Mar 2024)",
    "Guideline v2.0 (Jun 2024)",
    "Guideline v2.1 (Sep 2024)",
];

/// Simulated comparison time.
pub const DEFAULT_COMPARISON_DELAY: Duration = Duration::from_millis(1500);

/// Rule changes between two guideline versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    /// Rules new in version B.
    pub added: Vec<String>,
    /// Rules dropped from version A.
    pub removed: Vec<String>,
    /// Rules whose terms changed.
    pub modified: Vec<String>,
}

impl VersionDiff {
    /// The fixed change set returned by the simulated comparison.
    #[must_use]
    pub fn simulated() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            added: owned(&[
                "ESG exclusion list updated with 5 new securities",
                "Maximum cash limit reduced from 15% to 10%",
            ]),
            removed: owned(&["Legacy benchmark reference removed"]),
            modified: owned(&[
                "Tracking error limit increased from 100bps to 150bps",
                "Performance measurement period clarified",
            ]),
        }
    }

    /// Non-empty sections with their titles, e.g. `Added Rules (2)`.
    #[must_use]
    pub fn sections(&self) -> Vec<(String, &[String])> {
        [
            ("Added Rules", &self.added),
            ("Removed Rules", &self.removed),
            ("Modified Rules", &self.modified),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| (format!("{title} ({})", items.len()), items.as_slice()))
        .collect()
    }
}

/// Comparison state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComparisonState {
    /// Nothing compared yet, or the last comparison was cancelled.
    Idle,
    /// Waiting for the comparison to finish.
    Comparing,
    /// Comparison finished.
    Result {
        /// Version A label.
        version_a: String,
        /// Version B label.
        version_b: String,
        /// Changes.
        diff: VersionDiff,
    },
}

/// Version comparison view state.
#[derive(Debug)]
pub struct VersionComparison {
    version_a: Option<String>,
    version_b: Option<String>,
    delay: Duration,
    state: watch::Sender<ComparisonState>,
}

impl Default for VersionComparison {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionComparison {
    /// New comparison with the default delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_COMPARISON_DELAY)
    }

    /// New comparison with a custom simulated delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        let (state, _) = watch::channel(ComparisonState::Idle);
        Self {
            version_a: None,
            version_b: None,
            delay,
            state,
        }
    }

    /// Selects version A; must be one of [`GUIDELINE_VERSIONS`].
    pub fn select_a(&mut self, version: &str) -> GuidelineResult<()> {
        self.version_a = Some(known_version(version)?);
        Ok(())
    }

    /// Selects version B; must be one of [`GUIDELINE_VERSIONS`].
    pub fn select_b(&mut self, version: &str) -> GuidelineResult<()> {
        self.version_b = Some(known_version(version)?);
        Ok(())
    }

    /// Current selections.
    #[must_use]
    pub fn selection(&self) -> (Option<&str>, Option<&str>) {
        (self.version_a.as_deref(), self.version_b.as_deref())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ComparisonState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ComparisonState> {
        self.state.subscribe()
    }

    /// True when both versions are selected and differ.
    #[must_use]
    pub fn can_compare(&self) -> bool {
        self.validated().is_ok()
    }

    fn validated(&self) -> GuidelineResult<(String, String)> {
        let a = self
            .version_a
            .clone()
            .ok_or(GuidelineError::missing_selection(Side::A))?;
        let b = self
            .version_b
            .clone()
            .ok_or(GuidelineError::missing_selection(Side::B))?;
        if a == b {
            return Err(GuidelineError::IdenticalVersions { version: a });
        }
        Ok((a, b))
    }

    /// Runs the simulated comparison.
    ///
    /// Invalid selections fail immediately without waiting. Cancelling the
    /// token during the delay returns [`GuidelineError::Cancelled`] and resets
    /// the state to `Idle`.
    pub async fn compare(&mut self, cancel: &CancellationToken) -> GuidelineResult<VersionDiff> {
        let (version_a, version_b) = self.validated()?;

        info!(%version_a, %version_b, "Comparing guideline versions");
        self.state.send_replace(ComparisonState::Comparing);

        tokio::select! {
            () = cancel.cancelled() => {
                debug!("Version comparison cancelled");
                self.state.send_replace(ComparisonState::Idle);
                return Err(GuidelineError::Cancelled);
            }
            () = tokio::time::sleep(self.delay) => {}
        }

        let diff = VersionDiff::simulated();
        self.state.send_replace(ComparisonState::Result {
            version_a,
            version_b,
            diff: diff.clone(),
        });
        Ok(diff)
    }
}

fn known_version(version: &str) -> GuidelineResult<String> {
    GUIDELINE_VERSIONS
        .iter()
        .find(|v| **v == version)
        .map(|v| (*v).to_string())
        .ok_or_else(|| GuidelineError::unknown_version(version))
}
