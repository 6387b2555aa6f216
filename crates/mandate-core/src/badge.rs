//! Badge rendering for categorical values.
//!
//! A badge is a short label plus a [`Tone`]. Front ends decide how a tone
//! looks (terminal colour, CSS class); the mapping from domain value to tone
//! lives here so every view agrees.

use serde::Serialize;
use std::fmt;

/// Visual emphasis of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Red: hard breaches, immediate action, destructive status.
    Critical,
    /// Orange: high priority.
    Warning,
    /// Yellow: soft breaches, medium priority.
    Caution,
    /// Green.
    Positive,
    /// Blue.
    Info,
    /// Purple.
    Accent,
    /// Outline only.
    Neutral,
}

/// A display label with its tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Text shown inside the badge.
    pub label: &'static str,
    /// Emphasis.
    pub tone: Tone,
}

impl Badge {
    /// Creates a badge.
    #[must_use]
    pub const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Types with a canonical badge.
pub trait ToBadge {
    /// Returns the badge for this value.
    fn badge(&self) -> Badge;
}
