//! Circular compliance score gauge.

use std::f64::consts::PI;

use mandate_core::badge::Tone;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Radius of the gauge arc in px.
pub const GAUGE_RADIUS: f64 = 70.0;

/// Colour band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 90 and above.
    Green,
    /// 70 up to 90.
    Yellow,
    /// Below 70.
    Red,
}

impl ScoreBand {
    /// Band for a score on the 0-100 scale.
    #[must_use]
    pub fn for_score(score: Decimal) -> Self {
        if score >= Decimal::from(90) {
            ScoreBand::Green
        } else if score >= Decimal::from(70) {
            ScoreBand::Yellow
        } else {
            ScoreBand::Red
        }
    }

    /// Badge tone matching the band colour.
    #[must_use]
    pub fn tone(&self) -> Tone {
        match self {
            ScoreBand::Green => Tone::Positive,
            ScoreBand::Yellow => Tone::Caution,
            ScoreBand::Red => Tone::Critical,
        }
    }
}

/// Geometry and colour of the score gauge.
///
/// The arc is drawn as a dashed circle stroke: `dash_array` is the full
/// circumference and `dash_offset` hides the unscored part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGauge {
    /// Score as reported.
    pub score: Decimal,
    /// Colour band.
    pub band: ScoreBand,
    /// Stroke dash array (the circumference).
    pub dash_array: f64,
    /// Stroke dash offset.
    pub dash_offset: f64,
}

impl ScoreGauge {
    /// Builds the gauge for a score.
    ///
    /// Scores outside 0-100 keep their value and band but draw an empty or
    /// full arc.
    #[must_use]
    pub fn new(score: Decimal) -> Self {
        let circumference = 2.0 * PI * GAUGE_RADIUS;
        let clamped = score
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or_default();

        Self {
            score,
            band: ScoreBand::for_score(score),
            dash_array: circumference,
            dash_offset: circumference * (1.0 - clamped / 100.0),
        }
    }

    /// Fraction of the arc that is drawn, 0-1.
    #[must_use]
    pub fn filled_fraction(&self) -> f64 {
        1.0 - self.dash_offset / self.dash_array
    }

    /// Text in the middle of the gauge.
    #[must_use]
    pub fn label(&self) -> String {
        self.score.normalize().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bands() {
        assert_eq!(ScoreGauge::new(dec!(95)).band, ScoreBand::Green);
        assert_eq!(ScoreGauge::new(dec!(90)).band, ScoreBand::Green);
        assert_eq!(ScoreGauge::new(dec!(75)).band, ScoreBand::Yellow);
        assert_eq!(ScoreGauge::new(dec!(70)).band, ScoreBand::Yellow);
        assert_eq!(ScoreGauge::new(dec!(69.9)).band, ScoreBand::Red);
        assert_eq!(ScoreGauge::new(dec!(50)).band, ScoreBand::Red);
    }

    #[test]
    fn test_geometry() {
        let gauge = ScoreGauge::new(dec!(85));
        assert_relative_eq!(gauge.dash_array, 439.822_971_502_571, epsilon = 1e-9);
        assert_relative_eq!(gauge.dash_offset, 65.973_445_725_385_6, epsilon = 1e-9);
        assert_relative_eq!(gauge.filled_fraction(), 0.85, epsilon = 1e-12);
        assert_eq!(gauge.label(), "85");
    }

    #[test]
    fn test_out_of_range_scores_clamp_arc_only() {
        let over = ScoreGauge::new(dec!(120));
        assert_relative_eq!(over.dash_offset, 0.0);
        assert_eq!(over.score, dec!(120));

        let under = ScoreGauge::new(dec!(-5));
        assert_relative_eq!(under.dash_offset, under.dash_array);
        assert_eq!(under.band, ScoreBand::Red);
    }
}
