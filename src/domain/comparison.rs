//! Peer-relative comparison of a single metric value.
//!
//! A field with a threshold rule is classified on its own value. Every other
//! field is compared against a ±15% band around the peer median, except when
//! the median is effectively zero, where the band collapses and a strict
//! comparison (optionally widened by `near_zero_margin`) is used instead.

use super::field::{FieldId, Polarity};
use super::record::MetricValue;

/// Half-width of the "equal" band around the peer median, as a fraction.
pub const MEDIAN_MARGIN_OF_SAFETY: f64 = 0.15;

/// Medians with an absolute value below this use the near-zero comparison.
pub const NEAR_ZERO_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Better,
    Worse,
    Equal,
}

impl Indicator {
    pub fn glyph(self) -> &'static str {
        match self {
            Indicator::Better => "▲",
            Indicator::Worse => "▼",
            Indicator::Equal => "▬",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Indicator::Better => "better",
            Indicator::Worse => "worse",
            Indicator::Equal => "equal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSettings {
    /// Absolute dead zone around a near-zero median. `0.0` keeps the
    /// comparison strict.
    pub near_zero_margin: f64,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            near_zero_margin: 0.0,
        }
    }
}

/// Classify `value` for `field`, or `None` when the comparison cannot be
/// resolved (value absent, or median absent for a band-based field).
pub fn classify(
    field: FieldId,
    value: MetricValue,
    median: MetricValue,
    settings: &ComparisonSettings,
) -> Option<Indicator> {
    let value = value.filter(|v| !v.is_nan())?;

    if let Some(rule) = field.threshold() {
        return Some(rule(value));
    }

    let median = median.filter(|m| !m.is_nan())?;

    let polarity = field.polarity();
    if polarity == Polarity::Neutral {
        return Some(Indicator::Equal);
    }

    let near_zero = median.abs() < NEAR_ZERO_EPSILON;
    let (above, below) = if near_zero {
        let margin = settings.near_zero_margin.max(0.0);
        (value > median + margin, value < median - margin)
    } else {
        // Band ends follow the median's sign; a negative median is not reordered.
        let upper = median * (1.0 + MEDIAN_MARGIN_OF_SAFETY);
        let lower = median * (1.0 - MEDIAN_MARGIN_OF_SAFETY);
        (value >= upper, value <= lower)
    };

    Some(match (polarity, above, below) {
        (Polarity::HigherIsBetter, true, _) => Indicator::Better,
        (Polarity::HigherIsBetter, _, true) => Indicator::Worse,
        (Polarity::LowerIsBetter, _, true) => Indicator::Better,
        (Polarity::LowerIsBetter, true, _) => Indicator::Worse,
        _ => Indicator::Equal,
    })
}

/// Indicator shown on the page; unresolvable comparisons render as equal.
pub fn indicator(
    field: FieldId,
    value: MetricValue,
    median: MetricValue,
    settings: &ComparisonSettings,
) -> Indicator {
    classify(field, value, median, settings).unwrap_or(Indicator::Equal)
}
