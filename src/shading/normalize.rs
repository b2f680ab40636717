use super::range::{ColourRange, DataRange};
use super::threshold::{ThresholdMode, ThresholdPolicy};

/// Result of normalizing a raw score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    /// The score was missing (NaN); use the no-value colour.
    NoValue,
    /// Position within the effective span, in [0, 1].
    Fraction(f32),
}

/// Map `raw` onto [0, 1] over the effective span of `range`.
///
/// With `policy.is_min_max`, values on the visible side of the threshold are
/// normalized over the sub-span bounded by the threshold; values on the
/// hidden side keep the full span. Exact span ends map to exactly 0 or 1,
/// and anything outside the span is clamped.
#[must_use]
pub fn normalize(
    raw: f32,
    range: &ColourRange,
    policy: &ThresholdPolicy,
    observed: Option<DataRange>,
) -> Normalized {
    if raw.is_nan() {
        return Normalized::NoValue;
    }
    let (lo, hi) = range.bounds(observed);
    let t = policy.value;

    let fraction = match policy.mode {
        ThresholdMode::Above if policy.is_min_max && raw >= t => {
            span_fraction(raw, t, hi, 1.0)
        }
        ThresholdMode::Below if policy.is_min_max && raw <= t => {
            span_fraction(raw, lo, t, 0.0)
        }
        _ => span_fraction(raw, lo, hi, 0.0),
    };
    Normalized::Fraction(fraction)
}

/// `(raw - lo) / (hi - lo)` with exact ends and `degenerate` for `lo == hi`.
fn span_fraction(raw: f32, lo: f32, hi: f32, degenerate: f32) -> f32 {
    if hi == lo {
        degenerate
    } else if raw == hi {
        1.0
    } else if raw == lo {
        0.0
    } else {
        ((raw - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}
