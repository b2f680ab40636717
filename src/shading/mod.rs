//! Score normalization, gradient mapping and threshold gating.
//!
//! These three pieces are shared by every graduated colouring in the crate
//! (annotation gradients and graduated feature colours): a raw score is
//! normalized over a [`ColourRange`], mapped to a colour, and hidden if the
//! [`ThresholdPolicy`] rejects it.

mod normalize;
mod range;
mod threshold;

pub use normalize::{normalize, Normalized};
pub use range::{ColourRange, DataRange};
pub use threshold::{ThresholdMode, ThresholdPolicy};

use crate::colour::Rgb;

/// Full score → colour pipeline.
///
/// NaN yields the range's no-value colour before any gating, a suppressed
/// score yields white, anything else is normalized and mapped.
#[must_use]
pub fn shade_score(
    raw: f32,
    range: &ColourRange,
    policy: &ThresholdPolicy,
    observed: Option<DataRange>,
) -> Rgb {
    if raw.is_nan() {
        return range.no_value();
    }
    if policy.is_suppressed(raw) {
        return Rgb::WHITE;
    }
    range.colour_for(normalize(raw, range, policy, observed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_gates_before_mapping() {
        let range =
            ColourRange::new(Rgb::new(50, 200, 150), Rgb::new(150, 100, 250));
        let observed = Some(DataRange {
            min: 0.0,
            max: 10.0,
        });
        let policy = ThresholdPolicy::above(5.0);
        assert_eq!(shade_score(5.0, &range, &policy, observed), Rgb::WHITE);
        assert_eq!(
            shade_score(6.0, &range, &policy, observed),
            Rgb::new(110, 140, 210)
        );
        assert_eq!(
            shade_score(f32::NAN, &range, &policy, observed),
            Rgb::new(50, 200, 150)
        );
    }
}
