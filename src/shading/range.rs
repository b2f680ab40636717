use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::normalize::Normalized;
use crate::colour::Rgb;

/// Observed extremes of a data set, used when a range is auto-scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    /// Smallest observed value.
    pub min: f32,
    /// Largest observed value.
    pub max: f32,
}

impl DataRange {
    /// Extremes of the non-NaN values, or `None` if there are none.
    #[must_use]
    pub fn of(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }
}

/// Two-colour gradient over a numeric range.
///
/// Owned by one configuration (a feature type or an annotation scheme) and
/// edited in place by whichever control currently owns it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema,
)]
#[serde(default)]
pub struct ColourRange {
    /// Colour at the low end of the range.
    pub min_colour: Rgb,
    /// Colour at the high end of the range.
    pub max_colour: Rgb,
    /// Colour for missing values; `None` falls back to `min_colour`.
    pub no_value_colour: Option<Rgb>,
    /// Configured low bound.
    pub min_value: f32,
    /// Configured high bound.
    pub max_value: f32,
    /// Use the observed data range instead of the configured bounds.
    pub auto_scaled: bool,
}

impl Default for ColourRange {
    fn default() -> Self {
        Self {
            min_colour: Rgb::WHITE,
            max_colour: Rgb::BLACK,
            no_value_colour: None,
            min_value: 0.0,
            max_value: 1.0,
            auto_scaled: true,
        }
    }
}

impl ColourRange {
    /// Auto-scaled gradient between two colours.
    #[must_use]
    pub fn new(min_colour: Rgb, max_colour: Rgb) -> Self {
        Self {
            min_colour,
            max_colour,
            ..Self::default()
        }
    }

    /// Builder-style fixed bounds; turns auto-scaling off.
    #[must_use]
    pub fn with_bounds(mut self, min_value: f32, max_value: f32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self.auto_scaled = false;
        self
    }

    /// Builder-style no-value colour.
    #[must_use]
    pub fn with_no_value_colour(mut self, colour: Option<Rgb>) -> Self {
        self.no_value_colour = colour;
        self
    }

    /// Replace both endpoint colours.
    pub fn set_colours(&mut self, min_colour: Rgb, max_colour: Rgb) {
        self.min_colour = min_colour;
        self.max_colour = max_colour;
    }

    /// Replace the configured bounds without touching auto-scaling.
    pub fn set_bounds(&mut self, min_value: f32, max_value: f32) {
        self.min_value = min_value;
        self.max_value = max_value;
    }

    /// Colour used for missing values.
    #[must_use]
    pub fn no_value(&self) -> Rgb {
        self.no_value_colour.unwrap_or(self.min_colour)
    }

    /// Effective `(lo, hi)` span: the observed range when auto-scaled and
    /// one is known, the configured bounds otherwise.
    #[must_use]
    pub fn bounds(&self, observed: Option<DataRange>) -> (f32, f32) {
        match observed {
            Some(r) if self.auto_scaled => (r.min, r.max),
            _ => (self.min_value, self.max_value),
        }
    }

    /// Interpolate each channel at `fraction` of the way from `min_colour`
    /// to `max_colour`.
    #[must_use]
    pub fn colour_at(&self, fraction: f32) -> Rgb {
        if fraction == 0.0 {
            return self.min_colour;
        }
        if fraction == 1.0 {
            return self.max_colour;
        }
        let lo = self.min_colour.to_unit();
        let hi = self.max_colour.to_unit();
        Rgb::from_unit([
            lo[0] + fraction * (hi[0] - lo[0]),
            lo[1] + fraction * (hi[1] - lo[1]),
            lo[2] + fraction * (hi[2] - lo[2]),
        ])
    }

    /// Map a normalizer result to a colour.
    #[must_use]
    pub fn colour_for(&self, normalized: Normalized) -> Rgb {
        match normalized {
            Normalized::NoValue => self.no_value(),
            Normalized::Fraction(f) => self.colour_at(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgb = Rgb::new(50, 200, 150);
    const PURPLE: Rgb = Rgb::new(150, 100, 250);

    #[test]
    fn endpoints_are_exact() {
        let range = ColourRange::new(GRAY, PURPLE);
        assert_eq!(range.colour_at(0.0), GRAY);
        assert_eq!(range.colour_at(1.0), PURPLE);
    }

    #[test]
    fn interpolates_every_channel_linearly() {
        let range = ColourRange::new(GRAY, PURPLE);
        for step in 0..=10u8 {
            let f = f32::from(step) / 10.0;
            let s = 10 * step;
            assert_eq!(
                range.colour_at(f),
                Rgb::new(50 + s, 200 - s, 150 + s),
                "at fraction {f}"
            );
        }
    }

    #[test]
    fn no_value_falls_back_to_min() {
        let range = ColourRange::new(GRAY, PURPLE);
        assert_eq!(range.colour_for(Normalized::NoValue), GRAY);
        let range = range.with_no_value_colour(Some(Rgb::RED));
        assert_eq!(range.colour_for(Normalized::NoValue), Rgb::RED);
    }

    #[test]
    fn bounds_follow_auto_scaling() {
        let observed = Some(DataRange { min: 2.0, max: 8.0 });
        let auto = ColourRange::new(GRAY, PURPLE);
        assert_eq!(auto.bounds(observed), (2.0, 8.0));
        assert_eq!(auto.bounds(None), (0.0, 1.0));
        let fixed = auto.with_bounds(-1.0, 1.0);
        assert_eq!(fixed.bounds(observed), (-1.0, 1.0));
    }

    #[test]
    fn data_range_skips_nan() {
        let r = DataRange::of([3.0, f32::NAN, -2.0, 7.5]).unwrap();
        assert_eq!(r, DataRange { min: -2.0, max: 7.5 });
        assert_eq!(DataRange::of([f32::NAN]), None);
    }
}
