//! Colouring of sequence features.
//!
//! A [`FeatureColour`] is configured per feature type: a fixed colour, a
//! colour derived from the feature's label, or a gradient over its score
//! (or a numeric attribute) with optional threshold. Configurations are
//! stored in feature files as `|`-separated descriptors; see
//! [`FeatureColour::parse`] and [`FeatureColour::to_descriptor`].

mod attributes;
mod descriptor;

pub use attributes::{AttributeName, AttributeValue, SequenceFeature};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::colour::Rgb;
use crate::shading::{
    normalize, ColourRange, ThresholdMode, ThresholdPolicy,
};

/// What a graduated colour shows for features with no score.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NoValueColour {
    /// The gradient's minimum colour.
    #[default]
    Min,
    /// The gradient's maximum colour.
    Max,
    /// Nothing; the feature is not drawn.
    None,
}

impl NoValueColour {
    /// Descriptor tag (`noValueMin`, `noValueMax`, `noValueNone`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Min => "noValueMin",
            Self::Max => "noValueMax",
            Self::None => "noValueNone",
        }
    }
}

/// How a feature colour is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourBy {
    /// One fixed colour.
    Simple(Rgb),
    /// Hash of the description (or attribute) text.
    Label,
    /// Gradient over the score (or a numeric attribute).
    Graduated,
}

/// Colour configuration for one feature type.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColour {
    by: ColourBy,
    attribute: Option<AttributeName>,
    range: ColourRange,
    no_value: NoValueColour,
    threshold: ThresholdPolicy,
}

impl FeatureColour {
    /// Fixed colour. The gradient ends are a pale tint of `colour` and
    /// `colour` itself, used if the configuration is later made graduated.
    #[must_use]
    pub fn simple(colour: Rgb) -> Self {
        Self {
            by: ColourBy::Simple(colour),
            attribute: None,
            range: ColourRange::new(colour.bleach(0.9), colour)
                .with_bounds(0.0, 0.0),
            no_value: NoValueColour::None,
            threshold: ThresholdPolicy::NONE,
        }
    }

    /// Colour by description text.
    #[must_use]
    pub fn by_label() -> Self {
        Self {
            by: ColourBy::Label,
            attribute: None,
            range: ColourRange::new(Rgb::WHITE, Rgb::BLACK)
                .with_bounds(0.0, 0.0),
            no_value: NoValueColour::None,
            threshold: ThresholdPolicy::NONE,
        }
    }

    /// Gradient from `min_colour` at `min` to `max_colour` at `max`,
    /// with fixed bounds and the minimum colour for missing scores.
    #[must_use]
    pub fn graduated(
        min_colour: Rgb,
        max_colour: Rgb,
        min: f32,
        max: f32,
    ) -> Self {
        let mut colour = Self {
            by: ColourBy::Graduated,
            attribute: None,
            range: ColourRange::new(min_colour, max_colour),
            no_value: NoValueColour::Min,
            threshold: ThresholdPolicy::NONE,
        };
        colour.update_bounds(min, max);
        colour.range.auto_scaled = false;
        colour
    }

    /// Builder-style attribute to colour by instead of score/description.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeName) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// Builder-style threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder-style no-value colour.
    #[must_use]
    pub fn with_no_value(mut self, no_value: NoValueColour) -> Self {
        self.no_value = no_value;
        self
    }

    /// Colouring mode.
    #[must_use]
    pub fn colour_by(&self) -> ColourBy {
        self.by
    }

    /// Fixed colour, or the gradient's maximum colour.
    #[must_use]
    pub fn colour(&self) -> Rgb {
        match self.by {
            ColourBy::Simple(colour) => colour,
            ColourBy::Label | ColourBy::Graduated => self.range.max_colour,
        }
    }

    /// Whether this is a fixed colour.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self.by, ColourBy::Simple(_))
    }

    /// Whether colours come from label text.
    #[must_use]
    pub fn is_colour_by_label(&self) -> bool {
        self.by == ColourBy::Label
    }

    /// Whether colours come from a gradient.
    #[must_use]
    pub fn is_graduated(&self) -> bool {
        self.by == ColourBy::Graduated
    }

    /// Attribute coloured by, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&AttributeName> {
        self.attribute.as_ref()
    }

    /// Gradient configuration.
    #[must_use]
    pub fn range(&self) -> &ColourRange {
        &self.range
    }

    /// Low end of the gradient span.
    #[must_use]
    pub fn min_value(&self) -> f32 {
        self.range.min_value
    }

    /// High end of the gradient span.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.range.max_value
    }

    /// Whether the span follows the data rather than fixed bounds.
    #[must_use]
    pub fn is_auto_scaled(&self) -> bool {
        self.range.auto_scaled
    }

    /// See [`Self::is_auto_scaled`].
    pub fn set_auto_scaled(&mut self, auto_scaled: bool) {
        self.range.auto_scaled = auto_scaled;
    }

    /// No-value setting.
    #[must_use]
    pub fn no_value(&self) -> NoValueColour {
        self.no_value
    }

    /// Colour drawn for features with no value, if any.
    #[must_use]
    pub fn no_value_colour(&self) -> Option<Rgb> {
        match self.no_value {
            NoValueColour::Min => Some(self.range.min_colour),
            NoValueColour::Max => Some(self.range.max_colour),
            NoValueColour::None => None,
        }
    }

    /// Threshold configuration.
    #[must_use]
    pub fn threshold(&self) -> &ThresholdPolicy {
        &self.threshold
    }

    /// Replace the threshold configuration.
    pub fn set_threshold(&mut self, threshold: ThresholdPolicy) {
        self.threshold = threshold;
    }

    /// Whether a threshold is in force.
    #[must_use]
    pub fn has_threshold(&self) -> bool {
        self.threshold.is_active()
    }

    /// Reset the gradient span, e.g. after the observed score range
    /// changed. Bounds are kept in the order given: with `min > max` the
    /// scale runs high-to-low, so `min_colour` is drawn at the larger score.
    pub fn update_bounds(&mut self, min: f32, max: f32) {
        self.range.set_bounds(min, max);
    }

    /// Whether the minimum colour sits at the larger score.
    #[must_use]
    pub fn is_high_to_low(&self) -> bool {
        self.range.min_value > self.range.max_value
    }

    /// The value a graduated colour is computed from: the named attribute
    /// parsed as a number, or the feature score. NaN when missing.
    fn score_of(&self, feature: &SequenceFeature) -> f32 {
        self.attribute
            .as_ref()
            .map_or(feature.score, |name| feature.value_as_score(name))
    }

    /// Colour for `feature`, or `None` when it should not be drawn
    /// (hidden by the threshold, or no value and no no-value colour).
    #[must_use]
    pub fn colour_for(&self, feature: &SequenceFeature) -> Option<Rgb> {
        match self.by {
            ColourBy::Simple(colour) => Some(colour),
            ColourBy::Label => {
                let label = match &self.attribute {
                    Some(name) => feature.value_as_string(name),
                    None => feature.description.as_deref(),
                };
                label.map_or_else(|| self.no_value_colour(), |l| {
                    Some(Rgb::from_label(l))
                })
            }
            ColourBy::Graduated => {
                let score = self.score_of(feature);
                if score.is_nan() {
                    return self.no_value_colour();
                }
                if self.threshold.is_suppressed(score) {
                    return None;
                }
                if self.range.min_value == self.range.max_value {
                    return Some(self.range.max_colour);
                }
                let policy = self.threshold.with_min_max(false);
                Some(
                    self.range
                        .colour_for(normalize(score, &self.range, &policy, None)),
                )
            }
        }
    }

    /// Whether the threshold hides `feature`. Only graduated colours
    /// filter, and features with no value are never hidden.
    #[must_use]
    pub fn is_outwith_threshold(&self, feature: &SequenceFeature) -> bool {
        if !self.is_graduated() {
            return false;
        }
        self.threshold.is_suppressed(self.score_of(feature))
    }

    /// Short human-readable summary, e.g. `By Score (> 12.5)`.
    #[must_use]
    pub fn description(&self) -> String {
        if let ColourBy::Simple(c) = self.by {
            return format!("r={},g={},b={}", c.r(), c.g(), c.b());
        }
        let by = match (&self.attribute, self.by) {
            (Some(name), _) => name.to_string(),
            (None, ColourBy::Label) => "Label".to_owned(),
            (None, _) => "Score".to_owned(),
        };
        let mut text = format!("By {by}");
        let sign = match self.threshold.mode {
            ThresholdMode::Above => ">",
            ThresholdMode::Below => "<",
            ThresholdMode::None => return text,
        };
        let subject = if self.is_colour_by_label() { "Score " } else { "" };
        text.push_str(&format!(
            " ({subject}{sign} {})",
            descriptor::format_float(self.threshold.value)
        ));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: f32) -> SequenceFeature {
        SequenceFeature::new("domain").with_score(score)
    }

    #[test]
    fn simple_colour_ignores_score() {
        let colour = FeatureColour::simple(Rgb::RED);
        assert_eq!(colour.colour_for(&scored(f32::NAN)), Some(Rgb::RED));
        assert_eq!(colour.colour_for(&scored(3.0)), Some(Rgb::RED));
        assert!(colour.is_simple());
        assert_eq!(colour.description(), "r=255,g=0,b=0");
    }

    #[test]
    fn graduated_colour_interpolates_and_clamps() {
        let colour = FeatureColour::graduated(
            Rgb::new(0, 0, 0),
            Rgb::new(200, 100, 50),
            10.0,
            20.0,
        );
        assert_eq!(colour.colour_for(&scored(10.0)), Some(Rgb::BLACK));
        assert_eq!(
            colour.colour_for(&scored(15.0)),
            Some(Rgb::new(100, 50, 25))
        );
        assert_eq!(
            colour.colour_for(&scored(20.0)),
            Some(Rgb::new(200, 100, 50))
        );
        assert_eq!(colour.colour_for(&scored(-5.0)), Some(Rgb::BLACK));
        assert_eq!(
            colour.colour_for(&scored(99.0)),
            Some(Rgb::new(200, 100, 50))
        );
    }

    #[test]
    fn degenerate_range_gives_max_colour() {
        let colour = FeatureColour::graduated(Rgb::WHITE, Rgb::BLUE, 4.0, 4.0);
        assert_eq!(colour.colour_for(&scored(1.0)), Some(Rgb::BLUE));
    }

    #[test]
    fn no_value_colour_choices() {
        let colour =
            FeatureColour::graduated(Rgb::WHITE, Rgb::BLUE, 0.0, 1.0);
        let unscored = scored(f32::NAN);
        assert_eq!(colour.colour_for(&unscored), Some(Rgb::WHITE));
        let max = colour.clone().with_no_value(NoValueColour::Max);
        assert_eq!(max.colour_for(&unscored), Some(Rgb::BLUE));
        let none = colour.with_no_value(NoValueColour::None);
        assert_eq!(none.colour_for(&unscored), None);
    }

    #[test]
    fn threshold_hides_features() {
        let colour = FeatureColour::graduated(Rgb::WHITE, Rgb::BLUE, 0.0, 10.0)
            .with_threshold(ThresholdPolicy::above(5.0));
        assert_eq!(colour.colour_for(&scored(5.0)), None);
        assert!(colour.is_outwith_threshold(&scored(5.0)));
        assert_eq!(colour.colour_for(&scored(10.0)), Some(Rgb::BLUE));
        assert!(!colour.is_outwith_threshold(&scored(10.0)));
        assert!(!colour.is_outwith_threshold(&scored(f32::NAN)));
        assert_eq!(colour.description(), "By Score (> 5.0)");

        let below = colour.with_threshold(ThresholdPolicy::below(5.0));
        assert_eq!(below.colour_for(&scored(5.0)), None);
        assert!(below.colour_for(&scored(4.0)).is_some());
    }

    #[test]
    fn colour_by_attribute_value() {
        let af = AttributeName::from_display("AF");
        let colour = FeatureColour::graduated(Rgb::BLACK, Rgb::WHITE, 0.0, 1.0)
            .with_attribute(af)
            .with_threshold(ThresholdPolicy::below(0.5));
        let common = SequenceFeature::new("variant").with_attribute("AF", "0.7");
        let rare = SequenceFeature::new("variant")
            .with_score(0.9)
            .with_attribute("AF", "0.0");
        let odd = SequenceFeature::new("variant").with_attribute("AF", "n/a");

        assert_eq!(colour.colour_for(&common), None);
        assert_eq!(colour.colour_for(&rare), Some(Rgb::BLACK));
        // non-numeric values count as missing and fail open
        assert_eq!(colour.colour_for(&odd), Some(Rgb::BLACK));
        assert!(!colour.is_outwith_threshold(&odd));
        assert_eq!(colour.description(), "By AF (< 0.5)");
    }

    #[test]
    fn colour_by_label() {
        let colour = FeatureColour::by_label();
        let feature = SequenceFeature::new("domain").with_description("kinase");
        assert_eq!(
            colour.colour_for(&feature),
            Some(Rgb::from_label("kinase"))
        );
        assert_eq!(colour.colour_for(&SequenceFeature::new("domain")), None);
        // labels ignore thresholds
        let gated = colour.with_threshold(ThresholdPolicy::above(100.0));
        assert!(gated.colour_for(&feature).is_some());
        assert!(!gated.is_outwith_threshold(&feature));
        assert_eq!(gated.description(), "By Label (Score > 100.0)");
    }

    #[test]
    fn label_from_attribute() {
        let colour = FeatureColour::by_label()
            .with_attribute(AttributeName::from_display("clinical"));
        let feature = SequenceFeature::new("variant")
            .with_description("ignored")
            .with_attribute("clinical", "benign");
        assert_eq!(
            colour.colour_for(&feature),
            Some(Rgb::from_label("benign"))
        );
    }

    #[test]
    fn high_to_low_bounds_keep_their_order() {
        let mut colour =
            FeatureColour::graduated(Rgb::WHITE, Rgb::BLACK, 0.0, 1.0);
        assert!(!colour.is_high_to_low());
        colour.update_bounds(30.0, 10.0);
        assert_eq!((colour.min_value(), colour.max_value()), (30.0, 10.0));
        assert!(colour.is_high_to_low());
        assert!(!colour.is_auto_scaled());

        assert_eq!(colour.colour_for(&scored(30.0)), Some(Rgb::WHITE));
        assert_eq!(colour.colour_for(&scored(10.0)), Some(Rgb::BLACK));
        assert_eq!(colour.colour_for(&scored(40.0)), Some(Rgb::WHITE));
        assert_eq!(colour.colour_for(&scored(0.0)), Some(Rgb::BLACK));
        let mid = colour.colour_for(&scored(20.0)).unwrap();
        assert!((127..=128).contains(&mid.r()));

        let reread = FeatureColour::parse(&colour.to_descriptor()).unwrap();
        assert_eq!((reread.min_value(), reread.max_value()), (30.0, 10.0));
        assert_eq!(reread, colour);
    }
}
