use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which side of the threshold is shown.
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
pub enum ThresholdMode {
    /// No gating; every value is shown.
    #[default]
    None,
    /// Only values strictly greater than the threshold are shown.
    Above,
    /// Only values strictly less than the threshold are shown.
    Below,
}

impl ThresholdMode {
    /// Descriptor tag (`above`, `below`, `none`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

/// Threshold gate configuration.
///
/// When `is_min_max` is set, the threshold also replaces one end of the
/// normalization span for values on the visible side: `[threshold, max]`
/// for [`ThresholdMode::Above`], `[min, threshold]` for
/// [`ThresholdMode::Below`].
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ThresholdPolicy {
    /// Gating direction.
    pub mode: ThresholdMode,
    /// Threshold value compared against raw scores.
    pub value: f32,
    /// Whether the threshold redefines the colour span.
    pub is_min_max: bool,
}

impl ThresholdPolicy {
    /// No gating.
    pub const NONE: Self = Self {
        mode: ThresholdMode::None,
        value: 0.0,
        is_min_max: false,
    };

    /// Show only values strictly above `value`.
    #[must_use]
    pub const fn above(value: f32) -> Self {
        Self {
            mode: ThresholdMode::Above,
            value,
            is_min_max: false,
        }
    }

    /// Show only values strictly below `value`.
    #[must_use]
    pub const fn below(value: f32) -> Self {
        Self {
            mode: ThresholdMode::Below,
            value,
            is_min_max: false,
        }
    }

    /// Builder-style toggle of threshold-is-min-max.
    #[must_use]
    pub const fn with_min_max(mut self, is_min_max: bool) -> Self {
        self.is_min_max = is_min_max;
        self
    }

    /// Whether any gating is in force.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode != ThresholdMode::None
    }

    /// Whether `raw` fails the gate and must be drawn as "not shown".
    ///
    /// NaN is never suppressed: both comparisons are false for NaN, and the
    /// no-value path handles it upstream.
    #[must_use]
    pub fn is_suppressed(&self, raw: f32) -> bool {
        match self.mode {
            ThresholdMode::None => false,
            ThresholdMode::Above => raw <= self.value,
            ThresholdMode::Below => raw >= self.value,
        }
    }
}
