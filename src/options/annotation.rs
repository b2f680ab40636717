use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationRow;
use crate::colour::Rgb;
use crate::schemes::AnnotationColourGradient;
use crate::shading::ThresholdMode;

/// Settings for colouring residues by an annotation row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Annotation Colouring", inline)]
#[serde(default)]
pub struct AnnotationOptions {
    /// Colour at the row's minimum value.
    #[schemars(title = "Minimum Colour")]
    pub min_colour: Rgb,
    /// Colour at the row's maximum value.
    #[schemars(title = "Maximum Colour")]
    pub max_colour: Rgb,
    /// Which side of the row's threshold line is shown.
    #[schemars(title = "Threshold")]
    pub threshold_mode: ThresholdMode,
    /// Whether the threshold replaces one end of the colour span.
    #[schemars(title = "Threshold Is Min/Max")]
    pub threshold_is_min_max: bool,
    /// Show colours attached to annotation elements where present.
    #[schemars(title = "Use Original Colours")]
    pub use_original_colours: bool,
    /// Colour each sequence by its own copy of the row.
    #[schemars(skip)]
    pub seq_associated: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            min_colour: Rgb::ORANGE,
            max_colour: Rgb::RED,
            threshold_mode: ThresholdMode::None,
            threshold_is_min_max: false,
            use_original_colours: false,
            seq_associated: false,
        }
    }
}

impl AnnotationOptions {
    /// Gradient scheme over `row` configured from these settings.
    #[must_use]
    pub fn build(&self, row: AnnotationRow) -> AnnotationColourGradient {
        let mut scheme = AnnotationColourGradient::new(
            row,
            self.min_colour,
            self.max_colour,
            self.threshold_mode,
        );
        scheme.set_threshold_is_min_max(self.threshold_is_min_max);
        scheme.set_use_original_colours(self.use_original_colours);
        scheme.set_seq_associated(self.seq_associated);
        scheme
    }
}
