use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::residue_shader::DEFAULT_CONSERVATION_INCREMENT;

/// Identity threshold and conservation shading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Identity", inline)]
#[serde(default)]
pub struct IdentityOptions {
    /// Percent identity below which residues are shown white (0 = off).
    #[schemars(title = "Identity Threshold", range(min = 0, max = 100), extend("step" = 1))]
    pub threshold: u32,
    /// Compute identity over non-gapped sequences only.
    #[schemars(title = "Ignore Gaps")]
    pub ignore_gaps: bool,
    /// Fade residues in poorly conserved columns.
    #[schemars(title = "Conservation Shading")]
    pub apply_conservation: bool,
    /// How strongly conservation shading fades colours.
    #[schemars(title = "Conservation Increment", range(min = 0, max = 50), extend("step" = 1))]
    pub conservation_increment: u32,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            threshold: 0,
            ignore_gaps: false,
            apply_conservation: false,
            conservation_increment: DEFAULT_CONSERVATION_INCREMENT,
        }
    }
}
