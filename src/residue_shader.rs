//! Per-view residue shading: a colour scheme plus the identity threshold
//! and conservation bleaching layered over it.

use crate::colour::Rgb;
use crate::consensus::{is_gap, ColumnProfile};
use crate::options::IdentityOptions;
use crate::schemes::{ColourScheme, ResidueContext};

/// Conservation increment a new shader starts with.
pub const DEFAULT_CONSERVATION_INCREMENT: u32 = 30;

/// Applies an optional [`ColourScheme`] to alignment cells, then fades
/// cells out by identity threshold and conservation.
///
/// The consensus and conservation inputs are computed elsewhere and handed
/// in once published; the shader only reads them.
#[derive(Debug)]
pub struct ResidueShader {
    scheme: Option<Box<dyn ColourScheme>>,
    consensus: Vec<ColumnProfile>,
    conservation: Option<Vec<char>>,
    conservation_applied: bool,
    pid_threshold: u32,
    ignore_gaps: bool,
    conservation_increment: u32,
}

impl Default for ResidueShader {
    fn default() -> Self {
        Self {
            scheme: None,
            consensus: Vec::new(),
            conservation: None,
            conservation_applied: false,
            pid_threshold: 0,
            ignore_gaps: false,
            conservation_increment: DEFAULT_CONSERVATION_INCREMENT,
        }
    }
}

impl ResidueShader {
    /// Shader over `scheme`.
    #[must_use]
    pub fn new(scheme: Box<dyn ColourScheme>) -> Self {
        Self {
            scheme: Some(scheme),
            ..Self::default()
        }
    }

    /// Apply the identity section of the options.
    pub fn apply_options(&mut self, options: &IdentityOptions) {
        self.set_threshold(options.threshold, options.ignore_gaps);
        self.conservation_increment = options.conservation_increment;
        self.conservation_applied = options.apply_conservation;
    }

    /// Scheme in use, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&dyn ColourScheme> {
        self.scheme.as_deref()
    }

    /// Swap the scheme, returning the old one.
    pub fn set_scheme(
        &mut self,
        scheme: Option<Box<dyn ColourScheme>>,
    ) -> Option<Box<dyn ColourScheme>> {
        std::mem::replace(&mut self.scheme, scheme)
    }

    /// Publish per-column consensus profiles.
    pub fn set_consensus(&mut self, consensus: Vec<ColumnProfile>) {
        self.consensus = consensus;
    }

    /// Publish the conservation string (one symbol per column). `None`
    /// clears it and turns conservation shading off; `Some` turns it on.
    pub fn set_conservation(&mut self, conservation: Option<&str>) {
        self.conservation_applied = conservation.is_some();
        self.conservation = conservation.map(|c| c.chars().collect());
    }

    /// Whether conservation bleaching is on.
    #[must_use]
    pub fn conservation_applied(&self) -> bool {
        self.conservation_applied
    }

    /// Turn conservation bleaching on or off without touching the data.
    pub fn set_conservation_applied(&mut self, applied: bool) {
        self.conservation_applied = applied;
    }

    /// Percent identity a residue's column must reach for the residue to
    /// keep its colour (0 disables), and whether gaps are ignored when
    /// computing identity.
    pub fn set_threshold(&mut self, pid_threshold: u32, ignore_gaps: bool) {
        self.pid_threshold = pid_threshold;
        self.ignore_gaps = ignore_gaps;
    }

    /// Identity threshold.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.pid_threshold
    }

    /// Whether gaps are ignored when computing identity.
    #[must_use]
    pub fn ignore_gaps(&self) -> bool {
        self.ignore_gaps
    }

    /// Conservation increment; higher values bleach more.
    #[must_use]
    pub fn conservation_increment(&self) -> u32 {
        self.conservation_increment
    }

    /// See [`Self::conservation_increment`].
    pub fn set_conservation_increment(&mut self, increment: u32) {
        self.conservation_increment = increment;
    }

    /// Forward an alignment edit to the scheme.
    pub fn alignment_changed(&mut self, sequences: &[&str]) {
        if let Some(scheme) = self.scheme.as_mut() {
            scheme.alignment_changed(sequences);
        }
    }

    /// Colour of `symbol` at `column`, optionally in a named sequence.
    #[must_use]
    pub fn find_colour(
        &self,
        symbol: char,
        column: usize,
        sequence: Option<&str>,
    ) -> Rgb {
        let Some(scheme) = self.scheme.as_deref() else {
            return Rgb::WHITE;
        };
        let profile = self.consensus.get(column);
        let mut cell = ResidueContext::new(symbol, column);
        cell.sequence = sequence;
        cell.consensus = profile.map(|p| p.consensus(self.ignore_gaps));

        let mut colour = scheme.find_colour(&cell);
        if !is_gap(symbol) {
            if !self.above_threshold(symbol, profile) {
                colour = Rgb::WHITE;
            }
            if self.conservation_applied {
                colour = self.apply_conservation(colour, column);
            }
        }
        colour
    }

    fn above_threshold(
        &self,
        symbol: char,
        profile: Option<&ColumnProfile>,
    ) -> bool {
        if self.pid_threshold == 0 {
            return true;
        }
        profile.is_some_and(|p| {
            let consensus = p.consensus(self.ignore_gaps);
            consensus.contains(symbol)
                && consensus.pid >= self.pid_threshold as f32
        })
    }

    /// Bleach by the conservation symbol in `column`: `*` and `+` (and the
    /// control characters 10 and 11) leave the colour alone, a gap gives
    /// white, a digit `d` fades by `(11 - d) / 10 * increment / 20`.
    fn apply_conservation(&self, colour: Rgb, column: usize) -> Rgb {
        let Some(symbol) = self
            .conservation
            .as_ref()
            .and_then(|c| c.get(column).copied())
        else {
            return colour;
        };
        if matches!(symbol, '*' | '+' | '\n' | '\u{b}') {
            return colour;
        }
        if is_gap(symbol) {
            return Rgb::WHITE;
        }
        let score = symbol as i32 - '0' as i32;
        let factor = (11 - score) as f32 / 10.0
            * (self.conservation_increment as f32 / 20.0);
        colour.bleach(factor)
    }
}
