use rustc_hash::FxHashMap;

use super::{ColourScheme, ResidueContext};
use crate::colour::Rgb;
use crate::consensus::{is_gap, residue_index, GAP_SLOT};
use crate::error::ShadeError;

/// Colour slots: the protein alphabet plus the gap slot.
const SLOTS: usize = GAP_SLOT + 1;

const DEFAULT_NAME: &str = "User Defined";

/// A fixed per-residue colour table, optionally with separate colours for
/// lowercase residues.
///
/// Parses and emits the compact parameter form
/// `"D,E=red;K,R=0000ff;lowerCase=yellow"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColourScheme {
    name: String,
    colours: [Rgb; SLOTS],
    lower_case: Option<[Option<Rgb>; SLOTS]>,
}

impl Default for UserColourScheme {
    fn default() -> Self {
        Self::uniform(DEFAULT_NAME, Rgb::WHITE)
    }
}

impl UserColourScheme {
    /// Every residue (and gap) the same colour.
    #[must_use]
    pub fn uniform(name: impl Into<String>, colour: Rgb) -> Self {
        Self {
            name: name.into(),
            colours: [colour; SLOTS],
            lower_case: None,
        }
    }

    /// Scheme from a full colour table indexed by residue slot.
    #[must_use]
    pub fn from_colours(name: impl Into<String>, colours: [Rgb; SLOTS]) -> Self {
        Self {
            name: name.into(),
            colours,
            lower_case: None,
        }
    }

    /// Parse `residues=colour` assignments separated by `;`.
    ///
    /// Residues within an assignment are separated by commas or spaces.
    /// Lowercase residues set the lowercase table; the pseudo-residue
    /// `lowerCase` fills every lowercase slot not set explicitly.
    /// Unassigned residues are white.
    ///
    /// # Errors
    ///
    /// [`ShadeError::MissingToken`] if an assignment has no `=`, and
    /// [`ShadeError::InvalidColour`] if a colour does not parse.
    pub fn parse_parameter(parameter: &str) -> Result<Self, ShadeError> {
        let mut scheme = Self::default();
        for assignment in parameter.split(';').map(str::trim) {
            if assignment.is_empty() {
                continue;
            }
            let (residues, colour) = assignment
                .split_once('=')
                .ok_or(ShadeError::MissingToken("'=' in residue assignment"))?;
            let colour = Rgb::parse(colour)
                .ok_or_else(|| ShadeError::InvalidColour(colour.to_owned()))?;
            for residue in residues
                .split([',', ' '])
                .filter(|r| !r.is_empty())
            {
                scheme.assign(residue, colour);
            }
        }
        Ok(scheme)
    }

    fn assign(&mut self, residue: &str, colour: Rgb) {
        if residue.eq_ignore_ascii_case("lowercase") {
            let table = self.lower_case.get_or_insert([None; SLOTS]);
            for slot in table.iter_mut().filter(|s| s.is_none()) {
                *slot = Some(colour);
            }
            return;
        }
        let Some(symbol) = residue.chars().next() else {
            return;
        };
        let index = residue_index(symbol);
        if index == GAP_SLOT && !is_gap(symbol) {
            log::warn!("ignoring colour for unknown residue '{residue}'");
            return;
        }
        if symbol.is_ascii_lowercase() {
            self.lower_case.get_or_insert([None; SLOTS])[index] = Some(colour);
        } else {
            self.colours[index] = colour;
        }
    }

    /// Emit the parameter form: one `residues=hex` entry per colour,
    /// entries sorted and joined with `;`. Uppercase white is omitted; a
    /// gap colour is written for `-`, and a lowercase fill is written as
    /// `lowerCase` with only the lowercase residues that differ from it.
    #[must_use]
    pub fn to_parameter(&self) -> String {
        // only the lowerCase pseudo-residue sets the gap slot of the table
        let fill = self.lower_case.and_then(|t| t[GAP_SLOT]);
        let mut groups: FxHashMap<Rgb, Vec<String>> = FxHashMap::default();
        for symbol in 'A'..='Z' {
            let index = residue_index(symbol);
            if index == GAP_SLOT {
                continue;
            }
            let upper = self.colours[index];
            if upper != Rgb::WHITE {
                groups.entry(upper).or_default().push(symbol.to_string());
            }
            if let Some(lower) = self.lower_case.and_then(|t| t[index]) {
                if Some(lower) != fill {
                    groups
                        .entry(lower)
                        .or_default()
                        .push(symbol.to_ascii_lowercase().to_string());
                }
            }
        }
        let gap = self.colours[GAP_SLOT];
        if gap != Rgb::WHITE {
            groups.entry(gap).or_default().push("-".to_owned());
        }
        if let Some(fill) = fill {
            groups.entry(fill).or_default().push("lowerCase".to_owned());
        }
        let mut entries: Vec<String> = groups
            .into_iter()
            .map(|(colour, residues)| {
                format!("{}={}", residues.join(","), colour.to_hex())
            })
            .collect();
        entries.sort();
        entries.join(";")
    }

    /// Rename the scheme.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The uppercase colour table.
    #[must_use]
    pub fn colours(&self) -> &[Rgb; SLOTS] {
        &self.colours
    }

    /// Colour for a residue symbol, ignoring column context.
    #[must_use]
    pub fn colour_of(&self, symbol: char) -> Rgb {
        let index = residue_index(symbol);
        if symbol.is_ascii_lowercase() {
            if let Some(colour) = self.lower_case.and_then(|t| t[index]) {
                return colour;
            }
        }
        self.colours[index]
    }
}

impl ColourScheme for UserColourScheme {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_NAME
        } else {
            &self.name
        }
    }

    fn find_colour(&self, cell: &ResidueContext<'_>) -> Rgb {
        self.colour_of(cell.residue)
    }

    fn is_simple(&self) -> bool {
        true
    }
}
