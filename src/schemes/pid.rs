use super::{ColourScheme, ResidueContext};
use crate::colour::Rgb;

/// One tier of percent-identity shading: residues whose consensus identity
/// is strictly above `above` get `colour`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusBand {
    /// Exclusive lower breakpoint, in percent.
    pub above: f32,
    /// Colour for this tier.
    pub colour: Rgb,
}

/// Default blue bands, darkest first.
const BLUE_BANDS: [ConsensusBand; 3] = [
    ConsensusBand {
        above: 80.0,
        colour: Rgb::new(100, 100, 255),
    },
    ConsensusBand {
        above: 60.0,
        colour: Rgb::new(153, 153, 255),
    },
    ConsensusBand {
        above: 40.0,
        colour: Rgb::new(204, 204, 255),
    },
];

/// Colour `candidate` by the percent identity of its column's consensus.
///
/// Residues outside the consensus set (gaps included) are white. Matching
/// is case-insensitive and per character, so tied consensus strings such as
/// `"AS"` match either residue. Breakpoints are strict: a pid exactly on a
/// breakpoint falls into the lower tier.
#[must_use]
pub fn shade_by_identity(
    candidate: char,
    consensus_residues: &str,
    pid: f32,
) -> Rgb {
    band_colour(&BLUE_BANDS, candidate, consensus_residues, pid)
}

fn band_colour(
    bands: &[ConsensusBand],
    candidate: char,
    consensus_residues: &str,
    pid: f32,
) -> Rgb {
    let candidate = candidate.to_ascii_uppercase();
    if !consensus_residues.chars().any(|c| c == candidate) {
        return Rgb::WHITE;
    }
    bands
        .iter()
        .find(|band| pid > band.above)
        .map_or(Rgb::WHITE, |band| band.colour)
}

/// "% Identity" scheme: banded shading of consensus residues.
#[derive(Debug, Clone, PartialEq)]
pub struct PidColourScheme {
    bands: Vec<ConsensusBand>,
}

impl Default for PidColourScheme {
    fn default() -> Self {
        Self {
            bands: BLUE_BANDS.to_vec(),
        }
    }
}

impl PidColourScheme {
    /// Scheme with a custom colour family. Bands are sorted darkest
    /// (highest breakpoint) first.
    #[must_use]
    pub fn with_bands(mut bands: Vec<ConsensusBand>) -> Self {
        bands.sort_by(|a, b| b.above.total_cmp(&a.above));
        Self { bands }
    }

    /// The bands in evaluation order.
    #[must_use]
    pub fn bands(&self) -> &[ConsensusBand] {
        &self.bands
    }
}

impl ColourScheme for PidColourScheme {
    fn name(&self) -> &str {
        "% Identity"
    }

    fn find_colour(&self, cell: &ResidueContext<'_>) -> Rgb {
        cell.consensus.map_or(Rgb::WHITE, |cons| {
            band_colour(&self.bands, cell.residue, cons.residues, cons.pid)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::ColumnProfile;

    const OVER_80: Rgb = Rgb::new(100, 100, 255);
    const OVER_60: Rgb = Rgb::new(153, 153, 255);
    const OVER_40: Rgb = Rgb::new(204, 204, 255);

    #[test]
    fn breakpoints_fall_into_lower_tier() {
        assert_eq!(shade_by_identity('A', "A", 100.0), OVER_80);
        assert_eq!(shade_by_identity('A', "A", 80.1), OVER_80);
        assert_eq!(shade_by_identity('A', "A", 80.0), OVER_60);
        assert_eq!(shade_by_identity('A', "A", 60.1), OVER_60);
        assert_eq!(shade_by_identity('A', "A", 60.0), OVER_40);
        assert_eq!(shade_by_identity('A', "A", 40.1), OVER_40);
        assert_eq!(shade_by_identity('A', "A", 40.0), Rgb::WHITE);
        assert_eq!(shade_by_identity('A', "A", 0.0), Rgb::WHITE);
    }

    #[test]
    fn non_consensus_and_gaps_are_white() {
        assert_eq!(shade_by_identity('R', "A", 100.0), Rgb::WHITE);
        assert_eq!(shade_by_identity('-', "A", 100.0), Rgb::WHITE);
    }

    #[test]
    fn matching_is_case_insensitive_and_per_character() {
        assert_eq!(
            shade_by_identity('a', "A", 90.0),
            shade_by_identity('A', "A", 90.0)
        );
        assert_eq!(shade_by_identity('s', "AS", 90.0), OVER_80);
    }

    #[test]
    fn scheme_uses_cell_consensus() {
        let scheme = PidColourScheme::default();
        let profile = ColumnProfile {
            modal_residues: "Q".to_owned(),
            pid: 50.0,
            pid_ignoring_gaps: 70.0,
        };
        let cell = ResidueContext::new('q', 3);
        assert_eq!(scheme.find_colour(&cell), Rgb::WHITE);
        let gapped = cell.with_consensus(profile.consensus(false));
        assert_eq!(scheme.find_colour(&gapped), OVER_40);
        let ungapped = cell.with_consensus(profile.consensus(true));
        assert_eq!(scheme.find_colour(&ungapped), OVER_60);
    }

    #[test]
    fn custom_bands_are_sorted() {
        let reds = PidColourScheme::with_bands(vec![
            ConsensusBand {
                above: 50.0,
                colour: Rgb::new(255, 200, 200),
            },
            ConsensusBand {
                above: 90.0,
                colour: Rgb::RED,
            },
        ]);
        assert_eq!(reds.bands()[0].above, 90.0);
        let cell = ResidueContext::new('K', 0);
        let profile = ColumnProfile::new("K", 95.0);
        assert_eq!(
            reds.find_colour(&cell.with_consensus(profile.consensus(false))),
            Rgb::RED
        );
    }
}
