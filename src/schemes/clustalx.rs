use super::{ColourScheme, ResidueContext};
use crate::colour::Rgb;
use crate::consensus::{is_gap, residue_index, ResidueCounts};

/// A residue group that counts as conserved in a column when its members
/// make up strictly more than `threshold` percent of the column.
#[derive(Debug, Clone, Copy)]
struct Group {
    residues: &'static str,
    threshold: u32,
}

impl Group {
    const fn new(residues: &'static str, threshold: u32) -> Self {
        Self {
            residues,
            threshold,
        }
    }

    fn is_conserved(self, counts: &ResidueCounts, column: usize) -> bool {
        let depth = counts.depth();
        if depth == 0 {
            return false;
        }
        let total: u32 = self
            .residues
            .chars()
            .map(|r| counts.count(column, r))
            .sum();
        (total as f32 * 100.0) / depth as f32 > self.threshold as f32
    }
}

const HYDROPHOBIC_60: Group = Group::new("WLVIMAFCYHP", 60);
const HYDROPHOBIC_80: Group = Group::new("WLVIMAFCYHP", 80);
const ACIDIC_50: Group = Group::new("ED", 50);
const BASIC_60: Group = Group::new("KR", 60);
const ASN_50: Group = Group::new("N", 50);
const AMIDE_ACID_50: Group = Group::new("QE", 50);
const HYDROXYL_50: Group = Group::new("TS", 50);
const ANY_GLY: Group = Group::new("G", 0);
const ANY_PRO: Group = Group::new("P", 0);

const fn strict(residue: &'static str) -> Group {
    Group::new(residue, 85)
}

const HYDROPHOBIC_SET: &[Group] = &[
    HYDROPHOBIC_60,
    HYDROPHOBIC_80,
    strict("A"),
    strict("C"),
    strict("F"),
    strict("H"),
    strict("I"),
    strict("L"),
    strict("M"),
    strict("V"),
    strict("W"),
    strict("Y"),
    strict("P"),
    strict("Q"),
];
const HYDROXYL_SET: &[Group] =
    &[HYDROXYL_50, strict("S"), strict("T"), HYDROPHOBIC_60, HYDROPHOBIC_80];
const ASN_SET: &[Group] = &[strict("N"), strict("D"), ASN_50];
const GLN_SET: &[Group] = &[
    AMIDE_ACID_50,
    strict("Q"),
    strict("T"),
    BASIC_60,
    strict("K"),
    strict("R"),
];
const BASIC_SET: &[Group] = &[BASIC_60, strict("K"), strict("R"), strict("Q")];
const GLU_SET: &[Group] = &[
    BASIC_60,
    strict("D"),
    strict("E"),
    AMIDE_ACID_50,
    strict("Q"),
    ACIDIC_50,
];
const ASP_SET: &[Group] =
    &[BASIC_60, strict("D"), strict("E"), strict("N"), ACIDIC_50];
const GLY_SET: &[Group] = &[ANY_GLY];
const PRO_SET: &[Group] = &[ANY_PRO];

/// Clustal X residue colouring.
///
/// A residue takes its group colour only when one of the residue groups
/// associated with it is conserved in the column; otherwise it is white.
/// Conservation is measured over the residue counts of the current
/// alignment, refreshed through [`ColourScheme::alignment_changed`].
#[derive(Debug, Clone, Default)]
pub struct ClustalxColourScheme {
    counts: ResidueCounts,
}

impl ClustalxColourScheme {
    /// Hydrophobic colour.
    pub const BLUE: Rgb = Rgb::new(128, 179, 230);
    /// Positive charge colour.
    pub const RED: Rgb = Rgb::new(230, 51, 26);
    /// Polar colour.
    pub const GREEN: Rgb = Rgb::new(26, 204, 26);
    /// Glycine colour.
    pub const ORANGE: Rgb = Rgb::new(230, 153, 77);
    /// Aromatic colour.
    pub const CYAN: Rgb = Rgb::new(26, 179, 179);
    /// Conserved cysteine colour.
    pub const PINK: Rgb = Rgb::new(230, 128, 128);
    /// Negative charge colour.
    pub const MAGENTA: Rgb = Rgb::new(204, 77, 204);
    /// Proline colour.
    pub const YELLOW: Rgb = Rgb::new(204, 204, 0);

    /// Scheme over the given aligned sequences.
    #[must_use]
    pub fn new(sequences: &[&str]) -> Self {
        Self {
            counts: ResidueCounts::from_sequences(sequences),
        }
    }

    /// Group colour and the groups that must be conserved to earn it,
    /// indexed by protein residue slot.
    fn rule(slot: usize) -> Option<(Rgb, &'static [Group])> {
        let rule = match slot {
            0 | 4 | 9 | 10 | 12 | 13 | 17 | 19 => {
                (Self::BLUE, HYDROPHOBIC_SET)
            }
            1 | 11 => (Self::RED, BASIC_SET),
            2 => (Self::GREEN, ASN_SET),
            3 => (Self::MAGENTA, ASP_SET),
            5 => (Self::GREEN, GLN_SET),
            6 => (Self::MAGENTA, GLU_SET),
            7 => (Self::ORANGE, GLY_SET),
            8 | 18 => (Self::CYAN, HYDROPHOBIC_SET),
            14 => (Self::YELLOW, PRO_SET),
            15 | 16 => (Self::GREEN, HYDROXYL_SET),
            _ => return None,
        };
        Some(rule)
    }
}

impl ColourScheme for ClustalxColourScheme {
    fn name(&self) -> &str {
        "Clustal"
    }

    fn find_colour(&self, cell: &ResidueContext<'_>) -> Rgb {
        let column = cell.column;
        if column >= self.counts.width() || is_gap(cell.residue) {
            return Rgb::WHITE;
        }
        let slot = residue_index(cell.residue);
        let Some((colour, groups)) = Self::rule(slot) else {
            return Rgb::WHITE;
        };

        // cysteine conserved above 85% overrides its hydrophobic colour
        if slot == residue_index('C')
            && strict("C").is_conserved(&self.counts, column)
        {
            return Self::PINK;
        }

        if groups.iter().any(|g| g.is_conserved(&self.counts, column)) {
            colour
        } else {
            Rgb::WHITE
        }
    }

    fn alignment_changed(&mut self, sequences: &[&str]) {
        self.counts = ResidueCounts::from_sequences(sequences);
    }
}
