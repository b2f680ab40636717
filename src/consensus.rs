//! Per-column consensus inputs and residue helpers.
//!
//! Consensus and percent-identity values are computed elsewhere; this module
//! only defines the shapes the shading code consumes, plus the residue
//! classification every scheme shares.

/// Number of protein residue slots (20 amino acids, B, Z, X/U).
pub const PROTEIN_SLOTS: usize = 23;

/// Slot used for gaps and any symbol outside the protein alphabet.
pub const GAP_SLOT: usize = 23;

/// Whether `symbol` is a gap (`-`, `.` or space).
#[must_use]
pub const fn is_gap(symbol: char) -> bool {
    matches!(symbol, '-' | '.' | ' ')
}

/// Index of a residue in the protein alphabet, case-insensitive.
///
/// Order is `ARNDCQEGHILKMFPSTWYV` then `B`, `Z`, and `X`/`U` sharing a
/// slot. Everything else, gaps included, maps to [`GAP_SLOT`].
#[must_use]
pub const fn residue_index(symbol: char) -> usize {
    match symbol.to_ascii_uppercase() {
        'A' => 0,
        'R' => 1,
        'N' => 2,
        'D' => 3,
        'C' => 4,
        'Q' => 5,
        'E' => 6,
        'G' => 7,
        'H' => 8,
        'I' => 9,
        'L' => 10,
        'K' => 11,
        'M' => 12,
        'F' => 13,
        'P' => 14,
        'S' => 15,
        'T' => 16,
        'W' => 17,
        'Y' => 18,
        'V' => 19,
        'B' => 20,
        'Z' => 21,
        'X' | 'U' => 22,
        _ => GAP_SLOT,
    }
}

/// Consensus summary for one alignment column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnProfile {
    /// Modal residue(s); several characters when the consensus is tied.
    pub modal_residues: String,
    /// Percent identity of the modal residue, gaps counted.
    pub pid: f32,
    /// Percent identity of the modal residue, gapped sequences ignored.
    pub pid_ignoring_gaps: f32,
}

impl ColumnProfile {
    /// Profile with the same identity whether or not gaps are counted.
    #[must_use]
    pub fn new(modal_residues: impl Into<String>, pid: f32) -> Self {
        Self {
            modal_residues: modal_residues.into(),
            pid,
            pid_ignoring_gaps: pid,
        }
    }

    /// Percent identity under the given gap policy.
    #[must_use]
    pub fn percent_identity(&self, ignore_gaps: bool) -> f32 {
        if ignore_gaps {
            self.pid_ignoring_gaps
        } else {
            self.pid
        }
    }

    /// View of this profile for a scheme lookup.
    #[must_use]
    pub fn consensus(&self, ignore_gaps: bool) -> Consensus<'_> {
        Consensus {
            residues: &self.modal_residues,
            pid: self.percent_identity(ignore_gaps),
        }
    }
}

/// Borrowed consensus handed to a scheme for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consensus<'a> {
    /// Modal residue(s) of the column.
    pub residues: &'a str,
    /// Percent identity of the modal residue(s).
    pub pid: f32,
}

impl Consensus<'_> {
    /// Whether `residue` (case-folded) is one of the modal residues.
    #[must_use]
    pub fn contains(&self, residue: char) -> bool {
        let residue = residue.to_ascii_uppercase();
        self.residues.chars().any(|c| c == residue)
    }
}

/// Residue counts per column, gathered from aligned sequences.
///
/// Short sequences count as gaps in the columns they do not reach.
#[derive(Debug, Clone, Default)]
pub struct ResidueCounts {
    columns: Vec<[u32; GAP_SLOT + 1]>,
    depth: u32,
}

impl ResidueCounts {
    /// Count residues over all sequences of an alignment.
    #[must_use]
    pub fn from_sequences<S: AsRef<str>>(sequences: &[S]) -> Self {
        let width = sequences
            .iter()
            .map(|s| s.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut columns = vec![[0u32; GAP_SLOT + 1]; width];
        for seq in sequences {
            let mut len = 0;
            for (col, symbol) in seq.as_ref().chars().enumerate() {
                columns[col][residue_index(symbol)] += 1;
                len = col + 1;
            }
            for counts in &mut columns[len..] {
                counts[GAP_SLOT] += 1;
            }
        }
        Self {
            columns,
            depth: sequences.len() as u32,
        }
    }

    /// Number of columns counted.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of sequences counted.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Count of `symbol`'s slot at `column`; 0 past the last column.
    #[must_use]
    pub fn count(&self, column: usize, symbol: char) -> u32 {
        self.columns
            .get(column)
            .map_or(0, |c| c[residue_index(symbol)])
    }

    /// Gap count at `column`.
    #[must_use]
    pub fn gaps(&self, column: usize) -> u32 {
        self.columns.get(column).map_or(0, |c| c[GAP_SLOT])
    }
}
