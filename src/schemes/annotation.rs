use rustc_hash::FxHashMap;

use super::{ColourScheme, ResidueContext};
use crate::annotation::{AnnotationKind, AnnotationRow};
use crate::colour::Rgb;
use crate::consensus::is_gap;
use crate::shading::{
    normalize, ColourRange, ThresholdMode, ThresholdPolicy,
};

/// Helix icon colour.
pub const HELIX_COLOUR: Rgb = Rgb::RED;
/// Sheet icon colour.
pub const SHEET_COLOUR: Rgb = Rgb::new(0, 124, 0);
/// Colour for any other structure icon (RNA stems, turns, ...).
pub const STEM_COLOUR: Rgb = Rgb::new(0, 0, 178);

/// Colours residues by the value of an annotation row in their column.
///
/// Built either with a two-colour gradient ([`Self::new`]) or in follower
/// mode ([`Self::following`]), where graph rows take the colour of another
/// residue scheme and only the threshold gate is applied.
#[derive(Debug)]
pub struct AnnotationColourGradient {
    row: AnnotationRow,
    range: ColourRange,
    threshold_mode: ThresholdMode,
    threshold_is_min_max: bool,
    use_original_colours: bool,
    no_gradient: bool,
    follower: Option<Box<dyn ColourScheme>>,
    seq_associated: bool,
    sequence_rows: FxHashMap<String, AnnotationRow>,
}

impl AnnotationColourGradient {
    /// Gradient scheme from `min_colour` to `max_colour` over the row's
    /// value range. `mode` gates against the row's threshold line.
    #[must_use]
    pub fn new(
        row: AnnotationRow,
        min_colour: Rgb,
        max_colour: Rgb,
        mode: ThresholdMode,
    ) -> Self {
        Self {
            row,
            range: ColourRange::new(min_colour, max_colour),
            threshold_mode: mode,
            threshold_is_min_max: false,
            use_original_colours: false,
            no_gradient: false,
            follower: None,
            seq_associated: false,
            sequence_rows: FxHashMap::default(),
        }
    }

    /// Follower scheme: visible cells take `follower`'s colour (or the
    /// element's attached colour when there is no follower).
    #[must_use]
    pub fn following(
        row: AnnotationRow,
        follower: Option<Box<dyn ColourScheme>>,
        mode: ThresholdMode,
    ) -> Self {
        let mut scheme = Self::new(row, Rgb::WHITE, Rgb::WHITE, mode);
        scheme.no_gradient = true;
        scheme.follower = follower;
        scheme
    }

    /// The annotation row being coloured.
    #[must_use]
    pub fn row(&self) -> &AnnotationRow {
        &self.row
    }

    /// Mutable row access, e.g. to edit a cell or move the threshold line.
    pub fn row_mut(&mut self) -> &mut AnnotationRow {
        &mut self.row
    }

    /// Gradient configuration.
    #[must_use]
    pub fn range(&self) -> &ColourRange {
        &self.range
    }

    /// Mutable gradient configuration.
    pub fn range_mut(&mut self) -> &mut ColourRange {
        &mut self.range
    }

    /// Colour at the low end of the gradient.
    #[must_use]
    pub fn min_colour(&self) -> Rgb {
        self.range.min_colour
    }

    /// Colour at the high end of the gradient.
    #[must_use]
    pub fn max_colour(&self) -> Rgb {
        self.range.max_colour
    }

    /// Threshold direction.
    #[must_use]
    pub fn threshold_mode(&self) -> ThresholdMode {
        self.threshold_mode
    }

    /// Threshold value in force, or 0 when no threshold applies.
    #[must_use]
    pub fn threshold_value(&self) -> f32 {
        self.policy(&self.row).value
    }

    /// Whether the threshold replaces one end of the colour span.
    #[must_use]
    pub fn threshold_is_min_max(&self) -> bool {
        self.threshold_is_min_max
    }

    /// See [`Self::threshold_is_min_max`].
    pub fn set_threshold_is_min_max(&mut self, min_max: bool) {
        self.threshold_is_min_max = min_max;
    }

    /// Whether colours attached to elements are shown instead of the
    /// gradient.
    #[must_use]
    pub fn use_original_colours(&self) -> bool {
        self.use_original_colours
    }

    /// See [`Self::use_original_colours`].
    pub fn set_use_original_colours(&mut self, original: bool) {
        self.use_original_colours = original;
    }

    /// Whether each sequence is coloured by its own row.
    #[must_use]
    pub fn seq_associated(&self) -> bool {
        self.seq_associated
    }

    /// See [`Self::seq_associated`].
    pub fn set_seq_associated(&mut self, associated: bool) {
        self.seq_associated = associated;
    }

    /// Attach a per-sequence row. The row must name its sequence and share
    /// this scheme's row label (and calculation id, when both have one);
    /// otherwise it is handed back.
    ///
    /// # Errors
    ///
    /// Returns the row unchanged if it does not belong to this scheme.
    pub fn attach_sequence_row(
        &mut self,
        row: AnnotationRow,
    ) -> Result<(), AnnotationRow> {
        let calc_matches = match (&row.calc_id, &self.row.calc_id) {
            (Some(theirs), Some(ours)) => theirs == ours,
            _ => true,
        };
        if row.label != self.row.label || !calc_matches {
            return Err(row);
        }
        let Some(sequence) = row.sequence_ref.clone() else {
            return Err(row);
        };
        log::debug!(
            "attaching '{}' row for sequence '{sequence}'",
            row.label
        );
        let _ = self.sequence_rows.insert(sequence, row);
        Ok(())
    }

    /// Per-sequence row for `sequence`, if attached.
    #[must_use]
    pub fn sequence_row(&self, sequence: &str) -> Option<&AnnotationRow> {
        self.sequence_rows.get(sequence)
    }

    /// Threshold policy for one row: the configured direction against the
    /// row's threshold line, or no gating if the row has none.
    fn policy(&self, row: &AnnotationRow) -> ThresholdPolicy {
        match (self.threshold_mode, row.threshold) {
            (ThresholdMode::None, _) | (_, None) => ThresholdPolicy::NONE,
            (mode, Some(value)) => ThresholdPolicy {
                mode,
                value,
                is_min_max: self.threshold_is_min_max,
            },
        }
    }

    /// Colour for `column` of `row`.
    ///
    /// Missing elements and NaN values give the no-value colour (as a
    /// [`ColourScheme`], residues with no element are white instead). With
    /// `pass_through`, a non-black attached colour is returned as is;
    /// black or absent colours fall through to the gradient. Values the
    /// threshold hides are white.
    #[must_use]
    pub fn colour_for(
        &self,
        row: &AnnotationRow,
        column: usize,
        pass_through: bool,
    ) -> Rgb {
        self.shade(row, column, pass_through, None)
    }

    fn shade(
        &self,
        row: &AnnotationRow,
        column: usize,
        pass_through: bool,
        cell: Option<&ResidueContext<'_>>,
    ) -> Rgb {
        let Some(element) = row.element(column) else {
            return self.range.no_value();
        };
        if element.value.is_nan() {
            return self.range.no_value();
        }
        if pass_through {
            if let Some(colour) = element.colour.filter(|c| *c != Rgb::BLACK)
            {
                return colour;
            }
        }
        let policy = self.policy(row);
        if policy.is_suppressed(element.value) {
            return Rgb::WHITE;
        }

        let followed = || {
            self.follower
                .as_ref()
                .zip(cell)
                .map(|(scheme, cell)| scheme.find_colour(cell))
        };

        if row.kind == AnnotationKind::SecondaryStructure {
            if !element.has_structure_symbol() {
                return Rgb::WHITE;
            }
            return followed().unwrap_or(match element.secondary_structure {
                Some('H') => HELIX_COLOUR,
                Some('E') => SHEET_COLOUR,
                _ => STEM_COLOUR,
            });
        }
        if self.no_gradient {
            return followed()
                .or(element.colour)
                .unwrap_or(Rgb::WHITE);
        }

        let observed = Some(row.graph_range());
        self.range
            .colour_for(normalize(element.value, &self.range, &policy, observed))
    }
}

impl ColourScheme for AnnotationColourGradient {
    fn name(&self) -> &str {
        "Annotation"
    }

    fn find_colour(&self, cell: &ResidueContext<'_>) -> Rgb {
        if is_gap(cell.residue) {
            return Rgb::WHITE;
        }
        let row = if self.seq_associated {
            match cell.sequence.and_then(|s| self.sequence_rows.get(s)) {
                Some(row) => row,
                None => return Rgb::WHITE,
            }
        } else {
            &self.row
        };
        if row.element(cell.column).is_none() {
            return Rgb::WHITE;
        }
        self.shade(row, cell.column, self.use_original_colours, Some(cell))
    }

    fn alignment_changed(&mut self, sequences: &[&str]) {
        if let Some(follower) = self.follower.as_mut() {
            follower.alignment_changed(sequences);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationElement;
    use crate::schemes::UserColourScheme;

    const GRAY: Rgb = Rgb::new(50, 200, 150);
    const PURPLE: Rgb = Rgb::new(150, 100, 250);

    /// Values 0..=10 with attached colours (20c, 20c, 20c) and a threshold
    /// line at 5. Column 0's attached colour is black.
    fn ramp() -> AnnotationRow {
        let elements = (0..=10u8)
            .map(|c| {
                Some(
                    AnnotationElement::new(f32::from(c))
                        .with_colour(Rgb::new(20 * c, 20 * c, 20 * c)),
                )
            })
            .collect();
        AnnotationRow::new("ramp", elements).with_threshold(5.0)
    }

    fn gradient(mode: ThresholdMode) -> AnnotationColourGradient {
        AnnotationColourGradient::new(ramp(), GRAY, PURPLE, mode)
    }

    fn linear(step: u8) -> Rgb {
        Rgb::new(50 + 10 * step, 200 - 10 * step, 150 + 10 * step)
    }

    fn shade_all(scheme: &AnnotationColourGradient) -> Vec<Rgb> {
        (0..=10)
            .map(|c| scheme.colour_for(scheme.row(), c, false))
            .collect()
    }

    #[test]
    fn no_threshold_is_linear() {
        let scheme = gradient(ThresholdMode::None);
        let expected: Vec<_> = (0..=10).map(linear).collect();
        assert_eq!(shade_all(&scheme), expected);
        assert_eq!(scheme.colour_for(scheme.row(), 10, false), PURPLE);
    }

    #[test]
    fn above_threshold_hides_low_values() {
        let colours = shade_all(&gradient(ThresholdMode::Above));
        for (c, colour) in (0..=10u8).zip(colours) {
            let expected = if c <= 5 { Rgb::WHITE } else { linear(c) };
            assert_eq!(colour, expected, "column {c}");
        }
    }

    #[test]
    fn below_threshold_hides_high_values() {
        let colours = shade_all(&gradient(ThresholdMode::Below));
        for (c, colour) in (0..=10u8).zip(colours) {
            let expected = if c >= 5 { Rgb::WHITE } else { linear(c) };
            assert_eq!(colour, expected, "column {c}");
        }
    }

    #[test]
    fn above_threshold_min_max_respans() {
        let mut scheme = gradient(ThresholdMode::Above);
        scheme.set_threshold_is_min_max(true);
        let colours = shade_all(&scheme);
        for (c, colour) in (0..=10u8).zip(colours) {
            let expected = if c <= 5 {
                Rgb::WHITE
            } else {
                let s = 20 * (c - 5);
                Rgb::new(50 + s, 200 - s, 150 + s)
            };
            assert_eq!(colour, expected, "column {c}");
        }
        assert_eq!(scheme.colour_for(scheme.row(), 6, false), Rgb::new(70, 180, 170));
    }

    #[test]
    fn below_threshold_min_max_respans() {
        let mut scheme = gradient(ThresholdMode::Below);
        scheme.set_threshold_is_min_max(true);
        let colours = shade_all(&scheme);
        for (c, colour) in (0..=10u8).zip(colours) {
            let expected = if c >= 5 {
                Rgb::WHITE
            } else {
                Rgb::new(50 + 20 * c, 200 - 20 * c, 150 + 20 * c)
            };
            assert_eq!(colour, expected, "column {c}");
        }
    }

    #[test]
    fn original_colours_pass_through_except_black() {
        let scheme = gradient(ThresholdMode::None);
        let row = scheme.row();
        assert_eq!(scheme.colour_for(row, 0, true), GRAY);
        for c in 1..=10u8 {
            assert_eq!(
                scheme.colour_for(row, usize::from(c), true),
                Rgb::new(20 * c, 20 * c, 20 * c)
            );
        }
    }

    #[test]
    fn missing_and_nan_give_no_value_colour() {
        let mut scheme = gradient(ThresholdMode::Above);
        assert!(scheme.row_mut().set_value(7, f32::NAN));
        let row = scheme.row();
        assert_eq!(scheme.colour_for(row, 7, false), GRAY);
        assert_eq!(scheme.colour_for(row, 7, true), GRAY);
        assert_eq!(scheme.colour_for(row, 42, false), GRAY);

        scheme.range_mut().no_value_colour = Some(Rgb::YELLOW);
        assert_eq!(scheme.colour_for(scheme.row(), 7, false), Rgb::YELLOW);
    }

    #[test]
    fn residues_without_an_element_are_white() {
        let row = AnnotationRow::new(
            "gappy",
            vec![
                Some(AnnotationElement::new(0.0)),
                None,
                Some(AnnotationElement::new(10.0)),
            ],
        );
        let scheme = AnnotationColourGradient::new(
            row,
            GRAY,
            PURPLE,
            ThresholdMode::None,
        );
        assert_eq!(scheme.find_colour(&ResidueContext::new('A', 1)), Rgb::WHITE);
        assert_eq!(scheme.find_colour(&ResidueContext::new('A', 9)), Rgb::WHITE);
        assert_eq!(scheme.find_colour(&ResidueContext::new('A', 2)), PURPLE);
        // direct shading still reports the no-value colour
        assert_eq!(scheme.colour_for(scheme.row(), 1, false), GRAY);
    }

    #[test]
    fn threshold_needs_a_line_on_the_row() {
        let mut row = ramp();
        row.threshold = None;
        let scheme =
            AnnotationColourGradient::new(row, GRAY, PURPLE, ThresholdMode::Above);
        assert_eq!(scheme.colour_for(scheme.row(), 2, false), linear(2));
        assert_eq!(scheme.threshold_value(), 0.0);
    }

    #[test]
    fn structure_rows_use_icon_colours() {
        let elements = ['H', 'E', 'S', '-']
            .into_iter()
            .map(|s| Some(AnnotationElement::new(0.0).with_secondary_structure(s)))
            .collect();
        let row = AnnotationRow::new("Secondary Structure", elements)
            .with_kind(AnnotationKind::SecondaryStructure);
        let scheme =
            AnnotationColourGradient::new(row, GRAY, PURPLE, ThresholdMode::None);
        let colours: Vec<_> = (0..4)
            .map(|c| scheme.find_colour(&ResidueContext::new('A', c)))
            .collect();
        assert_eq!(
            colours,
            [HELIX_COLOUR, SHEET_COLOUR, STEM_COLOUR, Rgb::WHITE]
        );
    }

    #[test]
    fn follower_mode() {
        let follower = UserColourScheme::uniform("all cyan", Rgb::CYAN);
        let scheme = AnnotationColourGradient::following(
            ramp(),
            Some(Box::new(follower)),
            ThresholdMode::Above,
        );
        assert_eq!(scheme.find_colour(&ResidueContext::new('K', 8)), Rgb::CYAN);
        assert_eq!(scheme.find_colour(&ResidueContext::new('K', 3)), Rgb::WHITE);

        let bare =
            AnnotationColourGradient::following(ramp(), None, ThresholdMode::None);
        assert_eq!(
            bare.find_colour(&ResidueContext::new('K', 3)),
            Rgb::new(60, 60, 60)
        );
    }

    #[test]
    fn gaps_are_white() {
        let scheme = gradient(ThresholdMode::None);
        assert_eq!(scheme.find_colour(&ResidueContext::new('-', 10)), Rgb::WHITE);
        assert_eq!(scheme.find_colour(&ResidueContext::new('L', 10)), PURPLE);
    }

    #[test]
    fn sequence_associated_rows() {
        let mut scheme = gradient(ThresholdMode::None);
        scheme.set_seq_associated(true);

        let own = AnnotationRow::from_values("ramp", [0.0, 10.0])
            .with_sequence_ref("seq1");
        assert!(scheme.attach_sequence_row(own).is_ok());
        let stranger = AnnotationRow::from_values("other", [1.0])
            .with_sequence_ref("seq2");
        assert!(scheme.attach_sequence_row(stranger).is_err());
        let orphan = AnnotationRow::from_values("ramp", [1.0]);
        assert!(scheme.attach_sequence_row(orphan).is_err());

        let cell = ResidueContext::new('A', 1).with_sequence("seq1");
        assert_eq!(scheme.find_colour(&cell), PURPLE);
        let unknown = ResidueContext::new('A', 1).with_sequence("seq2");
        assert_eq!(scheme.find_colour(&unknown), Rgb::WHITE);
        assert!(scheme.sequence_row("seq1").is_some());
    }
}
