//! Annotation rows consumed by the annotation gradient scheme.

use crate::colour::Rgb;
use crate::shading::DataRange;

/// One cell of an annotation row.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElement {
    /// Score; NaN means "no value".
    pub value: f32,
    /// Secondary-structure symbol (`H`, `E`, ...), if any.
    pub secondary_structure: Option<char>,
    /// Colour attached by whatever produced the annotation.
    pub colour: Option<Rgb>,
}

impl AnnotationElement {
    /// Element carrying only a score.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            secondary_structure: None,
            colour: None,
        }
    }

    /// Builder-style attached colour.
    #[must_use]
    pub const fn with_colour(mut self, colour: Rgb) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Builder-style secondary-structure symbol.
    #[must_use]
    pub const fn with_secondary_structure(mut self, symbol: char) -> Self {
        self.secondary_structure = Some(symbol);
        self
    }

    /// Whether the secondary-structure symbol marks a real element
    /// (anything printable other than `.` and `-`).
    #[must_use]
    pub fn has_structure_symbol(&self) -> bool {
        self.secondary_structure
            .is_some_and(|s| s > ' ' && s != '.' && s != '-')
    }
}

/// How an annotation row is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationKind {
    /// Numeric graph (bars or line).
    #[default]
    Graph,
    /// Secondary-structure icons, no graph.
    SecondaryStructure,
}

/// A row of per-column annotation values.
///
/// `graph_min`/`graph_max` are a snapshot taken when the row is built;
/// [`AnnotationRow::set_value`] does not move them, so colours stay put
/// while a user edits cells. Call [`AnnotationRow::refresh_range`] to
/// rescale explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRow {
    /// Row label, used to pair sequence-associated rows.
    pub label: String,
    /// Identifier of the calculation that produced the row.
    pub calc_id: Option<String>,
    /// Name of the sequence this row belongs to, if any.
    pub sequence_ref: Option<String>,
    /// Rendering kind.
    pub kind: AnnotationKind,
    /// Threshold line value, if one has been drawn on the row.
    pub threshold: Option<f32>,
    elements: Vec<Option<AnnotationElement>>,
    graph_min: f32,
    graph_max: f32,
}

impl AnnotationRow {
    /// Build a graph row and snapshot its value range.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        elements: Vec<Option<AnnotationElement>>,
    ) -> Self {
        let mut row = Self {
            label: label.into(),
            calc_id: None,
            sequence_ref: None,
            kind: AnnotationKind::Graph,
            threshold: None,
            elements,
            graph_min: 0.0,
            graph_max: 0.0,
        };
        row.refresh_range();
        row
    }

    /// Convenience constructor for a row of plain scores.
    #[must_use]
    pub fn from_values(
        label: impl Into<String>,
        values: impl IntoIterator<Item = f32>,
    ) -> Self {
        let elements = values
            .into_iter()
            .map(|v| Some(AnnotationElement::new(v)))
            .collect();
        Self::new(label, elements)
    }

    /// Builder-style threshold line.
    #[must_use]
    pub fn with_threshold(mut self, value: f32) -> Self {
        self.threshold = Some(value);
        self
    }

    /// Builder-style owning sequence.
    #[must_use]
    pub fn with_sequence_ref(mut self, name: impl Into<String>) -> Self {
        self.sequence_ref = Some(name.into());
        self
    }

    /// Builder-style calculation id.
    #[must_use]
    pub fn with_calc_id(mut self, calc_id: impl Into<String>) -> Self {
        self.calc_id = Some(calc_id.into());
        self
    }

    /// Builder-style rendering kind.
    #[must_use]
    pub fn with_kind(mut self, kind: AnnotationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Number of columns (including empty ones).
    #[must_use]
    pub fn width(&self) -> usize {
        self.elements.len()
    }

    /// Element at `column`, if present.
    #[must_use]
    pub fn element(&self, column: usize) -> Option<&AnnotationElement> {
        self.elements.get(column).and_then(Option::as_ref)
    }

    /// All cells in column order.
    #[must_use]
    pub fn elements(&self) -> &[Option<AnnotationElement>] {
        &self.elements
    }

    /// Edit one cell's score. The snapshot range is left alone.
    /// Returns `false` if there is no element at `column`.
    pub fn set_value(&mut self, column: usize, value: f32) -> bool {
        match self.elements.get_mut(column).and_then(Option::as_mut) {
            Some(el) => {
                el.value = value;
                true
            }
            None => false,
        }
    }

    /// Smallest value seen when the range was last taken.
    #[must_use]
    pub fn graph_min(&self) -> f32 {
        self.graph_min
    }

    /// Largest value seen when the range was last taken.
    #[must_use]
    pub fn graph_max(&self) -> f32 {
        self.graph_max
    }

    /// Snapshot range as a [`DataRange`].
    #[must_use]
    pub fn graph_range(&self) -> DataRange {
        DataRange {
            min: self.graph_min,
            max: self.graph_max,
        }
    }

    /// Retake the min/max snapshot from the current values. A row with no
    /// scores gets `0..0`.
    pub fn refresh_range(&mut self) {
        let range = DataRange::of(
            self.elements.iter().flatten().map(|el| el.value),
        )
        .unwrap_or(DataRange { min: 0.0, max: 0.0 });
        self.graph_min = range.min;
        self.graph_max = range.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_snapshotted_at_construction() {
        let mut row = AnnotationRow::from_values("score", [1.0, 4.0, 2.0]);
        assert_eq!((row.graph_min(), row.graph_max()), (1.0, 4.0));

        assert!(row.set_value(1, 40.0));
        assert_eq!(row.element(1).map(|e| e.value), Some(40.0));
        assert_eq!(row.graph_max(), 4.0);

        row.refresh_range();
        assert_eq!(row.graph_max(), 40.0);
    }

    #[test]
    fn empty_cells_and_nan_are_skipped() {
        let row = AnnotationRow::new(
            "sparse",
            vec![
                None,
                Some(AnnotationElement::new(f32::NAN)),
                Some(AnnotationElement::new(-3.0)),
            ],
        );
        assert_eq!(row.graph_range(), DataRange { min: -3.0, max: -3.0 });
        assert!(row.element(0).is_none());
        assert!(row.element(7).is_none());
    }

    #[test]
    fn set_value_on_missing_cell_is_refused() {
        let mut row = AnnotationRow::new("gappy", vec![None]);
        assert!(!row.set_value(0, 1.0));
        assert!(!row.set_value(5, 1.0));
    }

    #[test]
    fn structure_symbols() {
        let helix = AnnotationElement::new(0.0).with_secondary_structure('H');
        let blank = AnnotationElement::new(0.0).with_secondary_structure('-');
        assert!(helix.has_structure_symbol());
        assert!(!blank.has_structure_symbol());
        assert!(!AnnotationElement::new(0.0).has_structure_symbol());
    }
}
