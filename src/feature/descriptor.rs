//! Feature colour descriptors, the `|`-separated form used in feature
//! files:
//!
//! ```text
//! [score|label|attribute|<name>|] mincolour | maxcolour |
//!     [noValueMin|noValueMax|noValueNone|] [abso|] min | max |
//!     (above|below) | threshold   or   none
//! ```
//!
//! A lone colour (`red`, `ff0000`, `255,0,0`) is a simple colour; a lone
//! `label` or `attribute|<name>` colours by label.

use std::fmt;
use std::str::FromStr;

use super::{AttributeName, ColourBy, FeatureColour, NoValueColour};
use crate::colour::Rgb;
use crate::error::ShadeError;
use crate::shading::{ThresholdMode, ThresholdPolicy};

const BAR: char = '|';
const LABEL: &str = "label";
const SCORE: &str = "score";
const ATTRIBUTE: &str = "attribute";
const ABSOLUTE: &str = "abso";
const ABOVE: &str = "above";
const BELOW: &str = "below";

/// Bounds assumed when a descriptor leaves min or max empty: the smallest
/// positive (subnormal) float and the largest float.
const DEFAULT_MIN: f32 = f32::from_bits(1);
const DEFAULT_MAX: f32 = f32::MAX;

/// Float text as feature files carry it: plain decimals with at least one
/// fractional digit for magnitudes in `[1e-3, 1e7)`, otherwise
/// `d.ddddE<exp>` with at least one fractional digit (`1.0E-7`,
/// `3.4028235E38`).
pub(super) fn format_float(value: f32) -> String {
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_owned();
    }
    let magnitude = value.abs();
    if value.is_nan() || magnitude == 0.0 || (1e-3..1e7).contains(&magnitude)
    {
        return format!("{value:?}");
    }
    let shortest = format!("{value:e}");
    let scientific = if shortest.contains('.') {
        shortest
    } else {
        format!("{value:.1e}")
    };
    scientific.replace('e', "E")
}

fn starts_with_tag(token: &str, tag: &str) -> bool {
    token
        .get(..tag.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(tag))
}

/// Cursor over the fields between bars. An empty field stands for a bar
/// with nothing in front of it.
struct Fields<'a> {
    items: Vec<&'a str>,
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(descriptor: &'a str) -> Self {
        Self {
            items: descriptor.split(BAR).collect(),
            pos: 0,
        }
    }

    fn next_opt(&mut self) -> Option<&'a str> {
        let item = self.items.get(self.pos).copied()?;
        self.pos += 1;
        Some(item)
    }

    fn next(&mut self, what: &'static str) -> Result<&'a str, ShadeError> {
        self.next_opt().ok_or(ShadeError::MissingToken(what))
    }

    fn has_more(&self) -> bool {
        self.pos < self.items.len()
    }

    fn remaining(&self) -> &[&'a str] {
        self.items.get(self.pos..).unwrap_or_default()
    }
}

fn parse_bound(
    token: &str,
    default: f32,
    err: impl FnOnce() -> ShadeError,
) -> Result<f32, ShadeError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(default);
    }
    token.parse().map_err(|_| err())
}

fn optional_colour(token: &str) -> Result<Option<Rgb>, ShadeError> {
    if token.trim().is_empty() {
        return Ok(None);
    }
    Rgb::parse(token)
        .map(Some)
        .ok_or_else(|| ShadeError::InvalidColour(token.to_owned()))
}

impl FeatureColour {
    /// Parse a feature colour descriptor.
    ///
    /// Tags are matched case-insensitively by prefix. Unknown threshold
    /// types and trailing fields are logged and ignored. An empty minimum
    /// colour field means colour by label.
    ///
    /// # Errors
    ///
    /// [`ShadeError::InvalidColour`] for unparseable colours,
    /// [`ShadeError::InvalidMinimum`], [`ShadeError::InvalidMaximum`] or
    /// [`ShadeError::InvalidThreshold`] for unparseable numbers, and
    /// [`ShadeError::MissingToken`] when a graduated descriptor stops
    /// early.
    pub fn parse(descriptor: &str) -> Result<Self, ShadeError> {
        let mut fields = Fields::new(descriptor);
        let first = fields.next("a colour")?;
        if first.is_empty() {
            return Err(ShadeError::InvalidColour(descriptor.to_owned()));
        }

        let mut by_label = false;
        let mut attribute = None;
        let min_colour = if starts_with_tag(first, LABEL) {
            by_label = true;
            fields.next_opt()
        } else if starts_with_tag(first, SCORE) {
            fields.next_opt()
        } else if starts_with_tag(first, ATTRIBUTE) {
            attribute = fields.next_opt().map(AttributeName::from_display);
            fields.next_opt()
        } else {
            Some(first)
        };

        if !fields.has_more() {
            if by_label || attribute.is_some() {
                let colour = Self::by_label();
                return Ok(match attribute {
                    Some(name) => colour.with_attribute(name),
                    None => colour,
                });
            }
            return Rgb::parse(descriptor).map(Self::simple).ok_or_else(|| {
                ShadeError::InvalidColour(descriptor.to_owned())
            });
        }

        let mut colour = Self::parse_graduated(
            descriptor,
            min_colour.unwrap_or_default(),
            &mut fields,
        )?;
        if let Some(name) = attribute {
            colour = colour.with_attribute(name);
        }
        if let Some(threshold) = Self::parse_threshold(&mut fields)? {
            colour.set_threshold(threshold);
        }
        if fields.has_more() {
            log::warn!(
                "ignoring extra fields in colour descriptor '{descriptor}': {}",
                fields.remaining().join("|")
            );
        }
        Ok(colour)
    }

    /// Colours, no-value setting and bounds of a graduated (or
    /// label-with-threshold) descriptor.
    fn parse_graduated(
        descriptor: &str,
        min_colour: &str,
        fields: &mut Fields<'_>,
    ) -> Result<Self, ShadeError> {
        let min_colour = optional_colour(min_colour)?;
        let max_colour = optional_colour(fields.next("a maximum colour")?)?;

        let mut token = fields.next("a minimum value")?;
        let no_value = NoValueColour::ALL
            .into_iter()
            .find(|nv| token.eq_ignore_ascii_case(nv.tag()));
        if no_value.is_some() {
            token = fields.next("a minimum value")?;
        }
        let no_value = no_value.unwrap_or_default();

        let auto_scaled = !starts_with_tag(token, ABSOLUTE);
        if !auto_scaled {
            token = fields.next("a minimum value")?;
        }
        let min = parse_bound(token, DEFAULT_MIN, || {
            ShadeError::InvalidMinimum(token.to_owned())
        })?;
        let max = parse_bound(fields.next("a maximum value")?, DEFAULT_MAX, || {
            ShadeError::InvalidMaximum(descriptor.to_owned())
        })?;

        let mut colour = match min_colour {
            Some(min_colour) => Self::graduated(
                min_colour,
                max_colour.unwrap_or(Rgb::BLACK),
                min,
                max,
            )
            .with_no_value(no_value),
            None => {
                let mut label = Self::by_label();
                label.update_bounds(min, max);
                label
            }
        };
        colour.set_auto_scaled(auto_scaled);
        Ok(colour)
    }

    fn parse_threshold(
        fields: &mut Fields<'_>,
    ) -> Result<Option<ThresholdPolicy>, ShadeError> {
        let Some(kind) = fields.next_opt() else {
            return Ok(None);
        };
        let mode = if starts_with_tag(kind, BELOW) {
            ThresholdMode::Below
        } else if starts_with_tag(kind, ABOVE) {
            ThresholdMode::Above
        } else {
            if !starts_with_tag(kind, "no") {
                log::warn!("ignoring unrecognised threshold type '{kind}'");
            }
            return Ok(None);
        };
        let token = fields.next("a threshold value")?;
        let value = token
            .trim()
            .parse()
            .map_err(|_| ShadeError::InvalidThreshold(token.to_owned()))?;
        Ok(Some(ThresholdPolicy {
            mode,
            value,
            is_min_max: false,
        }))
    }

    /// Descriptor for this configuration; [`FeatureColour::parse`] reads
    /// it back to an equal configuration.
    #[must_use]
    pub fn to_descriptor(&self) -> String {
        if let ColourBy::Simple(colour) = self.colour_by() {
            return colour.to_hex();
        }
        let mut out = match (self.attribute(), self.colour_by()) {
            (Some(name), _) => format!("{ATTRIBUTE}{BAR}{name}"),
            (None, ColourBy::Label) => LABEL.to_owned(),
            (None, _) => SCORE.to_owned(),
        };
        if self.is_graduated() {
            let range = self.range();
            out.push(BAR);
            out.push_str(&range.min_colour.to_hex());
            out.push(BAR);
            out.push_str(&range.max_colour.to_hex());
            out.push(BAR);
            out.push_str(self.no_value().tag());
            out.push(BAR);
            if !self.is_auto_scaled() {
                out.push_str(ABSOLUTE);
                out.push(BAR);
            }
        } else if self.has_threshold() {
            // empty colour fields mark a label colour with a threshold
            out.extend([BAR; 3]);
        }
        if self.has_threshold() || self.is_graduated() {
            out.push_str(&format!(
                "{}{BAR}{}{BAR}",
                format_float(self.min_value()),
                format_float(self.max_value())
            ));
            let threshold = self.threshold();
            let value = format_float(threshold.value);
            match threshold.mode {
                ThresholdMode::Below => {
                    out.push_str(&format!("{BELOW}{BAR}{value}"));
                }
                ThresholdMode::Above => {
                    out.push_str(&format!("{ABOVE}{BAR}{value}"));
                }
                ThresholdMode::None => out.push_str("none"),
            }
        }
        out
    }

    /// Feature file line: `<feature type>\t<descriptor>`.
    #[must_use]
    pub fn to_feature_line(&self, feature_type: &str) -> String {
        format!("{feature_type}\t{}", self.to_descriptor())
    }
}

impl NoValueColour {
    const ALL: [Self; 3] = [Self::Min, Self::Max, Self::None];
}

impl fmt::Display for FeatureColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor())
    }
}

impl FromStr for FeatureColour {
    type Err = ShadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
