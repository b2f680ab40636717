//! 8-bit RGB colours and the colour helpers shared by every scheme.
//!
//! Colours are stored as bytes because that is what the renderer paints and
//! what the descriptor format writes. Interpolation happens in unit-float
//! space (see [`Rgb::to_unit`] / [`Rgb::from_unit`]) and is rounded back to
//! bytes only at the output boundary.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShadeError;

/// An opaque 8-bit RGB colour.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Pure white; the "not shown" colour.
    pub const WHITE: Self = Self([255, 255, 255]);
    /// Pure black.
    pub const BLACK: Self = Self([0, 0, 0]);
    /// Pure red.
    pub const RED: Self = Self([255, 0, 0]);
    /// Pure green.
    pub const GREEN: Self = Self([0, 255, 0]);
    /// Pure blue.
    pub const BLUE: Self = Self([0, 0, 255]);
    /// Cyan.
    pub const CYAN: Self = Self([0, 255, 255]);
    /// Magenta.
    pub const MAGENTA: Self = Self([255, 0, 255]);
    /// Yellow.
    pub const YELLOW: Self = Self([255, 255, 0]);
    /// Orange.
    pub const ORANGE: Self = Self([255, 200, 0]);
    /// Pink.
    pub const PINK: Self = Self([255, 175, 175]);
    /// Mid gray.
    pub const GRAY: Self = Self([128, 128, 128]);
    /// Light gray.
    pub const LIGHT_GRAY: Self = Self([192, 192, 192]);
    /// Dark gray.
    pub const DARK_GRAY: Self = Self([64, 64, 64]);

    /// Build a colour from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red channel.
    #[must_use]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    #[must_use]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    #[must_use]
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Channels as floats in [0, 1].
    #[must_use]
    pub fn to_unit(self) -> [f32; 3] {
        self.0.map(|c| f32::from(c) / 255.0)
    }

    /// Build from unit-float channels, rounding to the nearest byte.
    /// Out-of-range channels are clamped.
    #[must_use]
    pub fn from_unit(channels: [f32; 3]) -> Self {
        Self(channels.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8))
    }

    /// Lowercase six-digit hex code without a leading `#`, e.g. `ff0000`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }

    /// Parse a colour token: a hex code, a colour name (`red`, `lightgray`,
    /// ...) or an `r,g,b` triplet. Returns `None` if none of these match.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if let Ok(value) = i32::from_str_radix(token, 16) {
            let [_, r, g, b] = value.to_be_bytes();
            return Some(Self([r, g, b]));
        }
        if let Some(named) = Self::from_name(token) {
            return Some(named);
        }
        let mut parts = token.split(',');
        let (Some(r), Some(g), Some(b), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        Some(Self([
            r.trim().parse().ok()?,
            g.trim().parse().ok()?,
            b.trim().parse().ok()?,
        ]))
    }

    /// Look up one of the standard colour names (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let colour = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "blue" => Self::BLUE,
            "cyan" => Self::CYAN,
            "darkgray" => Self::DARK_GRAY,
            "gray" => Self::GRAY,
            "green" => Self::GREEN,
            "lightgray" => Self::LIGHT_GRAY,
            "magenta" => Self::MAGENTA,
            "orange" => Self::ORANGE,
            "pink" => Self::PINK,
            "red" => Self::RED,
            "white" => Self::WHITE,
            "yellow" => Self::YELLOW,
            _ => return None,
        };
        Some(colour)
    }

    /// Fade towards white (`factor > 0`) or black (`factor < 0`).
    ///
    /// A factor of 1 or more gives white, -1 or less gives black, 0 leaves
    /// the colour unchanged. Channels are truncated, not rounded.
    #[must_use]
    pub fn bleach(self, factor: f32) -> Self {
        if factor >= 1.0 {
            return Self::WHITE;
        }
        if factor <= -1.0 {
            return Self::BLACK;
        }
        if factor == 0.0 {
            return self;
        }
        if factor > 0.0 {
            Self(self.0.map(|c| {
                let c = f32::from(c);
                (c + (255.0 - c) * factor) as u8
            }))
        } else {
            let keep = 1.0 + factor;
            Self(self.0.map(|c| (f32::from(c) * keep) as u8))
        }
    }

    /// Deterministic pseudo-random colour for a label.
    ///
    /// The label is split into thirds and each third seeds one channel, so
    /// the same label always yields the same colour across sessions and
    /// saved files. Channels land in 20..230.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let units: Vec<u16> = label.encode_utf16().collect();
        let len = units.len();
        let third = len / 3;
        let offset = (label_hash(&units) % 10).unsigned_abs() as i32 * 15;

        let channel = |part: &[u16]| -> u8 {
            let seeded = label_hash(part).wrapping_add(offset);
            (seeded.unsigned_abs() % 210 + 20) as u8
        };

        let first_end = third;
        let second_end = (first_end + third).min(len);
        Self([
            channel(&units[..first_end]),
            channel(&units[first_end..second_end]),
            channel(&units[second_end..]),
        ])
    }
}

/// Polynomial string hash over UTF-16 code units (`s[0]*31^(n-1) + ...`).
///
/// Colours generated from labels must stay stable against colours saved by
/// earlier sessions, so the hash is fixed rather than `std::hash`.
fn label_hash(units: &[u16]) -> i32 {
    units
        .iter()
        .fold(0i32, |h, &u| h.wrapping_mul(31).wrapping_add(i32::from(u)))
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ShadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ShadeError::InvalidColour(s.to_owned()))
    }
}
