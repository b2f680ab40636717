//! Crate-level error types.

use std::fmt;

/// Errors produced by the alnshade crate.
///
/// Colour arithmetic never fails; these cover parsing of colour descriptors
/// and loading/saving of option presets.
#[derive(Debug)]
pub enum ShadeError {
    /// A colour token was neither hex, a known colour name, nor `r,g,b`.
    InvalidColour(String),
    /// The minimum value of a graduated colour could not be parsed.
    InvalidMinimum(String),
    /// The maximum value of a graduated colour could not be parsed.
    InvalidMaximum(String),
    /// The threshold value of a graduated colour could not be parsed.
    InvalidThreshold(String),
    /// A descriptor ended before a required field.
    MissingToken(&'static str),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// No preset file with this name.
    UnknownPreset(String),
}

impl fmt::Display for ShadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColour(token) => {
                write!(f, "Invalid colour descriptor: {token}")
            }
            Self::InvalidMinimum(token) => write!(
                f,
                "Couldn't parse the minimum value for graduated colour \
                 ('{token}')"
            ),
            Self::InvalidMaximum(token) => write!(
                f,
                "Couldn't parse the maximum value for graduated colour \
                 ({token})"
            ),
            Self::InvalidThreshold(token) => {
                write!(f, "Couldn't parse threshold value as a float: ({token})")
            }
            Self::MissingToken(what) => {
                write!(f, "colour descriptor ended early, expected {what}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UnknownPreset(name) => {
                write!(f, "no shading preset named '{name}'")
            }
        }
    }
}

impl std::error::Error for ShadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShadeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ShadeError {
    fn from(e: toml::de::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}

impl From<toml::ser::Error> for ShadeError {
    fn from(e: toml::ser::Error) -> Self {
        Self::OptionsParse(e.to_string())
    }
}
