//! Shading options with TOML preset support.
//!
//! Annotation colouring, identity/conservation shading and per feature type
//! colours live here. Options serialize to/from TOML so a set of shading
//! choices can be saved as a named preset.

mod annotation;
mod feature;
mod identity;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use annotation::AnnotationOptions;
pub use feature::FeatureOptions;
pub use identity::IdentityOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShadeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[identity]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Annotation gradient settings.
    pub annotation: AnnotationOptions,
    /// Identity threshold and conservation settings.
    pub identity: IdentityOptions,
    /// Feature colour descriptors.
    #[schemars(skip)]
    pub feature: FeatureOptions,
}

impl Options {
    /// File extension of preset files.
    pub const PRESET_EXTENSION: &'static str = "toml";

    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults and every
    /// feature colour descriptor must parse.
    ///
    /// # Errors
    ///
    /// [`ShadeError::OptionsParse`] for malformed TOML, or the descriptor
    /// error of the first feature colour that does not parse.
    pub fn from_toml(text: &str) -> Result<Self, ShadeError> {
        let options: Self = toml::from_str(text)?;
        options.feature.validate()?;
        Ok(options)
    }

    /// Pretty-printed TOML for these options.
    ///
    /// # Errors
    ///
    /// [`ShadeError::OptionsParse`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ShadeError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load options from a TOML file; see [`Self::from_toml`].
    ///
    /// # Errors
    ///
    /// [`ShadeError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ShadeError> {
        let options = Self::from_toml(&std::fs::read_to_string(path)?)?;
        log::debug!("loaded shading options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`ShadeError::OptionsParse`] if serialization fails and
    /// [`ShadeError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ShadeError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::debug!("saved shading options to {}", path.display());
        Ok(())
    }

    /// File holding the preset `name` in `dir`.
    #[must_use]
    pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{}", Self::PRESET_EXTENSION))
    }

    /// Load the preset `name` from `dir`.
    ///
    /// # Errors
    ///
    /// [`ShadeError::UnknownPreset`] if there is no such preset, otherwise
    /// as [`Self::load`].
    pub fn load_preset(dir: &Path, name: &str) -> Result<Self, ShadeError> {
        Self::load(&Self::preset_path(dir, name)).map_err(|e| match e {
            ShadeError::Io(io) if io.kind() == ErrorKind::NotFound => {
                ShadeError::UnknownPreset(name.to_owned())
            }
            other => other,
        })
    }

    /// Save as the preset `name` in `dir`, returning the file written.
    ///
    /// # Errors
    ///
    /// As [`Self::save`].
    pub fn save_preset(
        &self,
        dir: &Path,
        name: &str,
    ) -> Result<PathBuf, ShadeError> {
        let path = Self::preset_path(dir, name);
        self.save(&path)?;
        Ok(path)
    }

    /// Names of the presets in `dir`, sorted. A missing directory has no
    /// presets.
    ///
    /// # Errors
    ///
    /// [`ShadeError::Io`] if the directory exists but cannot be read.
    pub fn list_presets(dir: &Path) -> Result<Vec<String>, ShadeError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == Self::PRESET_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
