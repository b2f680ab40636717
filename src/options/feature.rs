use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShadeError;
use crate::feature::FeatureColour;

/// Per feature type colours, stored as descriptors.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct FeatureOptions {
    /// Feature type to colour descriptor, e.g. `Pfam = "label"`.
    pub colours: BTreeMap<String, String>,
}

impl FeatureOptions {
    /// Store the colour for a feature type.
    pub fn set_colour(&mut self, feature_type: &str, colour: &FeatureColour) {
        let _ = self
            .colours
            .insert(feature_type.to_owned(), colour.to_descriptor());
    }

    /// Parsed colour for one feature type, if configured.
    ///
    /// # Errors
    ///
    /// Returns the descriptor's parse error.
    #[must_use]
    pub fn colour(
        &self,
        feature_type: &str,
    ) -> Option<Result<FeatureColour, ShadeError>> {
        self.colours
            .get(feature_type)
            .map(String::as_str)
            .map(FeatureColour::parse)
    }

    /// Check that every configured descriptor parses.
    ///
    /// # Errors
    ///
    /// The parse error of the first bad descriptor, in feature type order.
    pub fn validate(&self) -> Result<(), ShadeError> {
        self.colours
            .values()
            .try_for_each(|descriptor| FeatureColour::parse(descriptor).map(drop))
    }

    /// Parse every configured colour.
    ///
    /// # Errors
    ///
    /// Fails on the first descriptor that does not parse.
    pub fn parse_all(
        &self,
    ) -> Result<FxHashMap<String, FeatureColour>, ShadeError> {
        self.colours
            .iter()
            .map(|(feature_type, descriptor)| {
                FeatureColour::parse(descriptor)
                    .map(|colour| (feature_type.clone(), colour))
            })
            .collect()
    }
}
