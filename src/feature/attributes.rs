use std::fmt;

use rustc_hash::FxHashMap;

/// Path to a feature attribute. Most attributes are top-level (`AF`);
/// structured attributes such as VEP consequences are addressed with a
/// parent key (`CSQ:AF`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeName(Vec<String>);

impl AttributeName {
    /// Parse a display name, splitting on `:`.
    #[must_use]
    pub fn from_display(display: &str) -> Self {
        Self(display.split(':').map(str::to_owned).collect())
    }

    /// Path components, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

/// Value of a feature attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Plain text.
    Text(String),
    /// Keyed sub-attributes.
    Nested(FxHashMap<String, AttributeValue>),
}

/// A scored, described sequence feature, as far as colouring cares.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFeature {
    /// Feature type (`domain`, `Pfam`, `variant`, ...).
    pub feature_type: String,
    /// Free-text description, used when colouring by label.
    pub description: Option<String>,
    /// Score; NaN when the feature has none.
    pub score: f32,
    attributes: FxHashMap<String, AttributeValue>,
}

impl SequenceFeature {
    /// Unscored feature with no description.
    #[must_use]
    pub fn new(feature_type: impl Into<String>) -> Self {
        Self {
            feature_type: feature_type.into(),
            description: None,
            score: f32::NAN,
            attributes: FxHashMap::default(),
        }
    }

    /// Builder-style description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style score.
    #[must_use]
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Builder-style text attribute.
    #[must_use]
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set a top-level text attribute.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let _ = self
            .attributes
            .insert(key.into(), AttributeValue::Text(value.into()));
    }

    /// Set `parent:key`, replacing any text value stored at `parent`.
    pub fn set_nested_attribute(
        &mut self,
        parent: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let slot = self
            .attributes
            .entry(parent.into())
            .or_insert_with(|| AttributeValue::Nested(FxHashMap::default()));
        if !matches!(slot, AttributeValue::Nested(_)) {
            *slot = AttributeValue::Nested(FxHashMap::default());
        }
        if let AttributeValue::Nested(map) = slot {
            let _ = map.insert(key.into(), AttributeValue::Text(value.into()));
        }
    }

    /// Text stored at `name`, if the full path resolves to text.
    #[must_use]
    pub fn value_as_string(&self, name: &AttributeName) -> Option<&str> {
        let (first, rest) = name.parts().split_first()?;
        let mut value = self.attributes.get(first)?;
        for key in rest {
            match value {
                AttributeValue::Nested(map) => value = map.get(key)?,
                AttributeValue::Text(_) => return None,
            }
        }
        match value {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Nested(_) => None,
        }
    }

    /// Numeric value of an attribute; NaN if absent or not a number.
    #[must_use]
    pub fn value_as_score(&self, name: &AttributeName) -> f32 {
        self.value_as_string(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(f32::NAN)
    }
}
