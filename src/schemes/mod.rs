//! Residue colour schemes and the registry that names them.
//!
//! Every scheme answers one question, "what colour is this residue cell?",
//! through the [`ColourScheme`] trait. Shared arithmetic (gradients,
//! thresholds) lives in [`crate::shading`] and is composed into the schemes
//! that need it.
//!
//! There is no process-wide scheme list: a [`SchemeRegistry`] is built at
//! startup and handed to whatever needs to enumerate or look up schemes.

mod annotation;
mod clustalx;
mod pid;
mod user;

use std::fmt;

pub use annotation::{
    AnnotationColourGradient, HELIX_COLOUR, SHEET_COLOUR, STEM_COLOUR,
};
pub use clustalx::ClustalxColourScheme;
pub use pid::{shade_by_identity, ConsensusBand, PidColourScheme};
use rustc_hash::FxHashMap;
pub use user::UserColourScheme;

use crate::colour::Rgb;
use crate::consensus::Consensus;

/// Everything a scheme may consult to colour one residue cell.
#[derive(Debug, Clone, Copy)]
pub struct ResidueContext<'a> {
    /// Residue character as it appears in the alignment.
    pub residue: char,
    /// Aligned column.
    pub column: usize,
    /// Name of the sequence the residue belongs to.
    pub sequence: Option<&'a str>,
    /// Column consensus, when one has been computed.
    pub consensus: Option<Consensus<'a>>,
}

impl<'a> ResidueContext<'a> {
    /// Context with no sequence or consensus attached.
    #[must_use]
    pub const fn new(residue: char, column: usize) -> Self {
        Self {
            residue,
            column,
            sequence: None,
            consensus: None,
        }
    }

    /// Builder-style sequence name.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: &'a str) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Builder-style consensus.
    #[must_use]
    pub const fn with_consensus(mut self, consensus: Consensus<'a>) -> Self {
        self.consensus = Some(consensus);
        self
    }
}

/// A named residue colouring.
pub trait ColourScheme: fmt::Debug + Send + Sync {
    /// Display name, unique within a registry (compared case-insensitively).
    fn name(&self) -> &str;

    /// Colour for one residue cell.
    fn find_colour(&self, cell: &ResidueContext<'_>) -> Rgb;

    /// Whether the colour depends only on the residue symbol.
    fn is_simple(&self) -> bool {
        false
    }

    /// Recompute any per-alignment state after the alignment changed.
    fn alignment_changed(&mut self, _sequences: &[&str]) {}
}

/// Named collection of colour schemes, in registration order.
#[derive(Debug, Default)]
pub struct SchemeRegistry {
    schemes: Vec<Box<dyn ColourScheme>>,
    by_name: FxHashMap<String, usize>,
}

impl SchemeRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in schemes (Clustal and % Identity).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let _ = registry.register(Box::new(ClustalxColourScheme::default()));
        let _ = registry.register(Box::new(PidColourScheme::default()));
        registry
    }

    /// Add a scheme, replacing (and returning) any scheme of the same name.
    pub fn register(
        &mut self,
        scheme: Box<dyn ColourScheme>,
    ) -> Option<Box<dyn ColourScheme>> {
        let key = scheme.name().to_lowercase();
        if let Some(&index) = self.by_name.get(&key) {
            log::debug!("replacing colour scheme '{}'", scheme.name());
            return Some(std::mem::replace(&mut self.schemes[index], scheme));
        }
        log::debug!("registering colour scheme '{}'", scheme.name());
        let _ = self.by_name.insert(key, self.schemes.len());
        self.schemes.push(scheme);
        None
    }

    /// Remove a scheme by name.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn ColourScheme>> {
        let index = self.by_name.remove(&name.to_lowercase())?;
        let removed = self.schemes.remove(index);
        for slot in self.by_name.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Look up a scheme by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ColourScheme> {
        let index = *self.by_name.get(&name.to_lowercase())?;
        self.schemes.get(index).map(Box::as_ref)
    }

    /// Mutable lookup, e.g. to refresh a scheme after an alignment edit.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn ColourScheme> {
        let index = *self.by_name.get(&name.to_lowercase())?;
        match self.schemes.get_mut(index) {
            Some(scheme) => Some(scheme.as_mut()),
            None => None,
        }
    }

    /// Whether a scheme of this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Scheme names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(|s| s.name())
    }

    /// Tell every scheme the alignment changed.
    pub fn alignment_changed(&mut self, sequences: &[&str]) {
        for scheme in &mut self.schemes {
            scheme.alignment_changed(sequences);
        }
    }

    /// Number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_listed_in_order() {
        let registry = SchemeRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["Clustal", "% Identity"]);
        assert!(registry.contains("% identity"));
        assert!(registry.get("CLUSTAL").is_some());
        assert!(registry.get("Zappo").is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = SchemeRegistry::new();
        let first = UserColourScheme::uniform("Mine", Rgb::RED);
        let second = UserColourScheme::uniform("mine", Rgb::BLUE);
        assert!(registry.register(Box::new(first)).is_none());
        let old = registry.register(Box::new(second));
        assert_eq!(old.map(|s| s.name().to_owned()), Some("Mine".to_owned()));
        assert_eq!(registry.len(), 1);
        let cell = ResidueContext::new('A', 0);
        let colour = registry.get("MINE").map(|s| s.find_colour(&cell));
        assert_eq!(colour, Some(Rgb::BLUE));
    }

    #[test]
    fn remove_keeps_lookup_consistent() {
        let mut registry = SchemeRegistry::with_builtins();
        let _ = registry.register(Box::new(UserColourScheme::uniform(
            "Reds",
            Rgb::RED,
        )));
        assert!(registry.remove("clustal").is_some());
        assert!(registry.remove("clustal").is_none());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["% Identity", "Reds"]);
        assert!(registry.get("Reds").is_some());
        assert!(registry.get("% Identity").is_some());
    }

    #[test]
    fn alignment_changed_reaches_schemes() {
        let mut registry = SchemeRegistry::with_builtins();
        registry.alignment_changed(&["GGGG", "GGGG"]);
        let cell = ResidueContext::new('G', 0);
        let clustal = registry.get("Clustal").map(|s| s.find_colour(&cell));
        assert_eq!(clustal, Some(ClustalxColourScheme::ORANGE));
    }
}
