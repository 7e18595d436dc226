//! Gradle module/variant model and filtering
//!
//! ## Modules
//!
//! - `filter` - Matching of the module and variant inputs against the project
//! - `utility` - Detection of derived, non-buildable variant names

pub mod filter;
pub mod utility;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use filter::filter_variants;

/// Mapping from Gradle module name to its variant names
///
/// Modules iterate in name order so every listing derived from this map is
/// deterministic. Variant order within a module is the order Gradle reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variants(BTreeMap<String, Vec<String>>);

impl Variants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant list of a module, replacing any previous one
    pub fn insert(&mut self, module: impl Into<String>, variants: Vec<String>) {
        self.0.insert(module.into(), variants);
    }

    /// Append a variant to a module, creating the module if needed
    ///
    /// Returns false when the module already had that variant.
    pub fn push(&mut self, module: &str, variant: impl Into<String>) -> bool {
        let variant = variant.into();
        let list = self.0.entry(module.to_string()).or_default();
        if list.contains(&variant) {
            return false;
        }
        list.push(variant);
        true
    }

    pub fn contains_module(&self, module: &str) -> bool {
        self.0.contains_key(module)
    }

    pub fn module_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of (module, variant) pairs
    pub fn variant_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Variants {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Variants {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Variants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (module, variants) in &self.0 {
            writeln!(f, "{}:", module)?;
            for variant in variants {
                writeln!(f, "  - {}", variant)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn variants_of(entries: &[(&str, &[&str])]) -> Variants {
    entries
        .iter()
        .map(|(module, list)| {
            (
                module.to_string(),
                list.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}
