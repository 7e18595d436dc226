//! Utility variant detection
//!
//! Gradle's `tasks --all` listing contains tasks such as
//! `assembleDemoDebugUnitTest` or `bundleDemoDebugClasses` next to the real
//! `assembleDemoDebug`. Their suffixes look like variants but cannot be built
//! into an APK or AAB, so they are hidden when no explicit variant is asked for.

/// Markers Gradle appends to a base variant name for derived tasks
pub const DEFAULT_UTILITY_MARKERS: &[&str] = &[
    "Classes",
    "Resources",
    "AndroidTest",
    "UnitTest",
    "TestFixtures",
    "JavaRes",
];

/// Decides whether a variant name is a derived utility name
pub trait UtilityVariantPredicate {
    /// `siblings` is the full variant list of the module `variant` belongs to
    fn is_utility(&self, variant: &str, siblings: &[String]) -> bool;
}

/// Flags a variant when a shorter sibling is its prefix and the leftover
/// suffix contains one of the configured markers
#[derive(Debug, Clone)]
pub struct MarkerSuffixPredicate {
    markers: Vec<String>,
}

impl MarkerSuffixPredicate {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for MarkerSuffixPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_UTILITY_MARKERS.iter().copied())
    }
}

impl UtilityVariantPredicate for MarkerSuffixPredicate {
    fn is_utility(&self, variant: &str, siblings: &[String]) -> bool {
        siblings.iter().any(|base| {
            base.len() < variant.len()
                && variant.starts_with(base.as_str())
                && self
                    .markers
                    .iter()
                    .any(|marker| variant[base.len()..].contains(marker.as_str()))
        })
    }
}

/// Keep only the variants the predicate does not flag, in original order
pub fn strip_utility_variants(
    variants: &[String],
    predicate: &dyn UtilityVariantPredicate,
) -> Vec<String> {
    variants
        .iter()
        .filter(|v| !predicate.is_utility(v, variants))
        .cloned()
        .collect()
}
