//! Module and variant filtering
//!
//! Turns the `MODULE` and `VARIANT` inputs into the subset of the project's
//! variants that should be built.

use std::collections::HashSet;

use crate::error::StepError;
use crate::variant::utility::{strip_utility_variants, MarkerSuffixPredicate, UtilityVariantPredicate};
use crate::variant::Variants;

/// Separator between variant names in the `VARIANT` input
///
/// This is the two characters `\` and `n`, not a line break: CI hosts pass
/// multi-line inputs through with the escape left in place.
pub const VARIANT_SEPARATOR: &str = "\\n";

/// Split a variant input into the requested names
///
/// An empty input yields a single empty name.
pub fn separate_variants(variants_as_one_line: &str) -> Vec<String> {
    variants_as_one_line
        .split(VARIANT_SEPARATOR)
        .map(|v| v.trim().to_string())
        .collect()
}

/// Filter `variants` by module name and requested variant names
///
/// Empty filters match everything. Without a variant filter, utility
/// variants are dropped using [`MarkerSuffixPredicate`]. A non-empty variant
/// filter that yields a blank name (`"  "`, `variant1\n`) fails, as no
/// variant is named blank.
///
/// Modules with no variant are never part of the result, so
/// `filter_variants("", "", m)` omits the empty modules of `m`.
pub fn filter_variants(
    module_filter: &str,
    variant_filter: &str,
    variants: &Variants,
) -> Result<Variants, StepError> {
    filter_variants_with(
        module_filter,
        variant_filter,
        variants,
        &MarkerSuffixPredicate::default(),
    )
}

/// [`filter_variants`] with a custom utility variant predicate
pub fn filter_variants_with(
    module_filter: &str,
    variant_filter: &str,
    variants: &Variants,
    predicate: &dyn UtilityVariantPredicate,
) -> Result<Variants, StepError> {
    let requested: Vec<String> = if variant_filter.is_empty() {
        Vec::new()
    } else {
        let mut seen = HashSet::new();
        separate_variants(variant_filter)
            .into_iter()
            .filter(|v| seen.insert(v.clone()))
            .collect()
    };

    if !module_filter.is_empty() && !variants.contains_module(module_filter) {
        return Err(StepError::module_not_found(
            module_filter,
            variants.module_names(),
        ));
    }

    let in_scope = |module: &str| module_filter.is_empty() || module == module_filter;

    let mut filtered = Variants::new();
    let mut matched: HashSet<&str> = HashSet::new();

    for (module, module_variants) in variants {
        if !in_scope(module) {
            continue;
        }

        let kept: Vec<String> = if requested.is_empty() {
            strip_utility_variants(module_variants, predicate)
        } else {
            module_variants
                .iter()
                .filter(|v| requested.contains(v))
                .cloned()
                .collect()
        };

        if kept.is_empty() {
            continue;
        }

        for variant in module_variants.iter().filter(|v| kept.contains(v)) {
            matched.insert(variant.as_str());
        }
        filtered.insert(module.clone(), kept);
    }

    let unmatched: Vec<String> = requested
        .iter()
        .filter(|r| !matched.contains(r.as_str()))
        .cloned()
        .collect();

    if filtered.is_empty() || !unmatched.is_empty() {
        let mut available: Vec<String> = Vec::new();
        for (module, module_variants) in variants {
            if !in_scope(module) {
                continue;
            }
            for variant in strip_utility_variants(module_variants, predicate) {
                if !available.contains(&variant) {
                    available.push(variant);
                }
            }
        }

        let module = (!module_filter.is_empty()).then(|| module_filter.to_string());
        return Err(StepError::variants_not_found(module, unmatched, available));
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::variants_of;

    fn project() -> Variants {
        variants_of(&[
            (
                "module1",
                &["variant1", "variant2", "variant3", "variant4", "variant5", "shared", "shared2"],
            ),
            (
                "module2",
                &["2variant1", "2variant2", "shared", "2variant3", "2variant4", "2variant5", "shared2"],
            ),
        ])
    }

    #[test]
    fn test_exact_module_and_variant() {
        let variants = project();

        let filtered = filter_variants("module1", "variant3", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant3"])]));

        assert!(filter_variants("module1", "variant100", &variants).is_err());
        assert!(filter_variants("module100", "variant100", &variants).is_err());
        assert!(filter_variants("module100", "variant1", &variants).is_err());
    }

    #[test]
    fn test_exact_module() {
        let variants = project();

        let filtered = filter_variants("module1", "", &variants).unwrap();
        assert_eq!(
            filtered,
            variants_of(&[(
                "module1",
                &["variant1", "variant2", "variant3", "variant4", "variant5", "shared", "shared2"],
            )])
        );

        assert!(filter_variants("module3", "", &variants).is_err());
    }

    #[test]
    fn test_exact_variant() {
        let variants = project();

        let filtered = filter_variants("", "variant2", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant2"])]));

        let filtered = filter_variants("", "shared", &variants).unwrap();
        assert_eq!(
            filtered,
            variants_of(&[("module1", &["shared"]), ("module2", &["shared"])])
        );
    }

    #[test]
    fn test_no_filters_returns_copy() {
        let variants = project();

        let filtered = filter_variants("", "", &variants).unwrap();
        assert_eq!(filtered, variants);
        // Input is left as it was
        assert_eq!(variants, project());
    }

    #[test]
    fn test_no_overlapping_variants() {
        let variants = variants_of(&[("module1", &["variant1", "variant12"])]);

        let filtered = filter_variants("module1", "variant1", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant1"])]));
    }

    #[test]
    fn test_module_and_multiple_variants() {
        let variants = project();

        let filtered = filter_variants("module1", r"variant1\nvariant2", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant1", "variant2"])]));
    }

    #[test]
    fn test_multiple_variants_keep_module_order() {
        let variants = project();

        let filtered = filter_variants("", r"shared2\nshared", &variants).unwrap();
        assert_eq!(
            filtered,
            variants_of(&[
                ("module1", &["shared", "shared2"]),
                ("module2", &["shared", "shared2"]),
            ])
        );
    }

    #[test]
    fn test_utility_variants_filtered_out() {
        let variants = variants_of(&[(
            "module1",
            &[
                "DemoDebug",
                "DemoDebugAndroidTestClasses",
                "DemoDebugAndroidTestResources",
                "DemoDebugClasses",
                "DemoDebugResources",
                "DemoDebugUnitTestClasses",
                "DemoRelease",
                "DemoReleaseClasses",
                "DemoReleaseResources",
                "DemoReleaseUnitTestClasses",
            ],
        )]);

        let filtered = filter_variants("module1", "", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["DemoDebug", "DemoRelease"])]));
    }

    #[test]
    fn test_explicit_utility_variant_is_honored() {
        let variants = variants_of(&[("module1", &["DemoDebug", "DemoDebugClasses", "DemoRelease"])]);

        let filtered = filter_variants("", "DemoDebugClasses", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["DemoDebugClasses"])]));
    }

    #[test]
    fn test_missing_variant_fails() {
        let variants = project();

        assert!(filter_variants("module1", "not-existings-variant", &variants).is_err());
        assert!(filter_variants("", "not-existings-variant", &variants).is_err());
        assert!(filter_variants("module1", r"variant1\nnot-existings-variant", &variants).is_err());
        assert!(filter_variants("", r"variant2\nnot-existings-variant", &variants).is_err());
    }

    #[test]
    fn test_variant_of_other_module_fails() {
        let variants = project();

        // 2variant1 exists, but only outside the selected module
        let err = filter_variants("module1", "2variant1", &variants).unwrap_err();
        match err {
            StepError::NoMatch { module, unmatched, .. } => {
                assert_eq!(module.as_deref(), Some("module1"));
                assert_eq!(unmatched, vec!["2variant1"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_names_unmatched_values() {
        let variants = project();

        let err = filter_variants("", r"variant2\ntypo1\ntypo2", &variants).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("typo1"));
        assert!(message.contains("typo2"));
        assert!(!message.contains("'variant2'"));

        let err = filter_variants("module100", "", &variants).unwrap_err();
        assert!(err.to_string().contains("module100"));
    }

    #[test]
    fn test_empty_module_fails() {
        let variants = variants_of(&[("module1", &[])]);

        assert!(filter_variants("module1", "", &variants).is_err());
        assert!(filter_variants("", "", &variants).is_err());
    }

    #[test]
    fn test_blank_entries_fail() {
        let variants = variants_of(&[("module1", &["variant1", "variant2"])]);

        for filter in [r"\n", "  ", r"variant1\n", r"variant1\n\n variant2 "] {
            let err = filter_variants("", filter, &variants).unwrap_err();
            match err {
                StepError::NoMatch { unmatched, .. } => assert_eq!(unmatched, vec![String::new()]),
                other => panic!("unexpected error for {:?}: {:?}", filter, other),
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let variants = project();

        let filtered = filter_variants("", r" variant1 \nvariant2", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant1", "variant2"])]));
    }

    #[test]
    fn test_empty_modules_dropped_without_filters() {
        let variants = variants_of(&[("empty", &[]), ("module1", &["variant1"])]);

        let filtered = filter_variants("", "", &variants).unwrap();
        assert_eq!(filtered, variants_of(&[("module1", &["variant1"])]));

        assert!(filter_variants("empty", "", &variants).is_err());
    }

    #[test]
    fn test_variant_separation() {
        let cases: &[(&str, &[&str])] = &[
            (r"variant1\nvariant2", &["variant1", "variant2"]),
            ("variant1", &["variant1"]),
            ("", &[""]),
        ];

        for (input, want) in cases {
            assert_eq!(separate_variants(input), *want, "input: {input:?}");
        }
    }

    #[test]
    fn test_real_newline_is_not_a_separator() {
        assert_eq!(separate_variants("a\nb"), vec!["a\nb"]);
    }
}
