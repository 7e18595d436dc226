//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod args;
pub mod artifacts;
pub mod build;
pub mod variants;

use std::path::Path;

use anyhow::{Context, Result};

use crate::artifact::{export_artifacts, Artifact, ExportSummary};
use crate::config::StepInputs;
use crate::error::StepError;
use crate::gradle::{BuildType, GradleProject};
use crate::utils::terminal::{create_spinner, print_debug, print_info, print_section, print_success};
use crate::variant::Variants;

/// List the project's variants, with a spinner while Gradle runs
pub(crate) fn list_variants(project: &GradleProject, build_type: BuildType) -> Result<Variants, StepError> {
    print_debug(&format!(
        "Listing tasks with {} in {}",
        project.gradle().display(),
        project.location().display()
    ));

    let spinner = create_spinner("Fetching variants from Gradle...");
    let result = project.variants(build_type);
    spinner.finish_and_clear();

    let variants = result?;
    print_debug(&format!(
        "Found {} variant(s) in {} module(s)",
        variants.variant_count(),
        variants.len()
    ));
    Ok(variants)
}

/// Print the inputs the run works with
pub(crate) fn print_inputs(inputs: &StepInputs) {
    print_section("Configuration");
    let or_all = |value: &str| if value.is_empty() { "<all>".to_string() } else { value.to_string() };
    println!("  Project location: {}", inputs.project_location.display());
    println!("  Module: {}", or_all(&inputs.module));
    println!("  Variant: {}", or_all(&inputs.variant));
    println!("  Build type: {}", inputs.build_type);
    println!("  App path patterns: {}", inputs.app_path_patterns.join(", "));
    if !inputs.arguments.is_empty() {
        println!("  Gradle arguments: {}", inputs.arguments.join(" "));
    }
    println!("  Deploy directory: {}", inputs.deploy_dir.display());
    println!("  Include all outputs: {}", inputs.include_all);
}

/// Copy the artifacts to the deploy directory and report them
///
/// Finding no artifact is an error: a build step that produced nothing
/// should fail the pipeline.
pub(crate) fn export_and_report(
    artifacts: &[Artifact],
    inputs: &StepInputs,
    variants: Variants,
    output_file: Option<&Path>,
) -> Result<()> {
    if artifacts.is_empty() {
        anyhow::bail!(
            "No artifacts found with patterns: {}",
            inputs.app_path_patterns.join(", ")
        );
    }

    print_section("Artifacts");
    for artifact in artifacts {
        print_debug(&format!("Found {}", artifact.path.display()));
    }

    let exported = export_artifacts(artifacts, &inputs.deploy_dir)
        .context("Failed to export artifacts")?;
    for path in &exported {
        print_info(&format!("Exported {}", path.display()));
    }

    if let Some(output_file) = output_file {
        ExportSummary::new(&exported, variants).write_to(output_file)?;
        print_info(&format!("Summary written to {}", output_file.display()));
    }

    print_success(&format!(
        "{} artifact(s) exported to {}",
        exported.len(),
        inputs.deploy_dir.display()
    ));
    Ok(())
}
