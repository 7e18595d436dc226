//! android-build - Gradle build step for Android CI pipelines
//!
//! Builds the Gradle module variants selected by the step inputs and exports
//! the APK/AAB files the build produced.
//!
//! ## Architecture
//!
//! ```text
//! CLI → commands/ → gradle/ (list tasks, run build)
//!                 → variant/ (module/variant selection)
//!                 → artifact/ (discovery, export)
//! ```

mod artifact;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod gradle;
mod utils;
mod variant;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::StepError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<StepError>() {
                Some(step_error) => step_error.display_with_hints(),
                None => print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
