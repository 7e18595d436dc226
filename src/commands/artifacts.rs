//! Artifacts command implementation
//!
//! Collects and exports outputs of a build that already ran, for pipelines
//! that invoke Gradle themselves.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

use crate::artifact::{get_artifacts, GlobDiscoverer};
use crate::commands::args::StepArgs;
use crate::commands::{export_and_report, print_inputs};
use crate::utils::terminal::{print_debug, print_warning};
use crate::variant::Variants;

/// Collect and export build outputs without building
#[derive(Args, Debug)]
pub struct ArtifactsCommand {
    #[command(flatten)]
    pub step: StepArgs,

    /// Only report outputs modified at or after this time (RFC 3339)
    ///
    /// When nothing newer exists, all matching outputs are reported.
    #[arg(long, env = "BUILD_START_TIME")]
    pub since: Option<DateTime<Utc>>,

    /// Write a JSON summary of the exported files
    #[arg(long, env = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

impl ArtifactsCommand {
    /// Execute the artifacts command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let inputs = self.step.resolve()?;
        print_inputs(&inputs);

        let start_time = match self.since {
            Some(since) => {
                print_debug(&format!("Searching outputs newer than {}", since.to_rfc3339()));
                since
            }
            None => {
                print_warning("No --since given, reporting every matching output");
                DateTime::<Utc>::MIN_UTC
            }
        };

        let discoverer = GlobDiscoverer::new(&inputs.project_location).excluding(&inputs.deploy_dir);
        let artifacts = get_artifacts(
            &discoverer,
            start_time,
            &inputs.app_path_patterns,
            inputs.include_all,
        )?;

        export_and_report(
            &artifacts,
            &inputs,
            Variants::new(),
            self.output_file.as_deref(),
        )
    }
}
