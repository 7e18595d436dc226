//! Build command implementation

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use crate::artifact::{get_artifacts, GlobDiscoverer};
use crate::commands::args::StepArgs;
use crate::commands::{export_and_report, list_variants, print_inputs};
use crate::gradle::{build_tasks, GradleProject};
use crate::utils::terminal::{print_debug, print_info, print_section};
use crate::variant::filter_variants;

/// Build the selected variants and export their outputs
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub step: StepArgs,

    /// Write a JSON summary of the exported files
    #[arg(long, env = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let inputs = self.step.resolve()?;
        print_inputs(&inputs);

        let project = GradleProject::open(&inputs.project_location)?;

        print_section("Variants");
        let variants = list_variants(&project, inputs.build_type)?;
        let filtered = filter_variants(&inputs.module, &inputs.variant, &variants)?;
        print!("{}", filtered);

        let tasks = build_tasks(&filtered, inputs.build_type);

        print_section("Build");
        print_info(&format!("Running {}", tasks.join(" ")));
        let start_time = Utc::now();
        let duration = project.run_tasks(&tasks, &inputs.arguments)?;
        print_debug(&format!("Gradle finished in {:.1}s", duration.as_secs_f64()));

        let discoverer = GlobDiscoverer::new(project.location()).excluding(&inputs.deploy_dir);
        let artifacts = get_artifacts(
            &discoverer,
            start_time,
            &inputs.app_path_patterns,
            inputs.include_all,
        )?;

        export_and_report(&artifacts, &inputs, filtered, self.output_file.as_deref())
    }
}
