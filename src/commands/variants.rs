//! Variants command implementation

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::args::StepArgs;
use crate::commands::list_variants;
use crate::gradle::GradleProject;
use crate::utils::terminal::print_debug;
use crate::variant::filter_variants;

/// List the variants the module and variant inputs select
#[derive(Args, Debug)]
pub struct VariantsCommand {
    #[command(flatten)]
    pub step: StepArgs,

    /// Print the selection as JSON
    #[arg(long)]
    pub json: bool,
}

impl VariantsCommand {
    /// Execute the variants command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let inputs = self.step.resolve()?;
        let project = GradleProject::open(&inputs.project_location)?;

        let variants = list_variants(&project, inputs.build_type)?;
        let filtered = filter_variants(&inputs.module, &inputs.variant, &variants)?;
        print_debug(&format!(
            "Selected {} of {} variant(s)",
            filtered.variant_count(),
            variants.variant_count()
        ));

        if self.json {
            let json = serde_json::to_string_pretty(&filtered).context("Failed to serialize variants")?;
            println!("{}", json);
        } else {
            print!("{}", filtered);
        }

        Ok(())
    }
}
