//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{artifacts::ArtifactsCommand, build::BuildCommand, variants::VariantsCommand};
use crate::utils::terminal;

/// Android build step
///
/// Builds the selected Gradle module variants and exports the APK/AAB files
/// they produce. Every input can also be set through its environment variable.
#[derive(Parser, Debug)]
#[command(name = "android-build")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the selected variants and export their outputs
    Build(BuildCommand),

    /// List the variants selected by the module and variant inputs
    Variants(VariantsCommand),

    /// Collect and export outputs of an earlier build
    Artifacts(ArtifactsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        terminal::set_verbose(self.verbose);

        match self.command {
            Commands::Build(cmd) => cmd.execute(self.verbose),
            Commands::Variants(cmd) => cmd.execute(self.verbose),
            Commands::Artifacts(cmd) => cmd.execute(self.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_variant_keeps_literal_separator() {
        let cli = Cli::try_parse_from([
            "android-build",
            "variants",
            "--module",
            "app",
            "--variant",
            r"DemoDebug\nDemoRelease",
            "--build-type",
            "aab",
        ])
        .unwrap();

        match cli.command {
            Commands::Variants(cmd) => {
                assert_eq!(cmd.step.module.as_deref(), Some("app"));
                assert_eq!(cmd.step.variant.as_deref(), Some(r"DemoDebug\nDemoRelease"));
                assert_eq!(cmd.step.build_type, Some(crate::gradle::BuildType::Aab));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_artifacts_since() {
        let cli = Cli::try_parse_from([
            "android-build",
            "artifacts",
            "--since",
            "2021-08-18T08:00:00Z",
            "--include-all",
        ])
        .unwrap();

        match cli.command {
            Commands::Artifacts(cmd) => {
                assert_eq!(
                    cmd.since.map(|t| t.to_rfc3339()).as_deref(),
                    Some("2021-08-18T08:00:00+00:00")
                );
                assert!(cmd.step.include_all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
