//! Step inputs shared by all commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::{default_patterns, parse_patterns, StepConfig, StepInputs};
use crate::exec::subprocess::split_args;
use crate::gradle::BuildType;
use crate::utils::paths;

/// Default export directory, relative to the project
const DEFAULT_DEPLOY_DIR: &str = "build/deploy";

/// Step inputs, settable by flag or environment variable
#[derive(Args, Debug, Clone, Default)]
pub struct StepArgs {
    /// Root directory of the Android project
    #[arg(long, env = "PROJECT_LOCATION", default_value = ".")]
    pub project_location: PathBuf,

    /// Configuration file [default: <project>/android-build.toml]
    #[arg(long, env = "STEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Module to build, all modules when empty
    #[arg(long, env = "MODULE")]
    pub module: Option<String>,

    /// Variants to build, separated by a literal \n
    ///
    /// Example: --variant 'DemoDebug\nDemoRelease'
    #[arg(long, env = "VARIANT")]
    pub variant: Option<String>,

    /// Package type to build
    #[arg(long, value_enum, env = "BUILD_TYPE")]
    pub build_type: Option<BuildType>,

    /// Artifact glob patterns, one per line
    #[arg(long, env = "APP_PATH_PATTERN")]
    pub app_path_pattern: Option<String>,

    /// Extra arguments passed to Gradle
    #[arg(long, env = "ARGUMENTS", allow_hyphen_values = true)]
    pub arguments: Option<String>,

    /// Directory the artifacts are copied to [default: <project>/build/deploy]
    #[arg(long, env = "DEPLOY_DIR")]
    pub deploy_dir: Option<PathBuf>,

    /// Report outputs regardless of their modification time
    #[arg(long, env = "INCLUDE_ALL")]
    pub include_all: bool,
}

impl StepArgs {
    /// Merge flags, environment and android-build.toml into the final inputs
    pub fn resolve(&self) -> Result<StepInputs> {
        let project_location = paths::absolute(&self.project_location)?;
        let config = match &self.config {
            Some(path) => StepConfig::load_from_path(paths::absolute(path)?)?,
            None => StepConfig::load_from_dir(&project_location)?,
        };

        // A deploy dir given on the command line is relative to where we run
        let mut args = self.clone();
        if let Some(dir) = &self.deploy_dir {
            args.deploy_dir = Some(paths::absolute(dir)?);
        }
        Ok(args.merge(project_location, config))
    }

    fn merge(&self, project_location: PathBuf, config: StepConfig) -> StepInputs {
        let step = config.step;

        let explicit_build_type = self.build_type.or(step.build_type);

        let mut app_path_patterns = match &self.app_path_pattern {
            Some(input) => parse_patterns(input),
            None => step
                .app_path_pattern
                .unwrap_or_default()
                .into_iter()
                .flat_map(|p| parse_patterns(&p))
                .collect(),
        };
        if app_path_patterns.is_empty() {
            app_path_patterns = default_patterns(explicit_build_type);
        }

        let arguments = self
            .arguments
            .as_deref()
            .or(step.arguments.as_deref())
            .map(split_args)
            .unwrap_or_default();

        let deploy_dir = match (&self.deploy_dir, step.deploy_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => paths::resolve(&project_location, &dir),
            (None, None) => project_location.join(DEFAULT_DEPLOY_DIR),
        };

        StepInputs {
            module: self
                .module
                .clone()
                .or(step.module)
                .unwrap_or_default()
                .trim()
                .to_string(),
            variant: self.variant.clone().or(step.variant).unwrap_or_default(),
            build_type: explicit_build_type.unwrap_or_default(),
            app_path_patterns,
            arguments,
            deploy_dir: paths::resolve(&project_location, &deploy_dir),
            include_all: self.include_all || step.include_all.unwrap_or(false),
            project_location,
        }
    }
}
