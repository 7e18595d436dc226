//! Step configuration
//!
//! Inputs arrive as flags, environment variables, or `android-build.toml`
//! defaults; [`StepInputs`] is the resolved result the commands work with.

pub mod step_toml;

use std::path::PathBuf;

use crate::gradle::BuildType;

pub use step_toml::StepConfig;

/// Pattern for APK outputs
pub const APK_PATTERN: &str = "*/build/outputs/apk/*.apk";

/// Pattern for App Bundle outputs
pub const AAB_PATTERN: &str = "*/build/outputs/bundle/*.aab";

/// Fully resolved step inputs
#[derive(Debug, Clone, PartialEq)]
pub struct StepInputs {
    /// Absolute path of the Android project root
    pub project_location: PathBuf,
    /// Module filter, empty for all modules
    pub module: String,
    /// Variant filter, empty for all variants
    pub variant: String,
    pub build_type: BuildType,
    /// Artifact glob patterns, in search order
    pub app_path_patterns: Vec<String>,
    /// Extra Gradle arguments
    pub arguments: Vec<String>,
    /// Absolute export directory
    pub deploy_dir: PathBuf,
    pub include_all: bool,
}

/// Split a newline separated pattern input, dropping blank lines
pub fn parse_patterns(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Patterns used when none are configured
///
/// Without a build type both APK and AAB outputs are searched.
pub fn default_patterns(build_type: Option<BuildType>) -> Vec<String> {
    let patterns: &[&str] = match build_type {
        Some(BuildType::Apk) => &[APK_PATTERN],
        Some(BuildType::Aab) => &[AAB_PATTERN],
        None => &[APK_PATTERN, AAB_PATTERN],
    };
    patterns.iter().map(|p| p.to_string()).collect()
}
