//! Gradle project access
//!
//! Lists a project's variants from `gradlew tasks --all` and runs the
//! assemble/bundle tasks for the selected ones.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{hints, StepError};
use crate::exec::subprocess::run_command;
use crate::variant::Variants;

/// Gradle wrapper script name for the current host
pub const WRAPPER_NAME: &str = if cfg!(target_os = "windows") {
    "gradlew.bat"
} else {
    "gradlew"
};

/// Kind of Android package to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// APK via the assemble tasks
    #[default]
    Apk,
    /// Android App Bundle via the bundle tasks
    Aab,
}

impl BuildType {
    /// Prefix of the Gradle task building one variant
    pub fn task_prefix(&self) -> &'static str {
        match self {
            BuildType::Apk => "assemble",
            BuildType::Aab => "bundle",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Apk => write!(f, "apk"),
            BuildType::Aab => write!(f, "aab"),
        }
    }
}

/// Extract module variants from `gradlew tasks --all` output
///
/// Only module tasks (`module:assembleDemoDebug`) count; root project tasks
/// have no module to build. Nested modules keep their full path
/// (`feature:login`).
pub fn parse_variants(task_listing: &str, build_type: BuildType) -> Variants {
    let prefix = build_type.task_prefix();
    let mut variants = Variants::new();

    for line in task_listing.lines() {
        let task_path = match line.split(" - ").next().and_then(|t| t.split_whitespace().next()) {
            Some(task_path) => task_path.trim_start_matches(':'),
            None => continue,
        };

        let Some((module, task)) = task_path.rsplit_once(':') else {
            continue;
        };

        let Some(variant) = task.strip_prefix(prefix) else {
            continue;
        };

        if module.is_empty() || !variant.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }

        variants.push(module, variant);
    }

    variants
}

/// Gradle tasks building every (module, variant) pair
pub fn build_tasks(variants: &Variants, build_type: BuildType) -> Vec<String> {
    variants
        .iter()
        .flat_map(|(module, list)| {
            list.iter()
                .map(move |variant| format!(":{}:{}{}", module, build_type.task_prefix(), variant))
        })
        .collect()
}

/// An Android project driven through its Gradle wrapper
#[derive(Debug, Clone)]
pub struct GradleProject {
    location: PathBuf,
    gradle: PathBuf,
}

impl GradleProject {
    /// Open the project at `location`
    ///
    /// Uses the project's wrapper, falling back to `gradle` from PATH.
    pub fn open(location: &Path) -> Result<Self, StepError> {
        if !location.is_dir() {
            return Err(StepError::config_error_with_hint(
                format!("Project location is not a directory: {}", location.display()),
                None,
                "Set --project-location (PROJECT_LOCATION) to the root of the Android project",
            ));
        }

        let wrapper = location.join(WRAPPER_NAME);
        let gradle = if wrapper.is_file() {
            wrapper
        } else {
            which::which("gradle").map_err(|_| {
                StepError::missing_tool("gradlew", "building the Android project", hints::gradle_wrapper())
            })?
        };

        Ok(Self {
            location: location.to_path_buf(),
            gradle,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Path of the Gradle executable in use
    pub fn gradle(&self) -> &Path {
        &self.gradle
    }

    /// Run `tasks --all` and return its output
    pub fn list_tasks(&self) -> Result<String, StepError> {
        let args: Vec<String> = ["tasks", "--all", "--console=plain", "-q"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let result = run_command(&self.gradle, &args, &self.location, false)
            .map_err(|e| StepError::build_failure("tasks", format!("{:#}", e), None))?;

        if !result.success {
            let message = format!("exit code {}\n{}", result.exit_code, result.stderr.trim());
            return Err(StepError::build_failure(
                "tasks",
                message,
                Some(hints::gradle_task().to_string()),
            ));
        }

        Ok(result.stdout)
    }

    /// Variants of every module for the given build type
    pub fn variants(&self, build_type: BuildType) -> Result<Variants, StepError> {
        Ok(parse_variants(&self.list_tasks()?, build_type))
    }

    /// Run `tasks` with `extra_args`, streaming Gradle's output
    ///
    /// Returns how long Gradle ran.
    pub fn run_tasks(&self, tasks: &[String], extra_args: &[String]) -> Result<Duration, StepError> {
        let args: Vec<String> = tasks.iter().chain(extra_args).cloned().collect();
        let task_names = tasks.join(" ");

        let result = run_command(&self.gradle, &args, &self.location, true)
            .map_err(|e| StepError::build_failure(&task_names, format!("{:#}", e), None))?;

        if !result.success {
            return Err(StepError::build_failure(
                task_names,
                format!("Gradle exited with code {}", result.exit_code),
                Some(hints::gradle_task().to_string()),
            ));
        }

        Ok(result.duration)
    }
}
