//! android-build.toml configuration parsing
//!
//! An optional file in the project directory holding defaults for the step
//! inputs. Flags and environment variables take precedence over it.
//!
//! ```toml
//! [step]
//! module = "app"
//! variant = 'DemoDebug\nDemoRelease'
//! build_type = "aab"
//! app_path_pattern = ["*/build/outputs/bundle/*.aab"]
//! arguments = "--stacktrace"
//! deploy_dir = "build/deploy"
//! include_all = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::gradle::BuildType;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "android-build.toml";

/// Root of android-build.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    /// Step input defaults
    #[serde(default)]
    pub step: StepSection,
}

/// The [step] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSection {
    /// Module to build
    pub module: Option<String>,

    /// Variants to build, separated by a literal `\n`
    pub variant: Option<String>,

    /// apk or aab
    pub build_type: Option<BuildType>,

    /// Artifact glob patterns
    pub app_path_pattern: Option<Vec<String>>,

    /// Extra Gradle arguments
    pub arguments: Option<String>,

    /// Export directory, relative to the project
    pub deploy_dir: Option<PathBuf>,

    /// Report outputs regardless of their modification time
    pub include_all: Option<bool>,
}

impl StepConfig {
    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| format!("Failed to parse {}", CONFIG_FILE_NAME))
    }

    /// Load configuration from a file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load `android-build.toml` from a project directory
    ///
    /// A missing file yields the empty configuration.
    pub fn load_from_dir(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }
}
