//! Build artifact discovery and export
//!
//! ## Modules
//!
//! - `discoverer` - Glob based [`FileDiscoverer`] over a project directory
//! - `export` - Copying discovered artifacts into the deploy directory

pub mod discoverer;
pub mod export;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StepError;

pub use discoverer::GlobDiscoverer;
pub use export::{export_artifacts, ExportSummary};

/// A build output file found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Name shown to the user and used when exporting
    pub name: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Finds files matching a glob pattern
pub trait FileDiscoverer {
    /// Find files matching `pattern` modified at or after `since`
    ///
    /// `since = None` means no modification-time constraint.
    fn find_artifacts(
        &self,
        since: Option<DateTime<Utc>>,
        pattern: &str,
        include_all: bool,
    ) -> Result<Vec<Artifact>, StepError>;
}

/// Collect the artifacts produced since `start_time`
///
/// Patterns are searched in order. When nothing is found, the search is
/// repeated once without the time constraint: output timestamps do not always
/// postdate the build start (clock skew, coarse mtime, up-to-date tasks).
/// Discoverer errors are returned as-is and stop the search.
pub fn get_artifacts(
    discoverer: &dyn FileDiscoverer,
    start_time: DateTime<Utc>,
    patterns: &[String],
    include_all: bool,
) -> Result<Vec<Artifact>, StepError> {
    let artifacts = find_all(discoverer, Some(start_time), patterns, include_all)?;
    if !artifacts.is_empty() {
        return Ok(artifacts);
    }

    find_all(discoverer, None, patterns, include_all)
}

fn find_all(
    discoverer: &dyn FileDiscoverer,
    since: Option<DateTime<Utc>>,
    patterns: &[String],
    include_all: bool,
) -> Result<Vec<Artifact>, StepError> {
    let mut artifacts = Vec::new();
    for pattern in patterns {
        artifacts.extend(discoverer.find_artifacts(since, pattern, include_all)?);
    }
    Ok(artifacts)
}
