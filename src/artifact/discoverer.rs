//! Glob based artifact discovery
//!
//! Patterns are matched against the absolute path of every file under the
//! project root, and `*` also matches path separators, so
//! `*/build/outputs/apk/*.apk` finds `app/build/outputs/apk/debug/app-debug.apk`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

use crate::artifact::{Artifact, FileDiscoverer};
use crate::error::StepError;

/// Directories never containing build outputs
const SKIPPED_DIRS: &[&str] = &[".git", ".gradle", ".idea"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Finds artifacts under a project directory
#[derive(Debug, Clone)]
pub struct GlobDiscoverer {
    root: PathBuf,
    excluded: Vec<PathBuf>,
}

impl GlobDiscoverer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded: Vec::new(),
        }
    }

    /// Skip `dir` and everything below it
    ///
    /// Used for the deploy directory, which holds copies of earlier outputs.
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

impl FileDiscoverer for GlobDiscoverer {
    /// With `include_all`, files are reported regardless of `since`
    fn find_artifacts(
        &self,
        since: Option<DateTime<Utc>>,
        pattern: &str,
        include_all: bool,
    ) -> Result<Vec<Artifact>, StepError> {
        let matcher = Pattern::new(pattern).map_err(|e| {
            StepError::discovery(pattern, "invalid glob pattern", Some(e.into()))
        })?;

        let root = std::fs::canonicalize(&self.root).map_err(|e| {
            StepError::discovery(
                pattern,
                format!("cannot access {}", self.root.display()),
                Some(e.into()),
            )
        })?;

        // Excluded dirs that don't exist yet hold nothing to skip
        let excluded: Vec<PathBuf> = self
            .excluded
            .iter()
            .filter_map(|dir| std::fs::canonicalize(dir).ok())
            .collect();

        let since = if include_all { None } else { since };
        let mut artifacts = Vec::new();

        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| !is_skipped(e) && !excluded.iter().any(|dir| e.path() == dir.as_path()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                StepError::discovery(pattern, format!("failed to walk {}", root.display()), Some(e.into()))
            })?;

            if !entry.file_type().is_file() || !matcher.matches_path_with(entry.path(), MATCH_OPTIONS) {
                continue;
            }

            if let Some(since) = since {
                let modified = entry
                    .metadata()
                    .map_err(anyhow::Error::from)
                    .and_then(|m| m.modified().map_err(anyhow::Error::from))
                    .map_err(|e| {
                        StepError::discovery(
                            pattern,
                            format!("cannot read modification time of {}", entry.path().display()),
                            Some(e),
                        )
                    })?;

                if DateTime::<Utc>::from(modified) < since {
                    continue;
                }
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            artifacts.push(Artifact::new(entry.into_path(), name));
        }

        artifacts.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(artifacts)
    }
}
