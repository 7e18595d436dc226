//! Artifact export into the deploy directory

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::variant::Variants;

/// Machine readable result of a step run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Exported APK files
    pub apk_paths: Vec<PathBuf>,
    /// Exported AAB files
    pub aab_paths: Vec<PathBuf>,
    /// Exported files of any other type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_paths: Vec<PathBuf>,
    /// Variants that were built
    pub variants: Variants,
}

impl ExportSummary {
    /// Sort exported paths by extension
    pub fn new(exported: &[PathBuf], variants: Variants) -> Self {
        let mut summary = Self {
            variants,
            ..Default::default()
        };

        for path in exported {
            match path.extension().and_then(|e| e.to_str()) {
                Some("apk") => summary.apk_paths.push(path.clone()),
                Some("aab") => summary.aab_paths.push(path.clone()),
                _ => summary.other_paths.push(path.clone()),
            }
        }

        summary
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            crate::utils::paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary to {}", path.display()))
    }
}

/// Name of the Gradle module an output path belongs to
///
/// This is the directory right above the last `build` directory.
pub fn module_of(path: &Path) -> Option<String> {
    let components: Vec<_> = path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    let build_index = components.iter().rposition(|c| *c == "build")?;
    build_index
        .checked_sub(1)
        .map(|i| components[i].to_string())
        .filter(|m| !m.is_empty() && m != "/")
}

fn unique_name(artifact: &Artifact, taken: &HashSet<String>) -> String {
    if !taken.contains(&artifact.name) {
        return artifact.name.clone();
    }

    if let Some(module) = module_of(&artifact.path) {
        let prefixed = format!("{}-{}", module, artifact.name);
        if !taken.contains(&prefixed) {
            return prefixed;
        }
    }

    let name = Path::new(&artifact.name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.name.clone());
    let extension = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| format!("{}-{}{}", stem, n, extension))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| artifact.name.clone())
}

/// Copy artifacts into `deploy_dir`, returning the exported paths in order
///
/// Artifacts sharing a name are renamed with their module as prefix, then
/// with a counter, so no export overwrites another.
pub fn export_artifacts(artifacts: &[Artifact], deploy_dir: &Path) -> Result<Vec<PathBuf>> {
    crate::utils::paths::ensure_dir(deploy_dir)?;

    let mut taken = HashSet::new();
    let mut exported = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let name = unique_name(artifact, &taken);
        let dest = deploy_dir.join(&name);

        std::fs::copy(&artifact.path, &dest).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                artifact.path.display(),
                dest.display()
            )
        })?;

        taken.insert(name);
        exported.push(dest);
    }

    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_artifact(root: &Path, relative: &str) -> Artifact {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, relative).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        Artifact::new(path, name)
    }

    #[test]
    fn test_module_of() {
        assert_eq!(
            module_of(Path::new("/src/app/build/outputs/apk/debug/app-debug.apk")).as_deref(),
            Some("app")
        );
        assert_eq!(module_of(Path::new("/src/outputs/app.apk")), None);
        assert_eq!(module_of(Path::new("/build/app.apk")), None);
    }

    #[test]
    fn test_export_copies_files() {
        let temp_dir = TempDir::new().unwrap();
        let artifact = write_artifact(temp_dir.path(), "app/build/outputs/apk/debug/app-debug.apk");
        let deploy_dir = temp_dir.path().join("deploy");

        let exported = export_artifacts(&[artifact], &deploy_dir).unwrap();

        assert_eq!(exported, vec![deploy_dir.join("app-debug.apk")]);
        assert_eq!(
            fs::read_to_string(&exported[0]).unwrap(),
            "app/build/outputs/apk/debug/app-debug.apk"
        );
    }

    #[test]
    fn test_export_renames_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_artifact(temp_dir.path(), "app/build/outputs/apk/debug/output.apk");
        let second = write_artifact(temp_dir.path(), "wear/build/outputs/apk/debug/output.apk");
        let third = write_artifact(temp_dir.path(), "wear/build/outputs/apk/release/output.apk");
        let deploy_dir = temp_dir.path().join("deploy");

        let exported = export_artifacts(&[first, second, third], &deploy_dir).unwrap();

        assert_eq!(
            exported,
            vec![
                deploy_dir.join("output.apk"),
                deploy_dir.join("wear-output.apk"),
                deploy_dir.join("output-1.apk"),
            ]
        );
        assert!(exported.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_summary_splits_by_extension() {
        let exported = vec![
            PathBuf::from("/deploy/app-debug.apk"),
            PathBuf::from("/deploy/app-release.aab"),
            PathBuf::from("/deploy/mapping.txt"),
        ];
        let summary = ExportSummary::new(&exported, Variants::new());

        assert_eq!(summary.apk_paths, vec![PathBuf::from("/deploy/app-debug.apk")]);
        assert_eq!(summary.aab_paths, vec![PathBuf::from("/deploy/app-release.aab")]);
        assert_eq!(summary.other_paths, vec![PathBuf::from("/deploy/mapping.txt")]);
    }

    #[test]
    fn test_summary_written_as_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/summary.json");
        let summary = ExportSummary::new(&[PathBuf::from("/deploy/app.apk")], Variants::new());

        summary.write_to(&path).unwrap();

        let read: ExportSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, summary);
    }
}
