//! Path utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Absolute form of `path`, relative to the current directory
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(resolve(&current_dir, path))
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve() {
        let base = Path::new("/work/project");
        assert_eq!(resolve(base, Path::new("deploy")), PathBuf::from("/work/project/deploy"));
        assert_eq!(resolve(base, Path::new("/tmp/deploy")), PathBuf::from("/tmp/deploy"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Existing directory is fine
        ensure_dir(&nested).unwrap();
    }
}
