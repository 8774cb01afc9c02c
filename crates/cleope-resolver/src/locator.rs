//! Product file discovery behind a port, so resolvers can run against an
//! in-memory tree.

use cleope_core::error::{CleopeError, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Finds files matching a glob pattern
pub trait ProductLocator: Send + Sync {
    /// Matching paths, sorted. `**` matches any number of directories.
    fn find(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Glob pattern for files named `file_pattern` under `dir`
pub fn pattern_in(dir: &Path, file_pattern: &str) -> String {
    dir.join(file_pattern).to_string_lossy().into_owned()
}

/// Glob pattern for `file_pattern` anywhere below `dir`
pub fn recursive_pattern(dir: &Path, file_pattern: &str) -> String {
    dir.join("**").join(file_pattern).to_string_lossy().into_owned()
}

fn invalid_pattern(pattern: &str, err: glob::PatternError) -> CleopeError {
    CleopeError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    }
}

/// Searches the mounted file system
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobLocator;

impl ProductLocator for GlobLocator {
    fn find(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        debug!(pattern, "Globbing");

        let entries = glob::glob(pattern).map_err(|e| invalid_pattern(pattern, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "Unreadable path skipped"
                ),
            }
        }

        paths.sort();
        Ok(paths)
    }
}

/// Fixed set of paths, matched the way the file system would be
#[derive(Debug, Clone, Default)]
pub struct MemoryLocator {
    paths: Vec<PathBuf>,
}

impl MemoryLocator {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { paths: paths.into_iter().map(Into::into).collect() }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }
}

impl ProductLocator for MemoryLocator {
    fn find(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let compiled = Pattern::new(pattern).map_err(|e| invalid_pattern(pattern, e))?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        let mut found: Vec<PathBuf> = self
            .paths
            .iter()
            .filter(|p| compiled.matches_path_with(p, options))
            .cloned()
            .collect();
        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_memory_locator_matches_like_the_file_system() {
        let locator = MemoryLocator::new([
            "/mnt/a/2024/01/02/z_cams_120000_tcco.nc",
            "/mnt/a/2024/01/02/z_cams_000000_tcco.nc",
            "/mnt/a/2024/01/03/z_cams_000000_tcco.nc",
        ]);

        let found = locator.find("/mnt/a/2024/01/02/*000000_*.nc").unwrap();
        assert_eq!(found, vec![PathBuf::from("/mnt/a/2024/01/02/z_cams_000000_tcco.nc")]);

        let all = locator.find("/mnt/a/**/*.nc").unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0] <= w[1]));

        // `*` stays inside one directory
        assert!(locator.find("/mnt/a/*.nc").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MemoryLocator::default().find("/mnt/[").unwrap_err();
        assert!(matches!(err, CleopeError::InvalidPattern { .. }));
    }

    #[test]
    fn test_glob_locator_sorted() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("x").join("y");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("b.nc"), b"").unwrap();
        fs::write(nested.join("a.nc"), b"").unwrap();
        fs::write(nested.join("a.txt"), b"").unwrap();

        let found = GlobLocator.find(&recursive_pattern(dir.path(), "*.nc")).unwrap();
        assert_eq!(found, vec![nested.join("a.nc"), nested.join("b.nc")]);

        let none = GlobLocator.find(&pattern_in(dir.path(), "*.nc")).unwrap();
        assert!(none.is_empty());
    }
}
