//! Intermediate artifact lookup and best-effort deletion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

/// Result of deleting one intermediate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    /// Already gone before we got to it.
    Missing,
    Failed(String),
}

/// Deletes every path, logging failures instead of raising them.
pub fn cleanup<I, P>(paths: I) -> Vec<(PathBuf, CleanupOutcome)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let outcome = match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "deleted temp file");
                    CleanupOutcome::Deleted
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => CleanupOutcome::Missing,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to delete temp file");
                    CleanupOutcome::Failed(e.to_string())
                }
            };
            (path, outcome)
        })
        .collect()
}

/// Files directly inside `dir` whose extension is `ext`, case-insensitively, sorted.
///
/// Unreadable entries and an invalid pattern both yield no matches.
pub fn glob_in(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join(format!("*.{}", ext));
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    match glob::glob_with(&pattern.to_string_lossy(), options) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect(),
        Err(e) => {
            warn!(pattern = %pattern.display(), error = %e, "invalid glob pattern");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_reports_each_path() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("a.resources");
        let absent = temp_dir.path().join("b.resources");
        fs::write(&present, b"blob").unwrap();

        let results = cleanup([&present, &absent]);
        assert_eq!(
            results,
            vec![
                (present.clone(), CleanupOutcome::Deleted),
                (absent.clone(), CleanupOutcome::Missing),
            ]
        );
        assert!(!present.exists());
    }

    #[test]
    fn test_cleanup_directory_is_failure_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("not-a-file.resources");
        fs::create_dir(&dir).unwrap();

        let results = cleanup([&dir]);
        assert!(matches!(results[0].1, CleanupOutcome::Failed(_)));
        assert!(dir.exists());
    }

    #[test]
    fn test_glob_in_matches_extension_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.resources"), b"").unwrap();
        fs::write(temp_dir.path().join("B.RESOURCES"), b"").unwrap();
        fs::write(temp_dir.path().join("a.cs"), b"").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("c.resources"), b"").unwrap();

        let found = glob_in(temp_dir.path(), "resources");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.parent() == Some(temp_dir.path())));
    }

    #[test]
    fn test_glob_in_escapes_directory_metacharacters() {
        let temp_dir = TempDir::new().unwrap();
        let odd = temp_dir.path().join("out [1]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("a.cs"), b"").unwrap();

        assert_eq!(glob_in(&odd, "cs"), vec![odd.join("a.cs")]);
    }
}
