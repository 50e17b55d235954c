//! System capability traits for dependency injection.
//!
//! Everything the `Dir` built-in needs from the host goes through these
//! traits, so tests can swap in an in-memory file system or environment.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;

pub trait FileSystem {
    /// Joins `path` onto `base` unless `path` is already absolute.
    fn resolve(&self, base: &str, path: &str) -> String {
        let p = Path::new(path);
        if p.is_absolute() {
            return path.to_string();
        }
        Path::new(base).join(p).to_string_lossy().into_owned()
    }

    fn is_dir(&self, path: &str) -> bool;

    /// Entry names in the order the host returns them, without `.`/`..`.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, String>;

    fn canonicalize(&self, path: &str) -> Result<String, String>;

    fn remove_dir(&self, path: &str) -> Result<(), String>;

    fn create_dir_all(&self, path: &str) -> Result<(), String>;

    /// Paths matching `pattern`. Relative patterns are matched under `base`
    /// and reported relative to it.
    fn glob(&self, base: &str, pattern: &str) -> Result<Vec<String>, String>;
}

pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, String> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| e.to_string())? {
            let entry = entry.map_err(|e| e.to_string())?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn canonicalize(&self, path: &str) -> Result<String, String> {
        let canonical = std::fs::canonicalize(path).map_err(|e| e.to_string())?;
        Ok(canonical.to_string_lossy().to_string())
    }

    fn remove_dir(&self, path: &str) -> Result<(), String> {
        std::fs::remove_dir(path).map_err(|e| e.to_string())
    }

    fn create_dir_all(&self, path: &str) -> Result<(), String> {
        std::fs::create_dir_all(path).map_err(|e| e.to_string())
    }

    fn glob(&self, base: &str, pattern: &str) -> Result<Vec<String>, String> {
        let absolute = Path::new(pattern).is_absolute();
        let full = if absolute {
            pattern.to_string()
        } else {
            Path::new(&glob::Pattern::escape(base))
                .join(pattern)
                .to_string_lossy()
                .into_owned()
        };
        let entries = glob::glob(&full).map_err(|e| e.to_string())?;
        let strip = if absolute { None } else { Some(Path::new(base)) };
        Ok(collect_matches(entries, strip))
    }
}

/// Paths of the successful glob entries, relative to `strip` when given.
/// Entries that failed (typically unreadable directories) are skipped.
fn collect_matches<I, E>(entries: I, strip: Option<&Path>) -> Vec<String>
where
    I: IntoIterator<Item = Result<PathBuf, E>>,
    E: fmt::Display,
{
    let mut out = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "glob entry skipped");
                continue;
            }
        };
        let shown = strip
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path.as_path());
        out.push(shown.to_string_lossy().into_owned());
    }
    out
}

pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
    /// Working directory of the host process, if it can be determined.
    fn current_dir(&self) -> Option<String>;
}

pub struct StdEnvironment;

impl Environment for StdEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_dir(&self) -> Option<String> {
        std::env::current_dir()
            .ok()
            .map(|p| p.to_string_lossy().into_owned())
    }
}

pub struct Capabilities {
    pub fs: Box<dyn FileSystem>,
    pub env: Box<dyn Environment>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            fs: Box::new(StdFileSystem),
            env: Box::new(StdEnvironment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_absolute_paths() {
        assert_eq!(StdFileSystem.resolve("/base", "/abs/dir"), "/abs/dir");
        assert_eq!(StdFileSystem.resolve("/base", "rel"), "/base/rel");
    }

    #[test]
    fn glob_reports_relative_matches() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.rb"), "").unwrap();
        std::fs::write(tmp.path().join("b.txt"), "").unwrap();
        let base = tmp.path().to_string_lossy().into_owned();
        let hits = StdFileSystem.glob(&base, "*.rb").unwrap();
        assert_eq!(hits, vec!["a.rb".to_string()]);
    }

    #[test]
    fn failed_glob_entries_are_skipped() {
        let entries = vec![
            Ok(PathBuf::from("/base/a")),
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
            Ok(PathBuf::from("/base/sub/b")),
        ];
        let hits = collect_matches(entries, Some(Path::new("/base")));
        assert_eq!(hits, ["a", "sub/b"]);
    }

    #[test]
    fn absolute_matches_are_kept_whole() {
        let entries: Vec<Result<PathBuf, std::io::Error>> = vec![Ok(PathBuf::from("/x/y"))];
        assert_eq!(collect_matches(entries, None), ["/x/y"]);
    }
}
