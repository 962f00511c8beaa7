//! File Set Collector: list the eligible entries of a store directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File extensions excluded from tracking (editor swap files and the
/// `.bk` backups produced by the link engine).
pub const IGNORED_EXTENSIONS: [&str; 3] = ["swp", "swo", "bk"];

/// A configuration entry discovered in a store directory.
///
/// Entries are discovered fresh on every invocation and never persisted.
/// Directories are eligible too: a stored `.vim/` tree is tracked and
/// linked the same way as a plain file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Store directory the entry was discovered in.
    pub dir: PathBuf,
    /// Entry name within that directory.
    pub name: OsString,
}

impl TrackedFile {
    /// Location of the entry inside the configuration store.
    #[must_use]
    pub fn source(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// The home-directory path this entry maps to.
    #[must_use]
    pub fn target(&self, home: &Path) -> PathBuf {
        home.join(&self.name)
    }
}

/// List the eligible entries of `dir`, sorted by name.
///
/// Directory-listing order is not guaranteed by the OS, so the result is
/// sorted to make reconciliation order deterministic.
///
/// # Errors
///
/// Returns a fatal [`ConfigError`] if `dir` is not a directory or cannot be
/// listed; this is validated before any home-directory mutation begins.
pub fn collect_files(dir: &Path) -> Result<Vec<TrackedFile>, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::NotADirectory(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        if is_ignored(&name) {
            continue;
        }
        files.push(TrackedFile {
            dir: dir.to_path_buf(),
            name,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Whether a file name carries one of the ignored extensions.
fn is_ignored(name: &std::ffi::OsStr) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IGNORED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn ignores_swap_and_backup_extensions() {
        assert!(is_ignored(OsStr::new(".vimrc.swp")));
        assert!(is_ignored(OsStr::new(".vimrc.swo")));
        assert!(is_ignored(OsStr::new(".bashrc.bk")));
        assert!(!is_ignored(OsStr::new(".vimrc")));
        assert!(!is_ignored(OsStr::new("crontab.txt")));
        assert!(!is_ignored(OsStr::new("pkg")));
    }

    #[test]
    fn collect_skips_ignored_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".vimrc"), "").unwrap();
        std::fs::write(dir.path().join(".vimrc.swp"), "").unwrap();
        std::fs::write(dir.path().join(".bashrc.bk"), "").unwrap();

        let files = collect_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec![OsString::from(".vimrc")]);
    }

    #[test]
    fn collect_includes_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".vim")).unwrap();
        std::fs::write(dir.path().join(".vimrc"), "").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn collect_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zshrc", "bashrc", "mrc"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let files = collect_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["bashrc", "mrc", "zshrc"]);
    }

    #[test]
    fn collect_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = collect_files(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory(_)));
    }

    #[test]
    fn source_and_target_join_the_name() {
        let file = TrackedFile {
            dir: PathBuf::from("/conf/global"),
            name: OsString::from(".vimrc"),
        };
        assert_eq!(file.source(), PathBuf::from("/conf/global/.vimrc"));
        assert_eq!(
            file.target(Path::new("/home/user")),
            PathBuf::from("/home/user/.vimrc")
        );
    }
}
