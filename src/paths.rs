//! Configuration store layout resolution.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ConfigError;

/// Resolved configuration store layout for one invocation.
///
/// The store root contains two subtrees: `global/` with settings applied to
/// every box, and `boxes/<env>/<box>/` with settings specific to one machine
/// profile.
#[derive(Debug, Clone)]
pub struct ConfDirs {
    /// Configuration store root.
    pub root: PathBuf,
    /// `<root>/global`.
    pub global_dir: PathBuf,
    /// `<root>/boxes/<env>/<box>`.
    pub box_dir: PathBuf,
}

impl ConfDirs {
    /// Compute the canonical storage directories for `env` and `box_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if either name is not a single
    /// path segment.
    pub fn resolve(conf: &Path, env: &str, box_name: &str) -> Result<Self, ConfigError> {
        validate_segment("env", env)?;
        validate_segment("box", box_name)?;
        Ok(Self {
            root: conf.to_path_buf(),
            global_dir: conf.join("global"),
            box_dir: conf.join("boxes").join(env).join(box_name),
        })
    }

    /// Storage directory of another box under the same root (used as the
    /// clone source by `init --clone`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if either name is not a single
    /// path segment.
    pub fn sibling_box(&self, env: &str, box_name: &str) -> Result<PathBuf, ConfigError> {
        validate_segment("env", env)?;
        validate_segment("box", box_name)?;
        Ok(self.root.join("boxes").join(env).join(box_name))
    }

    /// Package manifest directory of the resolved box.
    #[must_use]
    pub fn pkg_dir(&self) -> PathBuf {
        self.box_dir.join("pkg")
    }
}

/// Reject values that could escape the store when joined onto a path.
///
/// A valid value is a single path segment: non-empty, not `.` or `..`, and
/// free of path separators.
pub fn validate_segment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(ConfigError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// The user's home directory.
///
/// # Errors
///
/// Returns an error if neither the platform lookup nor the `HOME` /
/// `USERPROFILE` environment variables yield a home directory.
pub fn home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("cannot determine home directory"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_builds_expected_layout() {
        let dirs = ConfDirs::resolve(Path::new("/conf"), "work", "laptop").unwrap();
        assert_eq!(dirs.root, PathBuf::from("/conf"));
        assert_eq!(dirs.global_dir, PathBuf::from("/conf/global"));
        assert_eq!(dirs.box_dir, PathBuf::from("/conf/boxes/work/laptop"));
        assert_eq!(dirs.pkg_dir(), PathBuf::from("/conf/boxes/work/laptop/pkg"));
    }

    #[test]
    fn sibling_box_shares_root() {
        let dirs = ConfDirs::resolve(Path::new("/conf"), "work", "laptop").unwrap();
        let sibling = dirs.sibling_box("personal", "desktop").unwrap();
        assert_eq!(sibling, PathBuf::from("/conf/boxes/personal/desktop"));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(ConfDirs::resolve(Path::new("/conf"), "", "laptop").is_err());
        assert!(ConfDirs::resolve(Path::new("/conf"), "work", "").is_err());
    }

    #[test]
    fn rejects_traversal_segments() {
        for bad in ["..", ".", "../work", "work/../../etc", "a/b", "a\\b"] {
            assert!(
                validate_segment("env", bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_plain_segments() {
        for good in ["work", "laptop-2", "home_desktop", "box.old", "..."] {
            assert!(
                validate_segment("box", good).is_ok(),
                "{good:?} should be accepted"
            );
        }
    }

    #[test]
    fn invalid_name_reports_field_and_value() {
        let err = validate_segment("env", "a/b").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("env"));
        assert!(msg.contains("a/b"));
    }

    #[test]
    fn home_dir_resolves() {
        // Every supported CI/dev environment has a resolvable home.
        assert!(home_dir().is_ok());
    }
}
