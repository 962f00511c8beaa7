//! Debian package database adapter backed by apt-clone.
//!
//! Restoring a clone rewrites the system package database, which requires
//! elevated rights. A locking or permission failure is reported as a
//! distinguishable [`PackageError::NeedsPrivilege`] so the caller can map it
//! to a dedicated exit status and suggest retrying with elevated rights.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::{Category, Packager, Runtime};
use crate::error::PackageError;

/// Manage Debian packages through `apt-clone` archives.
#[derive(Debug)]
pub struct AptClone {
    manifest: PathBuf,
}

impl AptClone {
    /// Create the adapter with its manifest under `pkg_dir`.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("apt-clone.tar.gz"),
        }
    }
}

/// Whether a failed restore looks like a missing-privileges problem rather
/// than a genuine apt-clone error.
fn is_privilege_failure(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("permission denied")
        || lower.contains("could not get lock")
        || lower.contains("are you root")
}

impl Packager for AptClone {
    fn category(&self) -> Category {
        Category::Apt
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("apt-clone", &["--help"])?;
        Ok(())
    }

    // The manifest is a binary archive, so info is a command rather than a
    // file read.
    fn info(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        rt.run("apt-clone", &["info", &manifest])?;
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        rt.run("apt-clone", &["clone", &manifest])?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        let result = rt
            .exec
            .run_unchecked("sudo", &["apt-clone", "restore", &manifest])?;
        if !result.success {
            if is_privilege_failure(&result.stderr) {
                return Err(PackageError::NeedsPrivilege { category: "apt" }.into());
            }
            bail!(
                "apt-clone restore failed (exit {}): {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            );
        }
        Ok(())
    }
}
