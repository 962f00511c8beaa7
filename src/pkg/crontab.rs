//! User crontab adapter.
//!
//! `crontab -l` has no destination-file argument, so backup captures its
//! standard output and writes the manifest itself.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::{Category, Packager, Runtime, write_manifest};

/// Snapshot and restore the user crontab.
#[derive(Debug)]
pub struct Crontab {
    manifest: PathBuf,
}

impl Crontab {
    /// Create the adapter with its manifest under `pkg_dir`.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("crontab.txt"),
        }
    }
}

impl Packager for Crontab {
    fn category(&self) -> Category {
        Category::Crontab
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        if !rt.exec.which("crontab") {
            bail!("crontab not found on PATH");
        }
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let result = rt.exec.run("crontab", &["-l"])?;
        write_manifest(&self.manifest, &result.stdout)?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        rt.run("crontab", &[&manifest])?;
        Ok(())
    }
}
