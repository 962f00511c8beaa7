//! GNOME dconf settings adapter.
//!
//! `dconf dump` writes to standard output and `dconf load` reads from
//! standard input, so backup captures stdout into the manifest and restore
//! feeds the manifest back on stdin.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Category, Packager, Runtime, read_manifest, write_manifest};

/// Snapshot and restore the dconf settings database.
#[derive(Debug)]
pub struct Dconf {
    manifest: PathBuf,
}

impl Dconf {
    /// Create the adapter with its manifest under `pkg_dir`.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("settings.dconf"),
        }
    }
}

impl Packager for Dconf {
    fn category(&self) -> Category {
        Category::Dconf
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("dconf", &["help"])?;
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let result = rt.exec.run("dconf", &["dump", "/"])?;
        write_manifest(&self.manifest, &result.stdout)?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let settings = read_manifest(&self.manifest)?;
        rt.exec.run_with_stdin("dconf", &["load", "/"], &settings)?;
        Ok(())
    }
}
