//! pipx application adapter.
//!
//! `pipx list --json` writes to standard output only, so backup captures it
//! into the manifest; `pipx install-all` reads that file back directly.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Category, Packager, Runtime, write_manifest};

/// Manage pipx-installed Python applications.
#[derive(Debug)]
pub struct Pipx {
    manifest: PathBuf,
}

impl Pipx {
    /// Create the adapter with its manifest under `pkg_dir`.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("pipx.json"),
        }
    }
}

impl Packager for Pipx {
    fn category(&self) -> Category {
        Category::Pipx
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("pipx", &["--version"])?;
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let result = rt
            .exec
            .run("pipx", &["list", "--include-injected", "--json"])?;
        write_manifest(&self.manifest, &result.stdout)?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        rt.run("pipx", &["install-all", &manifest])?;
        Ok(())
    }
}
