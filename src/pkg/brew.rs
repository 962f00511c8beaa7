//! Homebrew bundle adapter.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Category, Packager, Runtime};

/// Manage Homebrew packages through `brew bundle` and a Brewfile manifest.
#[derive(Debug)]
pub struct BrewBundle {
    manifest: PathBuf,
}

impl BrewBundle {
    /// Create the adapter with its manifest under `pkg_dir`.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("Brewfile"),
        }
    }
}

impl Packager for BrewBundle {
    fn category(&self) -> Category {
        Category::Brew
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("brew", &["--version"])?;
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
        rt.run(
            "brew",
            &["bundle", "dump", "-f", "--describe", "--file", &manifest],
        )?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let manifest = self.manifest.display().to_string();
        rt.run(
            "brew",
            &["bundle", "install", "-v", "--no-upgrade", "--file", &manifest],
        )?;
        Ok(())
    }
}
