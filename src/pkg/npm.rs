//! Global npm package adapter.
//!
//! Backup captures `npm list -g --json` into the manifest. Restore parses
//! the recorded dependency map and issues one pinned install invocation per
//! package, never a single combined call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

use super::{Category, Packager, Runtime, read_manifest, write_manifest};

/// Shape of the `npm list -g --json` output we rely on.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    version: String,
}

/// Manage globally installed npm packages.
#[derive(Debug)]
pub struct NpmGlobal {
    manifest: PathBuf,
    registry: Option<String>,
}

impl NpmGlobal {
    /// Create the adapter with its manifest under `pkg_dir`, installing from
    /// the default npm registry.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        Self {
            manifest: pkg_dir.join("package.json"),
            registry: None,
        }
    }

    /// Install from a non-default registry during restore.
    #[must_use]
    pub fn with_registry(mut self, url: impl Into<String>) -> Self {
        self.registry = Some(url.into());
        self
    }
}

impl Packager for NpmGlobal {
    fn category(&self) -> Category {
        Category::Npm
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("npm", &["--version"])?;
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let result = rt.exec.run("npm", &["list", "-g", "--json"])?;
        write_manifest(&self.manifest, &result.stdout)?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let raw = read_manifest(&self.manifest)?;
        let parsed: Manifest = serde_json::from_str(&raw)
            .with_context(|| format!("parsing \"{}\"", self.manifest.display()))?;

        for (name, dependency) in &parsed.dependencies {
            let spec = format!("{name}@{}", dependency.version);
            let mut args = vec!["install", "-g", spec.as_str()];
            if let Some(registry) = &self.registry {
                args.push("--registry");
                args.push(registry);
            }
            rt.run("npm", &args)?;
        }
        Ok(())
    }
}
