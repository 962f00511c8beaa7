//! Git repository inventory adapter.
//!
//! Backup walks a fixed install directory, queries every repository's
//! remotes, and serializes the collected inventory as formatted JSON.
//! Restore clones each recorded repository and re-creates its remotes; one
//! broken repository never blocks restoring the rest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};

use super::{Category, Packager, Runtime, read_manifest, write_manifest};

/// Remote name → URL map recorded per repository.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct RepoRecord {
    remotes: BTreeMap<String, String>,
}

/// Repository name → record, sorted for stable manifest output.
type Inventory = BTreeMap<String, RepoRecord>;

/// Inventory and restore git clones under a fixed install directory.
#[derive(Debug)]
pub struct GitRepos {
    manifest: PathBuf,
    install_dir: PathBuf,
    default_remote: String,
}

impl GitRepos {
    /// Create the adapter with its manifest under `pkg_dir`, tracking clones
    /// under `~/projects` with `origin` as the clone remote.
    #[must_use]
    pub fn new(pkg_dir: &Path) -> Self {
        let install_dir = dirs::home_dir()
            .map_or_else(|| PathBuf::from("projects"), |home| home.join("projects"));
        Self {
            manifest: pkg_dir.join("git_repos.json"),
            install_dir,
            default_remote: "origin".to_string(),
        }
    }

    /// Track clones under a different install directory.
    #[must_use]
    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    /// Clone from a different default remote name.
    #[must_use]
    pub fn with_default_remote(mut self, remote: impl Into<String>) -> Self {
        self.default_remote = remote.into();
        self
    }

    /// Query one repository's remotes, returning `None` if it does not look
    /// like a usable git repository.
    fn query_remotes(&self, dir: &str, rt: &Runtime<'_>) -> Option<RepoRecord> {
        let listing = rt.exec.run("git", &["-C", dir, "remote"]).ok()?;
        let mut remotes = BTreeMap::new();
        for remote in listing
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            let url = rt
                .exec
                .run("git", &["-C", dir, "remote", "get-url", remote])
                .ok()?;
            remotes.insert(remote.to_string(), url.stdout.trim().to_string());
        }
        Some(RepoRecord { remotes })
    }

    /// Clone one recorded repository and re-create its remotes.
    fn restore_repo(&self, name: &str, record: &RepoRecord, rt: &Runtime<'_>) -> Result<()> {
        let Some(default_url) = record.remotes.get(&self.default_remote) else {
            bail!("no \"{}\" remote recorded", self.default_remote);
        };
        let dest = self.install_dir.join(name).display().to_string();
        rt.run("git", &["clone", default_url, &dest])?;

        for (remote, url) in &record.remotes {
            if remote == &self.default_remote {
                rt.run("git", &["-C", &dest, "remote", "set-url", remote, url])?;
            } else {
                rt.run("git", &["-C", &dest, "remote", "add", remote, url])?;
            }
        }
        Ok(())
    }
}

impl Packager for GitRepos {
    fn category(&self) -> Category {
        Category::Git
    }

    fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    fn verify(&self, rt: &Runtime<'_>) -> Result<()> {
        rt.exec.run("git", &["--version"])?;
        Ok(())
    }

    fn supports_backup(&self) -> bool {
        true
    }

    fn supports_restore(&self) -> bool {
        true
    }

    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        std::fs::create_dir_all(&self.install_dir)
            .with_context(|| format!("creating \"{}\"", self.install_dir.display()))?;

        let mut entries: Vec<_> = std::fs::read_dir(&self.install_dir)
            .with_context(|| format!("reading \"{}\"", self.install_dir.display()))?
            .collect::<Result<_, _>>()
            .with_context(|| format!("reading \"{}\"", self.install_dir.display()))?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        let mut inventory = Inventory::new();
        for entry in entries {
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let dir = entry.path().display().to_string();
            match self.query_remotes(&dir, rt) {
                Some(record) => {
                    inventory.insert(name, record);
                }
                None => rt
                    .log
                    .debug(&format!("skipping \"{name}\": not a git repository")),
            }
        }

        let json = serde_json::to_string_pretty(&inventory)
            .context("serializing repository inventory")?;
        write_manifest(&self.manifest, &format!("{json}\n"))?;
        self.info(rt)
    }

    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        std::fs::create_dir_all(&self.install_dir)
            .with_context(|| format!("creating \"{}\"", self.install_dir.display()))?;

        let raw = read_manifest(&self.manifest)?;
        let inventory: Inventory = serde_json::from_str(&raw)
            .with_context(|| format!("parsing \"{}\"", self.manifest.display()))?;

        for (name, record) in &inventory {
            if let Err(e) = self.restore_repo(name, record, rt) {
                rt.log.warn(&format!("skipping \"{name}\": {e:#}"));
            }
        }
        Ok(())
    }
}
