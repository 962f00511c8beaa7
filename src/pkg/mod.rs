//! Package Adapter Registry.
//!
//! Maps a package-manager identifier to an adapter implementing the
//! verify / info / backup / restore contract. Every adapter is constructed
//! from the static registry in [`adapter`]; capabilities are explicit trait
//! methods rather than exceptions inferred at call time. Each adapter owns
//! exactly one manifest file under the box's `pkg/` directory.

pub mod apt;
pub mod brew;
pub mod crontab;
pub mod dconf;
pub mod git;
pub mod npm;
pub mod pipx;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;

use crate::error::PackageError;
use crate::exec::{ExecResult, Executor};
use crate::logging::Logger;

/// Package-manager categories with a registered adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Category {
    /// Debian package database via apt-clone.
    Apt,
    /// Homebrew bundles.
    Brew,
    /// User crontab.
    Crontab,
    /// GNOME dconf settings database.
    Dconf,
    /// Git repository inventory.
    Git,
    /// Global npm packages.
    Npm,
    /// pipx-managed Python applications.
    Pipx,
}

impl Category {
    /// Stable lowercase identifier, as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Brew => "brew",
            Self::Crontab => "crontab",
            Self::Dconf => "dconf",
            Self::Git => "git",
            Self::Npm => "npm",
            Self::Pipx => "pipx",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions understood by every adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Check the underlying tool is present and usable.
    Verify,
    /// Print the current manifest.
    Info,
    /// Snapshot the installed-package state into the manifest.
    Backup,
    /// Reinstall from the manifest.
    Restore,
}

impl Action {
    /// Stable lowercase identifier, as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Info => "info",
            Self::Backup => "backup",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared collaborators handed to every adapter call.
pub struct Runtime<'a> {
    /// Process runner.
    pub exec: &'a dyn Executor,
    /// Logger for command echo and adapter output.
    pub log: &'a Logger,
}

impl fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}

impl Runtime<'_> {
    /// Run a command, echoing the invocation and surfacing its captured
    /// output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.log.debug(&format!("$ {program} {}", args.join(" ")));
        let result = self.exec.run(program, args)?;
        let stdout = result.stdout.trim_end();
        if !stdout.is_empty() {
            self.log.info(stdout);
        }
        Ok(result)
    }
}

/// A package-manager binding exposing verify / info / backup / restore.
///
/// `verify` and `info` are universal; `backup` and `restore` may be
/// unsupported, which the default implementations report as a distinct
/// capability error rather than executing nothing silently.
pub trait Packager {
    /// The category this adapter is registered under.
    fn category(&self) -> Category;

    /// Path of the manifest file owned by this adapter.
    fn manifest_path(&self) -> &Path;

    /// Check the underlying tool is present and usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is missing or unusable.
    fn verify(&self, rt: &Runtime<'_>) -> Result<()>;

    /// Print the current manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest does not exist or cannot be read.
    fn info(&self, rt: &Runtime<'_>) -> Result<()> {
        print_manifest(self.manifest_path(), rt)
    }

    /// Whether this adapter implements `backup`.
    fn supports_backup(&self) -> bool {
        false
    }

    /// Whether this adapter implements `restore`.
    fn supports_restore(&self) -> bool {
        false
    }

    /// Snapshot the installed-package state into the manifest.
    ///
    /// # Errors
    ///
    /// Returns a capability error unless overridden.
    fn backup(&self, rt: &Runtime<'_>) -> Result<()> {
        let _ = rt;
        Err(PackageError::Unsupported {
            category: self.category().name(),
            action: "backup",
        }
        .into())
    }

    /// Reinstall from the manifest.
    ///
    /// # Errors
    ///
    /// Returns a capability error unless overridden.
    fn restore(&self, rt: &Runtime<'_>) -> Result<()> {
        let _ = rt;
        Err(PackageError::Unsupported {
            category: self.category().name(),
            action: "restore",
        }
        .into())
    }
}

/// Construct the adapter registered for `category`, with its manifest under
/// `pkg_dir`.
#[must_use]
pub fn adapter(category: Category, pkg_dir: &Path) -> Box<dyn Packager> {
    match category {
        Category::Apt => Box::new(apt::AptClone::new(pkg_dir)),
        Category::Brew => Box::new(brew::BrewBundle::new(pkg_dir)),
        Category::Crontab => Box::new(crontab::Crontab::new(pkg_dir)),
        Category::Dconf => Box::new(dconf::Dconf::new(pkg_dir)),
        Category::Git => Box::new(git::GitRepos::new(pkg_dir)),
        Category::Npm => Box::new(npm::NpmGlobal::new(pkg_dir)),
        Category::Pipx => Box::new(pipx::Pipx::new(pkg_dir)),
    }
}

/// Run `action` against an adapter, verifying the tool first.
///
/// Verification always runs; on failure the action is aborted with the
/// reported error. Unsupported actions are rejected before dispatch.
///
/// # Errors
///
/// Returns an error from verification, a capability check, or the action
/// itself.
pub fn run_action(packager: &dyn Packager, action: Action, rt: &Runtime<'_>) -> Result<()> {
    packager.verify(rt)?;
    match action {
        Action::Verify => Ok(()),
        Action::Info => packager.info(rt),
        Action::Backup => {
            if !packager.supports_backup() {
                return Err(PackageError::Unsupported {
                    category: packager.category().name(),
                    action: "backup",
                }
                .into());
            }
            packager.backup(rt)
        }
        Action::Restore => {
            if !packager.supports_restore() {
                return Err(PackageError::Unsupported {
                    category: packager.category().name(),
                    action: "restore",
                }
                .into());
            }
            packager.restore(rt)
        }
    }
}

/// Print the manifest file contents (default `info` implementation).
fn print_manifest(path: &Path, rt: &Runtime<'_>) -> Result<()> {
    let contents = read_manifest(path)?;
    let trimmed = contents.trim_end();
    if !trimmed.is_empty() {
        rt.log.info(trimmed);
    }
    Ok(())
}

/// Read an adapter's manifest, mapping a missing file to the dedicated
/// error variant.
pub(crate) fn read_manifest(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PackageError::MissingManifest(path.to_path_buf()).into())
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("reading manifest \"{}\"", path.display()))),
    }
}

/// Write an adapter's manifest.
pub(crate) fn write_manifest(path: &Path, contents: &str) -> Result<()> {
    use anyhow::Context as _;
    std::fs::write(path, contents)
        .with_context(|| format!("writing manifest \"{}\"", path.display()))
}
