//! Link Reconciliation Engine.
//!
//! For every tracked entry, decides what currently occupies its
//! home-directory target and applies the transition that converges the home
//! directory to the configuration store without destroying user data:
//!
//! - a real directory is never replaced (skip, warn);
//! - a symlink that already resolves to the intended source is left alone;
//! - a symlink to another target or a regular file is removed (or renamed to
//!   `<name>.bk` when backing up) after confirmation;
//! - anything else falls through to symlink creation.
//!
//! There is no transaction or rollback. An interrupted run leaves converged
//! entries converged; re-running is safe because a correct link is always
//! recognised and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::collect::TrackedFile;
use crate::fsutil;
use crate::logging::Logger;
use crate::prompt::{Answer, Confirm};

/// Behaviour flags for a reconciliation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOptions {
    /// Skip confirmation prompts, treating every question as answered yes.
    pub force: bool,
    /// Preserve an overwritten non-symlink target as `<name>.bk` instead of
    /// deleting it.
    pub backup: bool,
}

/// What currently occupies a home-directory target path.
///
/// Read via `symlink_metadata` immediately before mutation and never cached;
/// the home directory is a live file system shared with the user's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetState {
    Absent,
    Directory,
    AlreadyLinked,
    Occupied { is_symlink: bool },
}

/// Outcome counters for a reconciliation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Symlinks created.
    pub created: u32,
    /// Targets already pointing at the intended source.
    pub already_linked: u32,
    /// Real directories left untouched.
    pub skipped_dirs: u32,
    /// Targets left untouched because the user declined removal.
    pub declined: u32,
}

/// Reconcile every entry's home-directory target to be a symlink pointing at
/// the entry's location in the configuration store.
///
/// Entries are processed in the order given; each entry's outcome is
/// reported before the next is examined.
///
/// # Errors
///
/// Returns an error on the first failed file-system mutation or failed
/// confirmation read; entries already converged are unaffected.
pub fn reconcile(
    files: &[TrackedFile],
    home: &Path,
    opts: LinkOptions,
    prompt: &dyn Confirm,
    log: &Logger,
) -> Result<LinkStats> {
    let mut stats = LinkStats::default();

    for file in files {
        let source = file.source();
        let target = file.target(home);

        match target_state(&target, &source)? {
            TargetState::Directory => {
                log.warn(&format!("skipping dir \"{}\"", target.display()));
                stats.skipped_dirs += 1;
                continue;
            }
            TargetState::AlreadyLinked => {
                log.info(&format!("already linked \"{}\"", target.display()));
                stats.already_linked += 1;
                continue;
            }
            TargetState::Occupied { is_symlink } => {
                let confirmed = opts.force
                    || prompt
                        .confirm(
                            &format!("remove file at \"{}\"?", target.display()),
                            Answer::Yes,
                        )
                        .context("reading confirmation")?;
                if !confirmed {
                    log.warn(&format!("not linking \"{}\"", target.display()));
                    stats.declined += 1;
                    continue;
                }

                if opts.backup && !is_symlink {
                    let saved = backup_path(&target);
                    std::fs::rename(&target, &saved).with_context(|| {
                        format!("moving \"{}\" to \"{}\"", target.display(), saved.display())
                    })?;
                    log.debug(&format!("moved \"{}\"", target.display()));
                } else {
                    fsutil::remove_existing(&target)?;
                    log.debug(&format!("removed \"{}\"", target.display()));
                }
            }
            TargetState::Absent => {
                log.debug(&format!("nothing at \"{}\"", target.display()));
            }
        }

        fsutil::create_symlink(&source, &target)?;
        log.debug(&format!(
            "created \"{}\" -> \"{}\"",
            target.display(),
            source.display()
        ));
        stats.created += 1;
    }

    log.info(&format!(
        "{} linked, {} already ok, {} dirs skipped, {} declined",
        stats.created, stats.already_linked, stats.skipped_dirs, stats.declined
    ));
    Ok(stats)
}

/// Classify what occupies `target` relative to the intended `source`.
fn target_state(target: &Path, source: &Path) -> Result<TargetState> {
    let meta = match std::fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TargetState::Absent),
        Err(e) => {
            return Err(e).with_context(|| format!("inspecting \"{}\"", target.display()));
        }
    };

    if meta.is_symlink() {
        let dest = std::fs::read_link(target)
            .with_context(|| format!("reading link \"{}\"", target.display()))?;
        if dest == source {
            Ok(TargetState::AlreadyLinked)
        } else {
            Ok(TargetState::Occupied { is_symlink: true })
        }
    } else if meta.is_dir() {
        Ok(TargetState::Directory)
    } else {
        Ok(TargetState::Occupied { is_symlink: false })
    }
}

/// Append `.bk` to the final path component.
fn backup_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".bk");
    PathBuf::from(name)
}
