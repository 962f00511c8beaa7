//! Move a home-directory entry into the configuration store and link it back.

use std::path::Path;

use anyhow::{Context as _, Result, bail};

use crate::fsutil;
use crate::logging::Logger;
use crate::prompt::{Answer, Confirm};

/// Result of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The entry was moved into the store and replaced with a symlink.
    Stored,
    /// The user declined to overwrite an existing stored entry.
    Declined,
}

/// Move `target` from the home directory into `dest_dir` and replace it with
/// a symlink.
///
/// The target must live under `home`, must exist, and must not already be a
/// symlink. An existing stored entry of the same name prompts for overwrite
/// unless `force` is set; declining is a logged skip, not an error.
///
/// # Errors
///
/// Returns an error on a boundary violation or a failed file-system
/// mutation.
pub fn store(
    target: &Path,
    dest_dir: &Path,
    home: &Path,
    force: bool,
    prompt: &dyn Confirm,
    log: &Logger,
) -> Result<StoreOutcome> {
    let target = std::path::absolute(target)
        .with_context(|| format!("resolving \"{}\"", target.display()))?;

    if target.strip_prefix(home).is_err() {
        bail!("\"{}\" must be in \"{}\"", target.display(), home.display());
    }
    if target.is_symlink() {
        bail!("\"{}\" cannot be a symlink", target.display());
    }
    if !target.exists() {
        bail!("\"{}\" does not exist", target.display());
    }

    let Some(name) = target.file_name() else {
        bail!("\"{}\" has no file name", target.display());
    };
    let destination = dest_dir.join(name);

    if destination.symlink_metadata().is_ok() {
        let confirmed = force
            || prompt
                .confirm(
                    &format!("overwrite at \"{}\"?", destination.display()),
                    Answer::Yes,
                )
                .context("reading confirmation")?;
        if !confirmed {
            log.warn(&format!("not storing \"{}\"", target.display()));
            return Ok(StoreOutcome::Declined);
        }
        remove_destination(&destination)?;
    }

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("creating \"{}\"", dest_dir.display()))?;
    fsutil::move_path(&target, &destination)?;
    fsutil::create_symlink(&destination, &home.join(name))?;

    log.info(&format!(
        "stored \"{}\" -> \"{}\"",
        target.display(),
        destination.display()
    ));
    Ok(StoreOutcome::Stored)
}

/// Remove whatever occupies the destination path, directory trees included.
fn remove_destination(destination: &Path) -> Result<()> {
    let meta = destination
        .symlink_metadata()
        .with_context(|| format!("inspecting \"{}\"", destination.display()))?;
    if meta.is_dir() && !meta.is_symlink() {
        std::fs::remove_dir_all(destination)
            .with_context(|| format!("removing \"{}\"", destination.display()))?;
    } else {
        fsutil::remove_existing(destination)?;
    }
    Ok(())
}
