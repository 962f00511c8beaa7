//! Dangling-Link Collector: offer removal of broken home-directory symlinks.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::fsutil;
use crate::logging::Logger;
use crate::prompt::{Answer, Confirm};

/// Scan `home` for symlinks whose resolved target no longer exists and
/// remove each one the user confirms (all of them with `force`).
///
/// Valid symlinks, regular files, and directories are never touched.
/// Returns the number of links removed.
///
/// # Errors
///
/// Returns an error if the home directory cannot be listed, a confirmation
/// read fails, or a confirmed removal fails.
pub fn clean(home: &Path, force: bool, prompt: &dyn Confirm, log: &Logger) -> Result<u32> {
    let mut entries: Vec<_> = std::fs::read_dir(home)
        .with_context(|| format!("reading \"{}\"", home.display()))?
        .collect::<Result<_, _>>()
        .with_context(|| format!("reading \"{}\"", home.display()))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut removed = 0u32;
    for entry in entries {
        let path = entry.path();
        if !path.is_symlink() {
            continue;
        }
        // `exists` follows the link, so a dangling symlink reports false.
        if path.exists() {
            continue;
        }

        let confirmed = force
            || prompt
                .confirm(&format!("unlink at \"{}\"?", path.display()), Answer::Yes)
                .context("reading confirmation")?;
        if !confirmed {
            continue;
        }

        fsutil::remove_existing(&path)?;
        log.debug(&format!("removed \"{}\"", path.display()));
        removed += 1;
    }

    log.info(&format!("{removed} broken links removed"));
    Ok(removed)
}
