//! The `clean` command: remove broken home-directory symlinks.

use anyhow::Result;

use crate::cli::{CleanOpts, GlobalOpts};
use crate::clean;
use crate::logging::Logger;
use crate::paths;
use crate::prompt::StdinPrompt;

/// Run the clean command.
///
/// Clean operates on the home directory only and does not touch the store,
/// so it skips the configuration setup entirely.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or a
/// confirmed removal fails.
pub fn run(_global: &GlobalOpts, opts: &CleanOpts, log: &Logger) -> Result<()> {
    let home = paths::home_dir()?;

    log.stage("Cleaning broken links");
    clean::clean(&home, opts.force, &StdinPrompt, log)?;
    Ok(())
}
