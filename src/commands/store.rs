//! The `store` command: move a home-directory entry into the store.

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, StoreOpts};
use crate::logging::Logger;
use crate::prompt::StdinPrompt;
use crate::store;

/// Run the store command.
///
/// # Errors
///
/// Returns an error on invalid configuration, a boundary violation, or a
/// failed mutation.
pub fn run(global: &GlobalOpts, opts: &StoreOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, true, log)?;

    let dest_dir = if opts.global {
        &setup.dirs.global_dir
    } else {
        &setup.dirs.box_dir
    };

    log.stage("Storing");
    store::store(
        &opts.target,
        dest_dir,
        &setup.home,
        opts.force,
        &StdinPrompt,
        log,
    )?;
    Ok(())
}
