//! The `link` command: reconcile home-directory symlinks with the store.

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, LinkOpts};
use crate::collect;
use crate::link::{self, LinkOptions};
use crate::logging::Logger;
use crate::prompt::StdinPrompt;

/// Run the link command.
///
/// Collects global-scope files first (when `-g` was given), then box-scope
/// files, and hands the combined sequence to the reconciliation engine. Both
/// scopes are validated before any mutation; a box entry sharing a name with
/// a global entry is processed second and wins.
///
/// # Errors
///
/// Returns an error on invalid configuration or a failed mutation.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, true, log)?;

    log.stage("Collecting files");
    let mut files = Vec::new();
    if opts.global {
        files.extend(collect::collect_files(&setup.dirs.global_dir)?);
    }
    files.extend(collect::collect_files(&setup.dirs.box_dir)?);
    log.info(&format!("{} entries tracked", files.len()));

    log.stage("Linking");
    let options = LinkOptions {
        force: opts.force,
        backup: opts.backup,
    };
    link::reconcile(&files, &setup.home, options, &StdinPrompt, log)?;
    Ok(())
}
