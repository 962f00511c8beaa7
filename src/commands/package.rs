//! The `package` command: dispatch to one package adapter.

use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::{GlobalOpts, PackageOpts};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::pkg::{self, Runtime};

/// Run the package command.
///
/// Ensures the box's `pkg/` directory exists, constructs the adapter for
/// the requested category, and runs the action behind a mandatory `verify`.
///
/// # Errors
///
/// Returns an error on invalid configuration, failed verification, an
/// unsupported action, or a failed adapter command.
pub fn run(global: &GlobalOpts, opts: &PackageOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, true, log)?;

    let pkg_dir = setup.dirs.pkg_dir();
    std::fs::create_dir_all(&pkg_dir)
        .with_context(|| format!("creating \"{}\"", pkg_dir.display()))?;

    let packager = pkg::adapter(opts.category, &pkg_dir);
    let exec = SystemExecutor;
    let rt = Runtime {
        exec: &exec,
        log,
    };

    log.stage(&format!("{} {}", opts.category, opts.action));
    pkg::run_action(packager.as_ref(), opts.action, &rt)
}
