//! The `init` command: create store directories for a new box.

use anyhow::{Result, bail};

use super::CommandSetup;
use crate::cli::{GlobalOpts, InitOpts};
use crate::error::ConfigError;
use crate::fsutil;
use crate::logging::Logger;

/// Run the init command.
///
/// Creates the `global/` and `boxes/<env>/<box>/` directories when missing.
/// With `--clone`, the new box directory is copied from an existing box
/// instead of being created empty.
///
/// # Errors
///
/// Returns an error if the configuration root is missing, a file occupies a
/// directory path, the clone source is absent, or the clone target already
/// exists.
pub fn run(global: &GlobalOpts, opts: &InitOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, false, log)?;
    let dirs = &setup.dirs;

    if dirs.global_dir.is_file() {
        return Err(ConfigError::NotADirectory(dirs.global_dir.clone()).into());
    }
    if dirs.box_dir.is_file() {
        return Err(ConfigError::NotADirectory(dirs.box_dir.clone()).into());
    }

    log.stage("Initializing store");
    if dirs.global_dir.is_dir() {
        log.debug(&format!("exists {}", dirs.global_dir.display()));
    } else {
        std::fs::create_dir_all(&dirs.global_dir)?;
        log.info(&format!("created {}", dirs.global_dir.display()));
    }

    if let Some(clone) = &opts.clone {
        let [env, box_name] = clone.as_slice() else {
            bail!("--clone takes exactly two values: ENV BOX");
        };
        let source = dirs.sibling_box(env, box_name)?;
        if !source.is_dir() {
            return Err(ConfigError::MissingBoxDir(source).into());
        }
        if dirs.box_dir.exists() {
            bail!(
                "cannot clone into existing location at \"{}\"",
                dirs.box_dir.display()
            );
        }
        fsutil::copy_dir_recursive(&source, &dirs.box_dir)?;
        log.info(&format!("cloned into {}", dirs.box_dir.display()));
    } else if dirs.box_dir.is_dir() {
        log.debug(&format!("exists {}", dirs.box_dir.display()));
    } else {
        std::fs::create_dir_all(&dirs.box_dir)?;
        log.info(&format!("created {}", dirs.box_dir.display()));
    }

    Ok(())
}
