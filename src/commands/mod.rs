//! Top-level subcommand orchestration.
//!
//! Each command module is a thin wrapper: it resolves shared state through
//! [`CommandSetup`] and hands off to the core modules ([`crate::link`],
//! [`crate::store`], [`crate::clean`], [`crate::pkg`]).

pub mod clean;
pub mod init;
pub mod link;
pub mod package;
pub mod store;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::error::ConfigError;
use crate::logging::Logger;
use crate::paths::{self, ConfDirs};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates store-layout resolution and existence validation so that
/// each command does not have to repeat the boilerplate. Validation happens
/// here, before any command mutates anything.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved configuration store layout.
    pub dirs: ConfDirs,
    /// User's home directory.
    pub home: PathBuf,
}

impl CommandSetup {
    /// Resolve the store layout and home directory from CLI arguments and
    /// environment variables.
    ///
    /// `require_box` is `false` only for `init`, which creates the box
    /// directory instead of requiring it.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ConfigError`] if a required value is missing or
    /// invalid, the configuration root does not exist, or the box directory
    /// is required but absent.
    pub fn init(global: &GlobalOpts, require_box: bool, log: &Logger) -> Result<Self> {
        let conf = resolve_conf(global);
        let env = resolve_value(global.env.as_deref(), "--env", "BOXUP_ENV")?;
        let box_name = resolve_value(global.box_name.as_deref(), "--box", "BOXUP_BOX")?;
        let dirs = ConfDirs::resolve(&conf, &env, &box_name)?;

        if !dirs.root.is_dir() {
            return Err(ConfigError::MissingConfRoot(dirs.root.clone()).into());
        }
        if require_box && !dirs.box_dir.is_dir() {
            return Err(ConfigError::MissingBoxDir(dirs.box_dir.clone()).into());
        }

        log.debug(&format!("conf root: {}", dirs.root.display()));
        log.debug(&format!("box dir: {}", dirs.box_dir.display()));

        Ok(Self {
            dirs,
            home: paths::home_dir()?,
        })
    }
}

/// Resolve the configuration store root: flag, then `$BOXUP_CONF`, then a
/// `conf/` directory next to the binary.
fn resolve_conf(global: &GlobalOpts) -> PathBuf {
    if let Some(conf) = &global.conf {
        return conf.clone();
    }
    if let Ok(conf) = std::env::var("BOXUP_CONF")
        && !conf.is_empty()
    {
        return PathBuf::from(conf);
    }
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        return dir.join("conf");
    }
    PathBuf::from("conf")
}

/// Resolve a single required value: flag first, then environment variable.
fn resolve_value(
    arg: Option<&str>,
    flag: &'static str,
    var: &'static str,
) -> Result<String, ConfigError> {
    if let Some(value) = arg {
        return Ok(value.to_string());
    }
    if let Ok(value) = std::env::var(var)
        && !value.is_empty()
    {
        return Ok(value);
    }
    Err(ConfigError::MissingValue { flag, var })
}
