//! Domain-specific error types for the boxup engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`PackageError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator. Exit-status mapping for
//! the whole process lives in [`exit_code`].

use std::path::PathBuf;

use thiserror::Error;

/// Process exit status for a generic failure.
pub const EXIT_FAILURE: i32 = 1;

/// Process exit status for a privileged-access failure, distinct from
/// [`EXIT_FAILURE`] so a wrapper can suggest retrying with elevated rights.
pub const EXIT_NEEDS_PRIVILEGE: i32 = 13;

/// Errors that invalidate the whole invocation before any mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An `env` or `box` value is not a single path segment.
    #[error("invalid {field} name '{value}': must be a single path segment")]
    InvalidName {
        /// Which argument carried the bad value (`env` or `box`).
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A required value was neither passed on the CLI nor set in the environment.
    #[error("{flag} not given and ${var} is not set")]
    MissingValue {
        /// CLI flag that would supply the value.
        flag: &'static str,
        /// Environment variable consulted as a fallback.
        var: &'static str,
    },

    /// The configuration store root does not exist.
    #[error("configuration root '{}' does not exist", .0.display())]
    MissingConfRoot(PathBuf),

    /// The box directory does not exist (and the command is not `init`).
    #[error("box directory '{}' does not exist; use the `init` command to create it", .0.display())]
    MissingBoxDir(PathBuf),

    /// A path expected to be a directory is something else.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a store directory.
    #[error("reading store directory '{}': {source}", .path.display())]
    Io {
        /// Directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by the package adapter registry.
#[derive(Error, Debug)]
pub enum PackageError {
    /// The requested action is not implemented by the selected adapter.
    /// Reported distinctly from a generic failure so the operator understands
    /// it is a feature gap, not a bug.
    #[error("action '{action}' is not available for '{category}'")]
    Unsupported {
        /// Adapter category name.
        category: &'static str,
        /// Requested action name.
        action: &'static str,
    },

    /// The underlying tool needs elevated rights for this action.
    #[error("'{category}' needs elevated privileges; retry the command with elevated rights")]
    NeedsPrivilege {
        /// Adapter category name.
        category: &'static str,
    },

    /// The adapter's manifest file has not been created yet.
    #[error("no manifest at '{}'; run the `backup` action first", .0.display())]
    MissingManifest(PathBuf),
}

/// Map an error chain to the process exit status.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(pkg_err) = cause.downcast_ref::<PackageError>()
            && matches!(pkg_err, PackageError::NeedsPrivilege { .. })
        {
            return EXIT_NEEDS_PRIVILEGE;
        }
    }
    EXIT_FAILURE
}
