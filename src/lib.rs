//! Per-box configuration store and package manifest manager.
//!
//! Manages dotfiles and installed-package manifests across environments
//! ("env") and machine profiles ("box"). The store lives under a single
//! configuration root with `global/` settings shared by every box and
//! `boxes/<env>/<box>/` settings specific to one machine.
//!
//! The public API is organised into three layers:
//!
//! - core operations — [`link`] (the reconciliation engine), [`store`],
//!   [`clean`], with discovery in [`collect`] and layout in [`paths`]
//! - **[`pkg`]** — the package adapter registry (verify / info / backup / restore)
//! - **[`commands`]** — top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod clean;
pub mod cli;
pub mod collect;
pub mod commands;
pub mod error;
pub mod exec;
pub mod fsutil;
pub mod link;
pub mod logging;
pub mod paths;
pub mod pkg;
pub mod prompt;
pub mod store;
