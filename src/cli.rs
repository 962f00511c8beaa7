use clap::{Parser, Subcommand};

use crate::pkg::{Action, Category};

/// Top-level CLI entry point for the boxup engine.
#[derive(Parser, Debug)]
#[command(
    name = "boxup",
    about = "Per-box configuration store and package manifest manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the configuration store directory (default: $BOXUP_CONF)
    #[arg(long, global = true)]
    pub conf: Option<std::path::PathBuf>,

    /// Environment name, a category of boxes (default: $BOXUP_ENV)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Box name, this machine's profile (default: $BOXUP_BOX)
    #[arg(long = "box", global = true)]
    pub box_name: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the configuration store for this box
    Init(InitOpts),
    /// Move a file from the home directory into the store and symlink it
    Store(StoreOpts),
    /// Symlink stored configuration files into the home directory
    Link(LinkOpts),
    /// Snapshot or restore installed-package manifests
    Package(PackageOpts),
    /// Remove broken symlinks from the home directory
    Clean(CleanOpts),
    /// Print version information
    Version,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Clone files from an existing box, given as two values "ENV BOX"
    #[arg(long, num_args = 2, value_names = ["ENV", "BOX"])]
    pub clone: Option<Vec<String>>,
}

/// Options for the `store` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StoreOpts {
    /// File or directory to move and symlink; must be in the home directory
    pub target: std::path::PathBuf,

    /// Store in the global scope instead of the box scope
    #[arg(short = 'g', long)]
    pub global: bool,

    /// Do not prompt before overwriting an existing stored entry
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// Also link global-scope files, before box-scope files
    #[arg(short = 'g', long)]
    pub global: bool,

    /// Do not prompt on the remove/move step
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Keep an overwritten file as "<name>.bk" instead of deleting it
    #[arg(short = 'b', long)]
    pub backup: bool,
}

/// Options for the `package` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PackageOpts {
    /// Package management category
    #[arg(value_enum)]
    pub category: Category,

    /// Operation to perform
    #[arg(value_enum)]
    pub action: Action,
}

/// Options for the `clean` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CleanOpts {
    /// Do not prompt before removing a broken symlink
    #[arg(short = 'f', long)]
    pub force: bool,
}
