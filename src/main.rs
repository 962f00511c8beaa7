use clap::Parser;

use boxup_cli::cli::{Cli, Command};
use boxup_cli::logging::{self, Logger};
use boxup_cli::{commands, error};

fn main() {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = command_name(&args.command);
    logging::init_subscriber(args.verbose, command);
    let log = Logger::new(command);

    if let Err(e) = run(&args, &log) {
        log.error(&format!("{e:#}"));
        if let Some(path) = log.log_path() {
            log.debug(&format!("log: {}", path.display()));
        }
        std::process::exit(error::exit_code(&e));
    }
}

fn run(args: &Cli, log: &Logger) -> anyhow::Result<()> {
    match &args.command {
        Command::Init(opts) => commands::init::run(&args.global, opts, log),
        Command::Store(opts) => commands::store::run(&args.global, opts, log),
        Command::Link(opts) => commands::link::run(&args.global, opts, log),
        Command::Package(opts) => commands::package::run(&args.global, opts, log),
        Command::Clean(opts) => commands::clean::run(&args.global, opts, log),
        Command::Version => {
            let version = option_env!("BOXUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("boxup {version}");
            Ok(())
        }
    }
}

const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Init(_) => "init",
        Command::Store(_) => "store",
        Command::Link(_) => "link",
        Command::Package(_) => "package",
        Command::Clean(_) => "clean",
        Command::Version => "version",
    }
}
