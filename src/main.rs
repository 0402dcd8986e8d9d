//! `shell-commands` binary entry point.
use anyhow::Result;
use clap::Parser;

use shell_commands::cli::{Cli, Command};
use shell_commands::commands;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.command {
        Command::Install => commands::install::run(&args.global, args.verbose),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
