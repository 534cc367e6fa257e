//! `dotbrew` binary entry point.
use anyhow::Result;
use clap::Parser;

use dotbrew::cli::{self, Command};
use dotbrew::commands;
use dotbrew::exec::SystemExecutor;
use dotbrew::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command_name = match &args.command {
        Command::Install(_) => "install",
        Command::Plan(_) => "plan",
        Command::Check => "check",
        Command::Completions { shell } => {
            commands::completions::run(*shell);
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };

    let log = Logger::new(init_subscriber(args.verbose, command_name));

    match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, &SystemExecutor::new(), &log),
        Command::Plan(opts) => commands::plan::run(&args.global, opts, &log),
        Command::Check => commands::check::run(&args.global, &log),
        Command::Completions { .. } | Command::Version => Ok(()),
    }
}
