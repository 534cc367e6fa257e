//! Command-line definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for dotbrew.
#[derive(Parser, Debug)]
#[command(
    name = "dotbrew",
    about = "Declarative Homebrew and Mac App Store installer",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Run file to load (default: $DOTBREW_CONFIG, then ./dotbrew.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Working directory for every spawned command
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Preview commands without running them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every step in the run file
    Install(InstallOpts),
    /// Print the commands each step would run
    Plan(PlanOpts),
    /// Validate the run file and report warnings
    Check,
    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Skip steps with these directives
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only steps with these directives
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl InstallOpts {
    /// Whether a step with directive `name` passes the `--only`/`--skip`
    /// filters. Matching ignores case.
    #[must_use]
    pub fn selects(&self, name: &str) -> bool {
        let matches = |list: &[String]| list.iter().any(|d| d.eq_ignore_ascii_case(name));
        (self.only.is_empty() || matches(&self.only)) && !matches(&self.skip)
    }
}

/// Options for the `plan` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct PlanOpts {
    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}
