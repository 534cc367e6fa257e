//! Command: print the commands each step would run, without running them.
use std::fmt::Write as _;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, PlanOpts};
use crate::config::Config;
use crate::config::options::DirectiveOptions;
use crate::logging::Logger;

/// What one step of the run file resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    /// Directive name as written in the run file.
    pub directive: String,
    /// Package manager checked before the first item, if the directive is known.
    pub prerequisite: Option<&'static str>,
    /// Effective options, if the directive is known.
    pub options: Option<DirectiveOptions>,
    /// One entry per item, in order. Fallbacks are joined with `||`.
    pub commands: Vec<String>,
}

/// Resolve every step of `config` into its commands.
#[must_use]
pub fn build(config: &Config) -> Vec<PlannedStep> {
    config
        .run
        .steps
        .iter()
        .map(|step| match step.kind() {
            Some(directive) => {
                let options = config.run.defaults.resolve(directive);
                PlannedStep {
                    directive: step.directive.clone(),
                    prerequisite: Some(directive.prerequisite().program()),
                    options: Some(options),
                    commands: step
                        .items
                        .iter()
                        .map(|item| {
                            directive
                                .item_command(item)
                                .force_intel_if(options.force_intel)
                                .to_string()
                        })
                        .collect(),
                }
            }
            None => PlannedStep {
                directive: step.directive.clone(),
                prerequisite: None,
                options: None,
                commands: Vec::new(),
            },
        })
        .collect()
}

/// Render a plan as indented text.
#[must_use]
pub fn render_text(steps: &[PlannedStep]) -> String {
    let mut out = String::new();
    for step in steps {
        match step.prerequisite {
            Some(prerequisite) => {
                let _ = writeln!(out, "{} (requires {prerequisite})", step.directive);
                for command in &step.commands {
                    let _ = writeln!(out, "  {command}");
                }
            }
            None => {
                let _ = writeln!(out, "{}: unknown directive, skipped", step.directive);
            }
        }
    }
    out
}

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if the run file cannot be loaded or the plan cannot be
/// serialized.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &PlanOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let steps = build(&setup.config);

    if opts.json {
        let json = serde_json::to_string_pretty(&steps).context("serializing plan")?;
        println!("{json}");
    } else {
        print!("{}", render_text(&steps));
    }
    Ok(())
}
