//! The generic "ensure prerequisite, then run each item" routine shared by
//! every directive.
//!
//! Failure is reported, never raised: a missing prerequisite that cannot be
//! installed aborts the directive with an error log and `false`; a failing
//! item is logged as a warning and the remaining items still run.
pub mod prerequisite;

use std::path::Path;

use crate::command::{CommandLine, CommandPlan};
use crate::config::options::DirectiveOptions;
use crate::directive::Directive;
use crate::exec::Executor;
use crate::logging::Log;

use prerequisite::{Prerequisite, brew_install_command};

/// Runs directives against an [`Executor`], logging through a [`Log`].
pub struct Installer<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    base_dir: &'a Path,
    dry_run: bool,
}

impl std::fmt::Debug for Installer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .field("base_dir", &self.base_dir)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<'a> Installer<'a> {
    /// Create an installer that runs every command in `base_dir`.
    #[must_use]
    pub const fn new(
        executor: &'a dyn Executor,
        log: &'a dyn Log,
        base_dir: &'a Path,
        dry_run: bool,
    ) -> Self {
        Self {
            executor,
            log,
            base_dir,
            dry_run,
        }
    }

    /// Install every item of `directive`.
    ///
    /// Returns `true` iff the prerequisite is available and every item
    /// succeeded.
    pub fn install(&self, directive: Directive, items: &[String], options: &DirectiveOptions) -> bool {
        let prerequisite = directive.prerequisite();
        if !self.ensure_prerequisite(prerequisite, options) {
            self.log.error(&format!("failed to install {prerequisite}"));
            return false;
        }

        let mut failures = 0usize;
        for item in items {
            self.log.info(&directive.attempt_message(item));
            let plan = directive
                .item_command(item)
                .force_intel_if(options.force_intel);

            if self.dry_run {
                self.log.dry_run(&plan.to_string());
                continue;
            }

            if !self.run_plan(&plan, options) {
                self.log.warn(&directive.failure_message(item));
                failures += 1;
            }
        }

        if failures > 0 {
            self.log.debug(&format!(
                "{directive}: {failures} of {} items failed",
                items.len()
            ));
        }
        failures == 0
    }

    /// Make sure `prerequisite` is on `PATH`, installing it if needed.
    ///
    /// Checked on every call; nothing is cached between directives.
    fn ensure_prerequisite(&self, prerequisite: Prerequisite, options: &DirectiveOptions) -> bool {
        if self.executor.which(prerequisite.program()) {
            self.log.debug(&format!("{prerequisite} found on PATH"));
            return true;
        }

        self.log.info(&format!("{prerequisite} not found, installing"));
        match prerequisite {
            Prerequisite::Brew => {
                let cmd = brew_install_command(options);
                if self.dry_run {
                    self.log.dry_run(&cmd.to_string());
                    return true;
                }
                self.run_command(&cmd, options)
            }
            Prerequisite::Mas => self.install(Directive::Formula, &["mas".to_string()], options),
        }
    }

    /// Run the primary command, then the fallback only if the primary failed.
    fn run_plan(&self, plan: &CommandPlan, options: &DirectiveOptions) -> bool {
        plan.commands().enumerate().any(|(attempt, cmd)| {
            if attempt > 0 {
                self.log.debug(&format!("trying fallback: {cmd}"));
            }
            self.run_command(cmd, options)
        })
    }

    /// Run one command; `true` iff it spawned and exited 0.
    fn run_command(&self, cmd: &CommandLine, options: &DirectiveOptions) -> bool {
        self.log.debug(&format!("running: {cmd}"));
        match self.executor.status(cmd, self.base_dir, options.streams()) {
            Ok(result) => {
                if !result.success {
                    self.log.debug(&format!(
                        "`{cmd}` exited with {}",
                        result
                            .code
                            .map_or_else(|| "signal".to_string(), |c| c.to_string())
                    ));
                }
                result.success
            }
            Err(e) => {
                self.log.debug(&e.to_string());
                false
            }
        }
    }
}
