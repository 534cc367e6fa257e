//! Command: run every step of the run file.
use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::exec::Executor;
use crate::logging::{Log, Logger, TaskStatus, plural};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the run file cannot be loaded or any step failed.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, executor: &dyn Executor, log: &Logger) -> Result<()> {
    let version = super::version::version();
    log.info(&format!("dotbrew {version}"));

    log.stage("Loading run file");
    let setup = super::CommandSetup::init(global, log)?;
    log.info(&format!(
        "loaded {} from {} ({})",
        plural(setup.config.run.steps.len(), "step"),
        setup.config.path.display(),
        setup.platform.os
    ));

    run_steps(&setup.config, opts, global.dry_run, executor, log);

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{} failed", plural(count, "step"));
    }
    Ok(())
}

/// Dispatch every selected step in file order, recording one summary entry
/// per step.
pub fn run_steps(
    config: &Config,
    opts: &InstallOpts,
    dry_run: bool,
    executor: &dyn Executor,
    log: &dyn Log,
) {
    let dispatcher = Dispatcher::new(
        executor,
        log,
        &config.base_dir,
        &config.run.defaults,
        dry_run,
    );

    for step in &config.run.steps {
        let name = step.directive.as_str();
        if !opts.selects(name) {
            log.debug(&format!("skipping {name}: filtered out"));
            continue;
        }

        let label = format!("{name} ({})", plural(step.items.len(), "item"));
        if !dispatcher.can_handle(name) {
            log.warn(&format!("unknown directive '{name}', skipping"));
            log.record_task(&label, TaskStatus::Skipped, Some("unknown directive"));
            continue;
        }

        log.stage(&format!("Running {name}"));
        match dispatcher.handle(name, &step.items) {
            Ok(true) if dry_run => log.record_task(&label, TaskStatus::DryRun, None),
            Ok(true) => log.record_task(&label, TaskStatus::Ok, None),
            Ok(false) => log.record_task(&label, TaskStatus::Failed, Some("see warnings above")),
            Err(e) => {
                log.warn(&e.to_string());
                log.record_task(&label, TaskStatus::Skipped, Some("unknown directive"));
            }
        }
    }
}
