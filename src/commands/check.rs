//! Command: validate the run file without running anything.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::{Log as _, Logger, plural};

/// Run the check command.
///
/// Warnings are printed by the shared setup; this only decides the exit
/// status.
///
/// # Errors
///
/// Returns an error if the run file cannot be loaded or any validator
/// reported a warning.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    log.stage("Checking run file");
    let setup = super::CommandSetup::init(global, log)?;

    let count = setup.warnings.len();
    if count > 0 {
        anyhow::bail!("{} found", plural(count, "configuration warning"));
    }

    log.info(&format!(
        "{}: {}, no problems found for {}",
        setup.config.path.display(),
        plural(setup.config.run.steps.len(), "step"),
        setup.platform.os
    ));
    Ok(())
}
