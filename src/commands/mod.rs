//! Top-level subcommand orchestration.
pub mod check;
pub mod completions;
pub mod install;
pub mod plan;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::validation::ValidationWarning;
use crate::logging::{Log, plural};
use crate::platform::Platform;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection, run file loading and validation so that
/// each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Host the run targets.
    pub platform: Platform,
    /// Loaded run file and resolved base directory.
    pub config: Config,
    /// Problems found by the validators; never fatal on their own.
    pub warnings: Vec<ValidationWarning>,
}

impl CommandSetup {
    /// Detect the platform, then load and validate the run file.
    ///
    /// # Errors
    ///
    /// Returns an error if no run file is found, it fails to parse, or the
    /// base directory does not exist.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        Self::init_for_platform(global, Platform::detect(), log)
    }

    /// Like [`init`](Self::init), but validates against `platform` instead
    /// of the host.
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn init_for_platform(global: &GlobalOpts, platform: Platform, log: &dyn Log) -> Result<Self> {
        log.debug(&format!("platform: {} ({:?})", platform.os, platform.arch));

        let config = Config::load(global.config.as_deref(), global.base_dir.as_deref())
            .context("loading run file")?;
        log.debug(&format!("run file: {}", config.path.display()));
        log.debug(&format!("base directory: {}", config.base_dir.display()));
        log.debug(&plural(config.run.steps.len(), "step"));

        let warnings = config.validate(&platform);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {}:",
                plural(warnings.len(), "configuration warning")
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self {
            platform,
            config,
            warnings,
        })
    }
}
