//! Run file loading, per-directive options and validation.
pub mod options;
pub mod runfile;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::platform::Platform;

/// A loaded run file together with where it came from and where it runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the run file that was loaded.
    pub path: PathBuf,
    /// Resolved, canonical working directory for every spawned process.
    pub base_dir: PathBuf,
    /// Parsed run file contents.
    pub run: runfile::RunFile,
}

impl Config {
    /// Locate and load the run file, then resolve the base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no run file is found, it cannot be parsed, or the
    /// base directory does not exist.
    pub fn load(config: Option<&Path>, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let path = runfile::locate(config)?;
        let run = runfile::RunFile::load(&path)?;
        let base_dir = runfile::resolve_base_dir(base_dir, &run, &path)?;
        Ok(Self {
            path,
            base_dir,
            run,
        })
    }

    /// Run every validator against this configuration.
    #[must_use]
    pub fn validate(&self, platform: &Platform) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self, platform)
    }
}
