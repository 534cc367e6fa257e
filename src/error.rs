//! Domain-specific error types for dotbrew.
//!
//! Library modules return typed errors (e.g., [`ConfigError`], [`ExecError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotbrewError
//! ├── Config(ConfigError)       : run file discovery, parsing, base directory
//! ├── Directive(DirectiveError) : unrecognised directive names
//! └── Exec(ExecError)           : process spawn failures
//! ```
//!
//! Per-item install failures are not errors: installers report them as a
//! `false` aggregate result and a logged warning.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for dotbrew.
#[derive(Error, Debug)]
pub enum DotbrewError {
    /// Run file or base directory problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A directive name could not be dispatched.
    #[error("Directive error: {0}")]
    Directive(#[from] DirectiveError),

    /// A child process could not be started.
    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),
}

/// Errors that arise from locating and loading the run file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No run file was given and none was found in the default locations.
    #[error("no run file found (looked for {0})")]
    NotFound(String),

    /// The run file exists but could not be read.
    #[error("IO error reading run file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The run file is not valid TOML or does not match the expected schema.
    #[error("Invalid run file {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The base directory does not exist or cannot be resolved.
    #[error("Invalid base directory {path}: {source}")]
    BaseDir {
        /// The directory as configured.
        path: PathBuf,
        /// Underlying I/O error from canonicalization.
        source: std::io::Error,
    },
}

/// Errors that arise when dispatching a directive by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// The name is not one of the recognised directives.
    #[error("unrecognised directive '{0}'")]
    Unknown(String),
}

/// Errors that arise when starting a child process.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be spawned (missing binary, bad working directory, …).
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error from the spawn call.
        source: std::io::Error,
    },
}
