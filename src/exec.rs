//! Synchronous process execution behind the [`Executor`] trait.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::command::CommandLine;
use crate::error::ExecError;
use crate::installers::prerequisite::BREW_BIN_DIRS;

/// Which standard streams of the child are redirected to the null device.
///
/// A `false` flag means the stream is inherited from this process, so
/// prompts and progress output reach the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streams {
    /// Redirect stdin from the null device.
    pub stdin: bool,
    /// Redirect stdout to the null device.
    pub stdout: bool,
    /// Redirect stderr to the null device.
    pub stderr: bool,
}

impl Streams {
    /// Streams that are all suppressed.
    pub const QUIET: Self = Self {
        stdin: true,
        stdout: true,
        stderr: true,
    };
}

fn stdio(suppress: bool) -> Stdio {
    if suppress {
        Stdio::null()
    } else {
        Stdio::inherit()
    }
}

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// `true` iff the process exited with status 0.
    pub success: bool,
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

/// Abstraction over process execution so installers can be tested without
/// touching the host.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `command` in `dir` and block until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the process cannot be started.
    fn status(
        &self,
        command: &CommandLine,
        dir: &Path,
        streams: Streams,
    ) -> Result<ExecResult, ExecError>;

    /// Check if a program is available on the search path.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes with [`std::process::Command`].
///
/// Programs are looked up on `PATH` followed by the Homebrew install
/// prefixes, and children get that same `PATH`, so a `brew` bootstrapped
/// during this run is found without restarting the shell.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    search_path: OsString,
}

impl SystemExecutor {
    /// Executor searching `$PATH` plus [`BREW_BIN_DIRS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_search_path(extend_search_path(
            std::env::var_os("PATH"),
            &BREW_BIN_DIRS,
        ))
    }

    /// Executor searching exactly `search_path`, in `PATH` syntax.
    #[must_use]
    pub const fn with_search_path(search_path: OsString) -> Self {
        Self { search_path }
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Append each of `extra` to `path` unless it is already listed.
fn extend_search_path(path: Option<OsString>, extra: &[&str]) -> OsString {
    let mut dirs: Vec<PathBuf> = path
        .as_deref()
        .map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default();
    for dir in extra.iter().map(PathBuf::from) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    std::env::join_paths(&dirs).unwrap_or_else(|_| path.unwrap_or_default())
}

impl Executor for SystemExecutor {
    fn status(
        &self,
        command: &CommandLine,
        dir: &Path,
        streams: Streams,
    ) -> Result<ExecResult, ExecError> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.arguments())
            .current_dir(dir)
            .stdin(stdio(streams.stdin))
            .stdout(stdio(streams.stdout))
            .stderr(stdio(streams.stderr))
            .env("PATH", &self.search_path);
        for (key, value) in command.envs() {
            cmd.env(key, value);
        }

        let status = cmd.status().map_err(|source| ExecError::Spawn {
            command: command.to_string(),
            source,
        })?;

        Ok(ExecResult {
            success: status.success(),
            code: status.code(),
        })
    }

    fn which(&self, program: &str) -> bool {
        which::which_in(program, Some(&self.search_path), Path::new(".")).is_ok()
    }
}
