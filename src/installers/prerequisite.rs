//! Package managers that must exist before a directive can run.
use std::fmt;

use crate::command::CommandLine;
use crate::config::options::DirectiveOptions;

/// Official Homebrew install script.
pub const BREW_INSTALL_URL: &str = "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Where the install script puts `brew`: Apple Silicon, Intel macOS, Linux.
///
/// None of these is on `PATH` until the user's shell profile is updated.
pub const BREW_BIN_DIRS: [&str; 3] = [
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/home/linuxbrew/.linuxbrew/bin",
];

/// A package manager binary a directive depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    /// Homebrew.
    Brew,
    /// Mac App Store CLI, installed through Homebrew.
    Mas,
}

impl Prerequisite {
    /// Binary looked up on `PATH` to decide whether it is present.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Mas => "mas",
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Build the Homebrew bootstrap command.
///
/// This is the only command that goes through a shell: the install script is
/// fetched with `$(curl …)` and `brew update` runs only if it succeeds. No
/// user input is interpolated. The fresh install prefixes are put on `PATH`
/// first so `brew update` finds the new binary. With stdin suppressed the
/// script cannot prompt, so it is told to run non-interactively.
#[must_use]
pub fn brew_install_command(options: &DirectiveOptions) -> CommandLine {
    let script = format!(
        "/bin/bash -c \"$(curl -fsSL {BREW_INSTALL_URL})\" && PATH=\"{}:$PATH\" brew update",
        BREW_BIN_DIRS.join(":")
    );
    let cmd = CommandLine::new("/bin/bash").args(["-c", script.as_str()]);
    let cmd = if options.stdin {
        cmd.env("NONINTERACTIVE", "1")
    } else {
        cmd
    };
    cmd.force_intel_if(options.force_intel)
}
