//! Command-line construction, kept separate from execution.
//!
//! Installers build [`CommandLine`] values and hand them to an
//! [`Executor`](crate::exec::Executor). Arguments are passed to the child as
//! an argument vector, never interpolated into a shell string, so package
//! names cannot inject shell syntax.
use std::fmt;

/// Program used to force x86_64 execution under Rosetta 2.
pub const ARCH_PROGRAM: &str = "arch";

/// Flag passed to [`ARCH_PROGRAM`] to select the x86_64 slice.
pub const ARCH_X86_64_FLAG: &str = "-x86_64";

/// A program, its argument vector and extra environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl CommandLine {
    /// Start a command line for `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Wrap this command so it runs as `arch -x86_64 <program> <args…>`.
    ///
    /// Environment variables stay attached to the outer command and are
    /// inherited by the wrapped program.
    #[must_use]
    pub fn force_intel(self) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 2);
        args.push(ARCH_X86_64_FLAG.to_string());
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: ARCH_PROGRAM.to_string(),
            args,
            env: self.env,
        }
    }

    /// Apply [`force_intel`](Self::force_intel) when `enabled` is true.
    #[must_use]
    pub fn force_intel_if(self, enabled: bool) -> Self {
        if enabled { self.force_intel() } else { self }
    }

    /// The program to spawn.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector, without the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Extra environment variables.
    #[must_use]
    pub fn envs(&self) -> &[(String, String)] {
        &self.env
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", quote(value))?;
        }
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote `s` for display if it contains anything a POSIX shell would treat
/// specially. Display only; never fed back to a shell.
fn quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '+' | '@' | ',')
        });
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// The command(s) run for one item: a primary command and an optional
/// fallback that runs only when the primary fails.
///
/// This is `primary || fallback` without a shell: the plan succeeds if
/// either command exits 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    /// Command tried first.
    pub primary: CommandLine,
    /// Command tried only when `primary` does not succeed.
    pub fallback: Option<CommandLine>,
}

impl CommandPlan {
    /// A plan with a single command.
    #[must_use]
    pub const fn single(primary: CommandLine) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// A plan with a fallback command.
    #[must_use]
    pub const fn with_fallback(primary: CommandLine, fallback: CommandLine) -> Self {
        Self {
            primary,
            fallback: Some(fallback),
        }
    }

    /// Apply [`CommandLine::force_intel`] to every command in the plan.
    #[must_use]
    pub fn force_intel_if(self, enabled: bool) -> Self {
        Self {
            primary: self.primary.force_intel_if(enabled),
            fallback: self.fallback.map(|f| f.force_intel_if(enabled)),
        }
    }

    /// Iterate the commands in execution order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        std::iter::once(&self.primary).chain(self.fallback.as_ref())
    }
}

impl fmt::Display for CommandPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(fallback) = &self.fallback {
            write!(f, " || {fallback}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_program_and_args() {
        let cmd = CommandLine::new("brew").arg("install").args(["--cask", "iterm2"]);
        assert_eq!(cmd.program(), "brew");
        assert_eq!(cmd.arguments(), ["install", "--cask", "iterm2"]);
        assert!(cmd.envs().is_empty());
    }

    #[test]
    fn force_intel_wraps_program_with_arch() {
        let cmd = CommandLine::new("brew").args(["install", "git"]).force_intel();
        assert_eq!(cmd.program(), "arch");
        assert_eq!(cmd.arguments(), ["-x86_64", "brew", "install", "git"]);
        assert_eq!(cmd.to_string(), "arch -x86_64 brew install git");
    }

    #[test]
    fn force_intel_keeps_env() {
        let cmd = CommandLine::new("/bin/bash")
            .env("NONINTERACTIVE", "1")
            .force_intel();
        assert_eq!(cmd.envs(), [("NONINTERACTIVE".to_string(), "1".to_string())]);
    }

    #[test]
    fn force_intel_if_false_is_identity() {
        let cmd = CommandLine::new("mas").args(["install", "497799835"]);
        assert_eq!(cmd.clone().force_intel_if(false), cmd);
    }

    #[test]
    fn display_quotes_special_arguments() {
        let cmd = CommandLine::new("brew").args(["install", "it's; rm -rf /"]);
        assert_eq!(cmd.to_string(), r"brew install 'it'\''s; rm -rf /'");
    }

    #[test]
    fn display_quotes_empty_argument() {
        let cmd = CommandLine::new("brew").arg("");
        assert_eq!(cmd.to_string(), "brew ''");
    }

    #[test]
    fn display_includes_env_prefix() {
        let cmd = CommandLine::new("/bin/bash").env("NONINTERACTIVE", "1").arg("-c");
        assert_eq!(cmd.to_string(), "NONINTERACTIVE=1 /bin/bash -c");
    }

    #[test]
    fn plan_force_intel_applies_to_fallback() {
        let plan = CommandPlan::with_fallback(
            CommandLine::new("brew").args(["install", "--cask", "firefox"]),
            CommandLine::new("brew").args(["ls", "--cask", "--versions", "firefox"]),
        )
        .force_intel_if(true);
        assert!(plan.commands().all(|c| c.program() == "arch"));
        assert_eq!(plan.commands().count(), 2);
    }

    #[test]
    fn plan_display_joins_with_or() {
        let plan = CommandPlan::with_fallback(
            CommandLine::new("brew").args(["install", "--cask", "firefox"]),
            CommandLine::new("brew").args(["ls", "--cask", "--versions", "firefox"]),
        );
        assert_eq!(
            plan.to_string(),
            "brew install --cask firefox || brew ls --cask --versions firefox"
        );
    }
}
