//! Step results and the [`Log`] trait installers write through.

/// Outcome of one run file step, as shown in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Step label, e.g. `"cask (3 items)"`.
    pub name: String,
    /// How the step ended.
    pub status: TaskStatus,
    /// Extra detail such as a skip reason.
    pub message: Option<String>,
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Every item succeeded.
    Ok,
    /// Not run: the directive is unknown.
    Skipped,
    /// Commands were only printed.
    DryRun,
    /// The prerequisite or at least one item failed.
    Failed,
}

impl TaskStatus {
    /// Summary marker.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Skipped => "-",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }

    /// SGR color code used for this status on the console.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Ok => "32",
            Self::Skipped => "33",
            Self::DryRun => "36",
            Self::Failed => "31",
        }
    }
}

/// Sink for everything installers and commands report.
///
/// [`Logger`](super::Logger) routes these through `tracing`; tests use
/// in-memory implementations.
pub trait Log: Send + Sync {
    /// Section header, e.g. the directive being run.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail shown only with `--verbose`, always kept in the log file.
    fn debug(&self, msg: &str);
    /// Recoverable problem, e.g. a failed item.
    fn warn(&self, msg: &str);
    /// Problem that aborts a directive, e.g. a failed prerequisite install.
    fn error(&self, msg: &str);
    /// A command that would have run without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Remember a step outcome for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
