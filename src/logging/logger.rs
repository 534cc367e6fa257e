//! The [`Log`] implementation used by the binary.
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::plural;

/// Sends every message through [`tracing`] and collects step results for
/// the end-of-run summary.
#[derive(Debug, Default)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

/// Per-status counts for the summary line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    ok: usize,
    skipped: usize,
    dry_run: usize,
    failed: usize,
}

impl Tally {
    fn of(tasks: &[TaskEntry]) -> Self {
        tasks.iter().fold(Self::default(), |mut tally, task| {
            match task.status {
                TaskStatus::Ok => tally.ok += 1,
                TaskStatus::Skipped => tally.skipped += 1,
                TaskStatus::DryRun => tally.dry_run += 1,
                TaskStatus::Failed => tally.failed += 1,
            }
            tally
        })
    }

    /// `3 steps: 2 ok, 1 failed`; zero counts other than `ok` are left out.
    fn line(self) -> String {
        let total = self.ok + self.skipped + self.dry_run + self.failed;
        let mut parts = vec![format!("{} ok", self.ok)];
        for (count, label) in [
            (self.dry_run, "dry-run"),
            (self.skipped, "skipped"),
            (self.failed, "failed"),
        ] {
            if count > 0 {
                parts.push(format!("{count} {label}"));
            }
        }
        format!("{}: {}", plural(total, "step"), parts.join(", "))
    }
}

impl Logger {
    /// Create a logger; `log_file` is only shown in the summary.
    #[must_use]
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            tasks: Mutex::default(),
            log_file,
        }
    }

    /// Step results recorded so far, in order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of steps recorded as [`TaskStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        Tally::of(&self.task_entries()).failed
    }

    /// Print one line per recorded step, then the totals.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");
        for task in &tasks {
            let detail = task
                .message
                .as_deref()
                .map_or_else(String::new, |m| format!(" ({m})"));
            self.info(&format!(
                "\x1b[{}m{}\x1b[0m {}{detail}",
                task.status.color(),
                task.status.symbol(),
                task.name
            ));
        }
        self.info(&Tally::of(&tasks).line());

        if let Some(path) = &self.log_file {
            self.debug(&format!("log file: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
    }
}
