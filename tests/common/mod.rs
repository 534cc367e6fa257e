// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed run file, a fluent builder, an
// executor that records instead of spawning, and an in-memory log.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dotbrew::cli::GlobalOpts;
use dotbrew::command::CommandLine;
use dotbrew::config::Config;
use dotbrew::error::ExecError;
use dotbrew::exec::{ExecResult, Executor, Streams};
use dotbrew::logging::{Log, TaskEntry, TaskStatus};

/// An isolated run file backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `dotbrew.toml` and any extra files.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the directory holding the run file.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the run file.
    pub fn run_file(&self) -> PathBuf {
        self.root.path().join("dotbrew.toml")
    }

    /// Global options pointing at this context's run file.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.run_file()),
            base_dir: None,
            dry_run,
        }
    }

    /// Load the run file and resolve its base directory.
    pub fn load_config(&self) -> Config {
        Config::load(Some(&self.run_file()), None).expect("load config")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
    run_file: String,
}

impl TestContextBuilder {
    /// Begin building a context with an empty run file.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext {
                root: tempfile::tempdir().expect("create temp dir"),
            },
            run_file: String::new(),
        }
    }

    /// Append raw TOML to the run file.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.run_file.push_str(toml);
        self.run_file.push('\n');
        self
    }

    /// Append a `[[steps]]` entry.
    pub fn with_step(mut self, directive: &str, items: &[&str]) -> Self {
        let items = items
            .iter()
            .map(|i| format!("{i:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.run_file.push_str(&format!(
            "[[steps]]\ndirective = {directive:?}\nitems = [{items}]\n\n"
        ));
        self
    }

    /// Create a file next to the run file (e.g. a Brewfile).
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
        self
    }

    /// Write the run file and return the context.
    pub fn build(self) -> IntegrationTestContext {
        std::fs::write(self.ctx.run_file(), &self.run_file).expect("write run file");
        self.ctx
    }
}

/// One call made against a [`RecordingExecutor`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The command as it would be displayed.
    pub command: String,
    /// Working directory it ran in.
    pub dir: PathBuf,
    /// Stream redirections it ran with.
    pub streams: Streams,
}

/// An [`Executor`] that never spawns anything.
///
/// Programs in `present` are reported as found on `PATH`. A command fails
/// when its display form contains any string in `failing`.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    present: HashSet<String>,
    failing: Vec<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingExecutor {
    /// Executor on which `brew` and `mas` are both installed.
    pub fn with_brew_and_mas() -> Self {
        Self::default().present("brew").present("mas")
    }

    /// Report `program` as found on `PATH`.
    pub fn present(mut self, program: &str) -> Self {
        self.present.insert(program.to_string());
        self
    }

    /// Fail every command whose display form contains `needle`.
    pub fn failing(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Display form of every command run so far.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }
}

impl Executor for RecordingExecutor {
    fn status(
        &self,
        command: &CommandLine,
        dir: &Path,
        streams: Streams,
    ) -> Result<ExecResult, ExecError> {
        let display = command.to_string();
        let success = !self.failing.iter().any(|f| display.contains(f.as_str()));
        self.calls.lock().expect("calls lock").push(RecordedCall {
            command: display,
            dir: dir.to_path_buf(),
            streams,
        });
        Ok(ExecResult {
            success,
            code: Some(i32::from(!success)),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.present.contains(program)
    }
}

/// A [`Log`] that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(&'static str, String)>>,
    tasks: Mutex<Vec<TaskEntry>>,
}

impl MemoryLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level`, in order.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("lines lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded step results.
    pub fn tasks(&self) -> Vec<TaskEntry> {
        self.tasks.lock().expect("tasks lock").clone()
    }

    /// Status of every recorded step, in order.
    pub fn statuses(&self) -> Vec<TaskStatus> {
        self.tasks().into_iter().map(|t| t.status).collect()
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.tasks.lock().expect("tasks lock").push(TaskEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}
