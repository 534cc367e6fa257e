//! `tracing` wiring: Homebrew-style console output and a plain-text log file.
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

use super::utils::{header_timestamp, line_timestamp, log_file_path, prepare_log_file, strip_ansi};

/// Target for section headers.
pub(super) const STAGE_TARGET: &str = "dotbrew::stage";

/// Target for commands printed instead of run.
pub(super) const DRY_RUN_TARGET: &str = "dotbrew::dry_run";

/// Environment variable holding an [`EnvFilter`](tracing_subscriber::EnvFilter)
/// directive for the console, e.g. `DOTBREW_LOG=debug`.
pub const LOG_ENV_VAR: &str = "DOTBREW_LOG";

/// How an event is presented, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Info,
    Debug,
    Warn,
    Error,
}

impl Kind {
    fn of(event: &tracing::Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Pulls the formatted `message` field out of an event.
#[derive(Default)]
struct Message(String);

impl Message {
    fn of(event: &tracing::Event<'_>) -> String {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor.0
    }
}

impl Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Appends every event to a log file, timestamped and without ANSI codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log at `path`, rotating the previous one aside, and
    /// write a header naming the version and `command`.
    pub(super) fn create(path: &Path, command: &str) -> io::Result<Self> {
        prepare_log_file(path)?;
        let mut file = fs::File::create(path)?;
        writeln!(
            file,
            "# dotbrew {} {command} started {}",
            crate::commands::version::version(),
            header_timestamp()
        )?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let msg = strip_ansi(&Message::of(event));
        let (level, prefix) = match Kind::of(event) {
            Kind::Stage => ("INFO", "==> "),
            Kind::DryRun => ("INFO", "would run: "),
            Kind::Info => ("INFO", ""),
            Kind::Debug => ("DEBUG", ""),
            Kind::Warn => ("WARN", ""),
            Kind::Error => ("ERROR", ""),
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{} {level:<5} {prefix}{msg}", line_timestamp());
        }
    }
}

/// Console formatter in the style of Homebrew's own output.
struct BrewStyle;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for BrewStyle
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = Message::of(event);
        match Kind::of(event) {
            Kind::Stage => writeln!(writer, "\x1b[34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "\x1b[36mWould run:\x1b[0m {msg}"),
            Kind::Info => writeln!(writer, "{msg}"),
            Kind::Debug => writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
            Kind::Warn => writeln!(writer, "\x1b[4;33mWarning\x1b[0m: {msg}"),
            Kind::Error => writeln!(writer, "\x1b[4;31mError\x1b[0m: {msg}"),
        }
    }
}

/// Install the global subscriber for a run of `command`.
///
/// The console shows `INFO` and above (`DEBUG` with `verbose`), unless
/// `DOTBREW_LOG` holds a filter directive, which then wins. Warnings and
/// errors go to stderr, the rest to stdout. The log file always receives
/// `DEBUG` and above.
///
/// Returns the log file path, or `None` if there is no cache directory or
/// the file could not be created; the run continues with console output
/// only in that case.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let console = fmt::layer()
        .event_format(BrewStyle)
        .with_writer(
            io::stderr
                .with_max_level(Level::WARN)
                .or_else(io::stdout),
        )
        .with_filter(console_filter);

    let (file, opened) = log_file_path(command)
        .and_then(|path| FileLayer::create(&path, command).ok().map(|layer| (layer, path)))
        .unzip();

    tracing_subscriber::registry()
        .with(console)
        .with(file.map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();

    opened
}
