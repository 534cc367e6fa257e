//! Log file locations, rotation, ANSI stripping and timestamps.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the previous run's log when a new run starts.
const ROTATED_SUFFIX: &str = "1";

/// Remove terminal escape sequences so the log file stays plain text.
///
/// CSI sequences (`ESC [` … final byte in `@`..=`~`) are dropped whole; any
/// other escape drops only the byte that follows `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    enum State {
        Text,
        Escape,
        Csi,
    }

    let mut state = State::Text;
    s.chars()
        .filter(|&c| match state {
            State::Text if c == '\x1b' => {
                state = State::Escape;
                false
            }
            State::Text => true,
            State::Escape => {
                state = if c == '[' { State::Csi } else { State::Text };
                false
            }
            State::Csi => {
                if ('@'..='~').contains(&c) {
                    state = State::Text;
                }
                false
            }
        })
        .collect()
}

/// `$XDG_CACHE_HOME/dotbrew`, falling back to `$HOME/.cache/dotbrew`.
///
/// Only computes the path; nothing is created. `None` when neither variable
/// gives an absolute directory.
pub(super) fn cache_dir() -> Option<PathBuf> {
    cache_dir_from(std::env::var_os("XDG_CACHE_HOME"), std::env::var_os("HOME"))
}

fn cache_dir_from(
    xdg_cache_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    xdg_cache_home
        .map(PathBuf::from)
        .filter(|dir| dir.is_absolute())
        .or_else(|| {
            home.map(PathBuf::from)
                .filter(|dir| dir.is_absolute())
                .map(|dir| dir.join(".cache"))
        })
        .map(|dir| dir.join("dotbrew"))
}

/// Log file for `command`, e.g. `~/.cache/dotbrew/install.log`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(format!("{command}.log")))
}

/// `1 step`, `2 steps`. Only for nouns that take a plain `s`.
#[must_use]
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Move an existing log at `path` aside to `<path>.1`, replacing any older
/// rotated copy, and make sure the parent directory exists.
pub(super) fn prepare_log_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if path.is_file() {
        let mut rotated = path.as_os_str().to_owned();
        rotated.push(".");
        rotated.push(ROTATED_SUFFIX);
        std::fs::rename(path, rotated)?;
    }
    Ok(())
}

/// Current UTC time for the log header, `2026-01-31 23:59:59 UTC`.
pub(super) fn header_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Current UTC time for each log line, `23:59:59.123`.
pub(super) fn line_timestamp() -> String {
    chrono::Utc::now().format("%H:%M:%S%.3f").to_string()
}
