//! TOML run file parsing.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::options::UserDefaults;
use crate::directive::Directive;
use crate::error::ConfigError;

/// Name of the run file looked up in the current directory.
pub const DEFAULT_FILE_NAME: &str = "dotbrew.toml";

/// Environment variable that points at a run file.
pub const CONFIG_ENV_VAR: &str = "DOTBREW_CONFIG";

/// One `[[steps]]` entry: a directive name and its items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Directive name. Kept as a string so unknown names can be reported
    /// rather than rejected at parse time.
    pub directive: String,
    /// Items passed to the directive, in order.
    #[serde(default)]
    pub items: Vec<String>,
}

impl Step {
    /// The parsed directive, if the name is recognised.
    #[must_use]
    pub fn kind(&self) -> Option<Directive> {
        Directive::from_name(&self.directive)
    }
}

/// A parsed run file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    /// Working directory for spawned processes, relative to the run file.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Per-directive option overrides.
    #[serde(default)]
    pub defaults: UserDefaults,
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl RunFile {
    /// Parse a run file from TOML text. `path` is used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid run file.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Read and parse the run file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid run file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }
}

/// Locate the run file: explicit path, then `$DOTBREW_CONFIG`, then
/// `./dotbrew.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no candidate exists.
pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    locate_from(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        Path::new(""),
    )
}

/// [`locate`] with the environment value and search directory supplied.
fn locate_from(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    dir: &Path,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }

    let candidate = dir.join(DEFAULT_FILE_NAME);
    if candidate.is_file() {
        return Ok(candidate);
    }

    Err(ConfigError::NotFound(format!(
        "--config, ${CONFIG_ENV_VAR}, ./{DEFAULT_FILE_NAME}"
    )))
}

/// Resolve the base directory for a run.
///
/// Precedence: `explicit` (relative to the current directory), then
/// `base_dir` from the run file (relative to the run file's directory), then
/// the run file's directory itself.
///
/// # Errors
///
/// Returns [`ConfigError::BaseDir`] if the chosen directory does not exist.
pub fn resolve_base_dir(
    explicit: Option<&Path>,
    run_file: &RunFile,
    run_file_path: &Path,
) -> Result<PathBuf, ConfigError> {
    let parent = run_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let chosen = match (explicit, &run_file.base_dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => parent.join(dir),
        (None, None) => parent.to_path_buf(),
    };

    let canonical = dunce::canonicalize(&chosen).map_err(|source| ConfigError::BaseDir {
        path: chosen.clone(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(ConfigError::BaseDir {
            path: chosen,
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(canonical)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<RunFile, ConfigError> {
        RunFile::parse(content, Path::new("dotbrew.toml"))
    }

    #[test]
    fn parse_empty_file() {
        let run = parse("").unwrap();
        assert_eq!(run, RunFile::default());
    }

    #[test]
    fn parse_steps_in_order() {
        let run = parse(
            "[[steps]]\ndirective = \"tap\"\nitems = [\"homebrew/cask-fonts\"]\n\n\
             [[steps]]\ndirective = \"formula\"\nitems = [\"git\", \"ripgrep\"]\n",
        )
        .unwrap();
        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0].kind(), Some(Directive::Tap));
        assert_eq!(run.steps[1].items, ["git", "ripgrep"]);
    }

    #[test]
    fn parse_unknown_directive_is_kept() {
        let run = parse("[[steps]]\ndirective = \"pip\"\nitems = [\"requests\"]\n").unwrap();
        assert_eq!(run.steps[0].kind(), None);
        assert_eq!(run.steps[0].directive, "pip");
    }

    #[test]
    fn parse_missing_items_is_empty() {
        let run = parse("[[steps]]\ndirective = \"cask\"\n").unwrap();
        assert!(run.steps[0].items.is_empty());
    }

    #[test]
    fn parse_defaults_and_base_dir() {
        let run = parse("base_dir = \"..\"\n\n[defaults.formula]\nstdout = true\n").unwrap();
        assert_eq!(run.base_dir, Some(PathBuf::from("..")));
        assert_eq!(run.defaults.formula.stdout, Some(true));
    }

    #[test]
    fn parse_error_names_file() {
        let err = parse("[[steps]]\ndirective = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("dotbrew.toml"));
    }

    #[test]
    fn parse_rejects_unknown_top_level_key() {
        assert!(parse("shell = \"zsh\"\n").is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunFile::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn locate_prefers_explicit_path() {
        let path = locate(Some(Path::new("/explicit/dotbrew.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/dotbrew.toml"));
    }

    #[test]
    fn locate_explicit_beats_env() {
        let path = locate_from(
            Some(Path::new("/explicit/dotbrew.toml")),
            Some(PathBuf::from("/env/dotbrew.toml")),
            Path::new(""),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/explicit/dotbrew.toml"));
    }

    #[test]
    fn locate_env_beats_current_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_FILE_NAME), "").unwrap();
        let path =
            locate_from(None, Some(PathBuf::from("/env/dotbrew.toml")), dir.path()).unwrap();
        assert_eq!(path, PathBuf::from("/env/dotbrew.toml"));
    }

    #[test]
    fn locate_ignores_empty_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_FILE_NAME), "").unwrap();
        let path = locate_from(None, Some(PathBuf::new()), dir.path()).unwrap();
        assert_eq!(path, dir.path().join(DEFAULT_FILE_NAME));
    }

    #[test]
    fn locate_finds_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_FILE_NAME), "").unwrap();
        let path = locate_from(None, None, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(DEFAULT_FILE_NAME));
    }

    #[test]
    fn locate_not_found_names_every_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(DEFAULT_FILE_NAME)).unwrap();
        let err = locate_from(None, None, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        let message = err.to_string();
        for source in ["--config", "$DOTBREW_CONFIG", "./dotbrew.toml"] {
            assert!(message.contains(source), "{message}");
        }
    }

    #[test]
    fn base_dir_defaults_to_run_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dotbrew.toml");
        let base = resolve_base_dir(None, &RunFile::default(), &file).unwrap();
        assert_eq!(base, dunce::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn base_dir_from_run_file_is_relative_to_it() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("brew")).unwrap();
        let run = RunFile {
            base_dir: Some(PathBuf::from("brew")),
            ..RunFile::default()
        };
        let base = resolve_base_dir(None, &run, &dir.path().join("dotbrew.toml")).unwrap();
        assert_eq!(base, dunce::canonicalize(dir.path().join("brew")).unwrap());
    }

    #[test]
    fn explicit_base_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let run = RunFile {
            base_dir: Some(PathBuf::from("ignored")),
            ..RunFile::default()
        };
        let base =
            resolve_base_dir(Some(other.path()), &run, &dir.path().join("dotbrew.toml")).unwrap();
        assert_eq!(base, dunce::canonicalize(other.path()).unwrap());
    }

    #[test]
    fn missing_base_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let run = RunFile {
            base_dir: Some(PathBuf::from("does-not-exist")),
            ..RunFile::default()
        };
        let err = resolve_base_dir(None, &run, &dir.path().join("dotbrew.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::BaseDir { .. }));
    }

    #[test]
    fn base_dir_that_is_a_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Brewfile"), "").unwrap();
        let err = resolve_base_dir(
            Some(&dir.path().join("Brewfile")),
            &RunFile::default(),
            &dir.path().join("dotbrew.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BaseDir { .. }));
    }
}
