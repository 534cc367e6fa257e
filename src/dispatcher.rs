//! Directive routing: name in, installer run out.
use std::path::Path;

use crate::config::options::{DirectiveOptions, UserDefaults};
use crate::directive::{self, Directive};
use crate::error::DirectiveError;
use crate::exec::Executor;
use crate::installers::Installer;
use crate::logging::Log;

/// Routes a directive name and its items to the matching installer.
///
/// The dispatcher owns nothing: the executor, log, base directory and user
/// defaults are all borrowed from the caller for the duration of a run.
pub struct Dispatcher<'a> {
    installer: Installer<'a>,
    defaults: &'a UserDefaults,
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("installer", &self.installer)
            .field("defaults", self.defaults)
            .finish()
    }
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher.
    ///
    /// Every spawned process runs with `base_dir` as its working directory.
    /// With `dry_run` set, commands are logged instead of executed.
    #[must_use]
    pub const fn new(
        executor: &'a dyn Executor,
        log: &'a dyn Log,
        base_dir: &'a Path,
        defaults: &'a UserDefaults,
        dry_run: bool,
    ) -> Self {
        Self {
            installer: Installer::new(executor, log, base_dir, dry_run),
            defaults,
        }
    }

    /// Whether `name` is one of the known directives.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn can_handle(&self, name: &str) -> bool {
        directive::can_handle(name)
    }

    /// Built-in defaults for `directive` with the user's overrides applied.
    #[must_use]
    pub fn effective_options(&self, directive: Directive) -> DirectiveOptions {
        self.defaults.resolve(directive)
    }

    /// Run every item of directive `name`.
    ///
    /// Returns whether all items succeeded. A failing item does not stop the
    /// remaining ones.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Unknown`] if `name` is not a directive;
    /// nothing is executed in that case.
    pub fn handle(&self, name: &str, items: &[String]) -> Result<bool, DirectiveError> {
        let directive: Directive = name.parse()?;
        let options = self.effective_options(directive);
        Ok(self.installer.install(directive, items, &options))
    }
}
