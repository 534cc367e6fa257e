//! Per-directive execution options and their user overrides.
use serde::{Deserialize, Serialize};

use crate::directive::Directive;
use crate::exec::Streams;

/// Effective options for one directive invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectiveOptions {
    /// Redirect the child's stdin from the null device.
    pub stdin: bool,
    /// Redirect the child's stdout to the null device.
    pub stdout: bool,
    /// Redirect the child's stderr to the null device.
    pub stderr: bool,
    /// Prefix every command with `arch -x86_64`.
    pub force_intel: bool,
}

impl DirectiveOptions {
    /// Built-in defaults for `directive`.
    ///
    /// Brewfile runs are long and chatty, so their output is suppressed;
    /// everything else inherits the terminal.
    #[must_use]
    pub const fn defaults_for(directive: Directive) -> Self {
        match directive {
            Directive::BundleFile => Self {
                stdin: true,
                stdout: true,
                stderr: true,
                force_intel: false,
            },
            Directive::Formula | Directive::Cask | Directive::Tap | Directive::AppStore => Self {
                stdin: false,
                stdout: false,
                stderr: false,
                force_intel: false,
            },
        }
    }

    /// Overlay `overrides` onto these options, key by key.
    #[must_use]
    pub fn overlay(self, overrides: &OptionOverrides) -> Self {
        Self {
            stdin: overrides.stdin.unwrap_or(self.stdin),
            stdout: overrides.stdout.unwrap_or(self.stdout),
            stderr: overrides.stderr.unwrap_or(self.stderr),
            force_intel: overrides.force_intel.unwrap_or(self.force_intel),
        }
    }

    /// The stream redirections these options ask for.
    #[must_use]
    pub const fn streams(&self) -> Streams {
        Streams {
            stdin: self.stdin,
            stdout: self.stdout,
            stderr: self.stderr,
        }
    }
}

/// User-supplied values for a single directive; `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionOverrides {
    /// Override for [`DirectiveOptions::stdin`].
    pub stdin: Option<bool>,
    /// Override for [`DirectiveOptions::stdout`].
    pub stdout: Option<bool>,
    /// Override for [`DirectiveOptions::stderr`].
    pub stderr: Option<bool>,
    /// Override for [`DirectiveOptions::force_intel`].
    pub force_intel: Option<bool>,
}

/// User overrides for every directive, as read from `[defaults.*]` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct UserDefaults {
    /// `[defaults.formula]`
    pub formula: OptionOverrides,
    /// `[defaults.cask]`
    pub cask: OptionOverrides,
    /// `[defaults.tap]`
    pub tap: OptionOverrides,
    /// `[defaults.bundle-file]`
    pub bundle_file: OptionOverrides,
    /// `[defaults.app-store]`
    pub app_store: OptionOverrides,
}

impl UserDefaults {
    /// The overrides configured for `directive`.
    #[must_use]
    pub const fn for_directive(&self, directive: Directive) -> &OptionOverrides {
        match directive {
            Directive::Formula => &self.formula,
            Directive::Cask => &self.cask,
            Directive::Tap => &self.tap,
            Directive::BundleFile => &self.bundle_file,
            Directive::AppStore => &self.app_store,
        }
    }

    /// Mutable access to the overrides for `directive`.
    pub const fn for_directive_mut(&mut self, directive: Directive) -> &mut OptionOverrides {
        match directive {
            Directive::Formula => &mut self.formula,
            Directive::Cask => &mut self.cask,
            Directive::Tap => &mut self.tap,
            Directive::BundleFile => &mut self.bundle_file,
            Directive::AppStore => &mut self.app_store,
        }
    }

    /// Defaults for `directive` with the user's overrides applied.
    #[must_use]
    pub fn resolve(&self, directive: Directive) -> DirectiveOptions {
        DirectiveOptions::defaults_for(directive).overlay(self.for_directive(directive))
    }
}
