//! The closed set of directives and their bindings.
use std::fmt;
use std::str::FromStr;

use crate::command::{CommandLine, CommandPlan};
use crate::error::DirectiveError;
use crate::installers::prerequisite::Prerequisite;

/// A kind of install step.
///
/// Each directive is bound to exactly one [`Prerequisite`] and one per-item
/// command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directive {
    /// Homebrew formula (`brew install <pkg>`).
    Formula,
    /// Homebrew cask (`brew install --cask <pkg>`).
    Cask,
    /// Homebrew tap (`brew tap <tap>`).
    Tap,
    /// Brewfile manifest (`brew bundle --file=<path>`).
    BundleFile,
    /// Mac App Store app (`mas install <id>`).
    AppStore,
}

impl Directive {
    /// Every directive, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Formula,
        Self::Cask,
        Self::Tap,
        Self::BundleFile,
        Self::AppStore,
    ];

    /// The external name used in run files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Formula => "formula",
            Self::Cask => "cask",
            Self::Tap => "tap",
            Self::BundleFile => "bundle-file",
            Self::AppStore => "app-store",
        }
    }

    /// Look up a directive by its external name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// The package manager that must be present before any item runs.
    #[must_use]
    pub const fn prerequisite(self) -> Prerequisite {
        match self {
            Self::Formula | Self::Cask | Self::Tap | Self::BundleFile => Prerequisite::Brew,
            Self::AppStore => Prerequisite::Mas,
        }
    }

    /// Build the command plan that installs a single item.
    #[must_use]
    pub fn item_command(self, item: &str) -> CommandPlan {
        let brew = || CommandLine::new("brew");
        match self {
            Self::Formula => CommandPlan::single(brew().args(["install", item])),
            // A failed install still counts when the cask is already present.
            Self::Cask => CommandPlan::with_fallback(
                brew().args(["install", "--cask", item]),
                brew().args(["ls", "--cask", "--versions", item]),
            ),
            Self::Tap => CommandPlan::single(brew().args(["tap", item])),
            Self::BundleFile => CommandPlan::single(
                brew()
                    .args(["bundle", "--verbose"])
                    .arg(format!("--file={item}")),
            ),
            Self::AppStore => CommandPlan::single(CommandLine::new("mas").args(["install", item])),
        }
    }

    /// Message logged before an item is attempted.
    #[must_use]
    pub fn attempt_message(self, item: &str) -> String {
        match self {
            Self::Formula => format!("installing formula {item}"),
            Self::Cask => format!("installing cask {item}"),
            Self::Tap => format!("tapping {item}"),
            Self::BundleFile => format!("installing from file {item}"),
            Self::AppStore => format!("installing app {item}"),
        }
    }

    /// Warning logged when an item fails.
    #[must_use]
    pub fn failure_message(self, item: &str) -> String {
        match self {
            Self::Formula => format!("failed to install formula [{item}]"),
            Self::Cask => format!("failed to install cask [{item}]"),
            Self::Tap => format!("failed to tap [{item}]"),
            Self::BundleFile => format!("failed to install file [{item}]"),
            Self::AppStore => format!("failed to install app [{item}]"),
        }
    }

    /// Whether this directive only makes sense on macOS.
    #[must_use]
    pub const fn is_macos_only(self) -> bool {
        matches!(self, Self::Cask | Self::AppStore)
    }
}

/// Return `true` iff `name` is a recognised directive.
#[must_use]
pub fn can_handle(name: &str) -> bool {
    Directive::from_name(name).is_some()
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Directive {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DirectiveError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn can_handle_recognised_names() {
        for name in ["formula", "cask", "tap", "bundle-file", "app-store"] {
            assert!(can_handle(name), "{name} should be handled");
        }
    }

    #[test]
    fn can_handle_rejects_everything_else() {
        for name in [
            "", "brew", "brewfile", "Formula", "CASK", "bundle_file", "appstore", "pip",
            " tap",
        ] {
            assert!(!can_handle(name), "{name:?} should not be handled");
        }
    }

    #[test]
    fn name_round_trips_through_from_str() {
        for d in Directive::ALL {
            assert_eq!(d.name().parse::<Directive>().unwrap(), d);
            assert_eq!(d.to_string(), d.name());
        }
    }

    #[test]
    fn from_str_unknown_is_error() {
        let err = "pip".parse::<Directive>().unwrap_err();
        assert_eq!(err, DirectiveError::Unknown("pip".to_string()));
    }

    #[test]
    fn prerequisites() {
        assert_eq!(Directive::Formula.prerequisite(), Prerequisite::Brew);
        assert_eq!(Directive::Cask.prerequisite(), Prerequisite::Brew);
        assert_eq!(Directive::Tap.prerequisite(), Prerequisite::Brew);
        assert_eq!(Directive::BundleFile.prerequisite(), Prerequisite::Brew);
        assert_eq!(Directive::AppStore.prerequisite(), Prerequisite::Mas);
    }

    #[test]
    fn item_command_templates() {
        let rendered: Vec<String> = Directive::ALL
            .iter()
            .map(|d| d.item_command("x").to_string())
            .collect();
        assert_eq!(
            rendered,
            [
                "brew install x",
                "brew install --cask x || brew ls --cask --versions x",
                "brew tap x",
                "brew bundle --verbose --file=x",
                "mas install x",
            ]
        );
    }

    #[test]
    fn item_is_a_single_argument() {
        let plan = Directive::Formula.item_command("git; rm -rf ~");
        assert_eq!(plan.primary.arguments(), ["install", "git; rm -rf ~"]);
    }

    #[test]
    fn bundle_file_path_with_spaces_stays_one_argument() {
        let plan = Directive::BundleFile.item_command("my dir/Brewfile");
        assert_eq!(
            plan.primary.arguments(),
            ["bundle", "--verbose", "--file=my dir/Brewfile"]
        );
    }

    #[test]
    fn messages_name_the_item() {
        for d in Directive::ALL {
            assert!(d.attempt_message("pkg").contains("pkg"));
            assert!(d.failure_message("pkg").contains("[pkg]"));
        }
    }
}
