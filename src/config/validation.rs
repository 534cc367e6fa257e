//! Run file validation.

use std::collections::HashSet;
use std::path::Path;

use super::options::UserDefaults;
use super::runfile::Step;
use crate::directive::Directive;
use crate::platform::Platform;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Where the problem is (e.g., `"steps[2]"`, `"defaults.cask"`).
    pub source: String,
    /// The specific item or directive that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for run file validators.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self, base_dir: &Path, platform: &Platform) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator (e.g., "steps").
    fn name(&self) -> &'static str;
}

fn step_source(index: usize) -> String {
    format!("steps[{index}]")
}

/// Checks directive names and item lists.
#[derive(Debug)]
pub struct StepValidator<'a> {
    steps: &'a [Step],
}

impl<'a> StepValidator<'a> {
    /// Validate `steps`.
    #[must_use]
    pub const fn new(steps: &'a [Step]) -> Self {
        Self { steps }
    }
}

impl ConfigValidator for StepValidator<'_> {
    fn validate(&self, _base_dir: &Path, _platform: &Platform) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            if step.kind().is_none() {
                warnings.push(ValidationWarning::new(
                    step_source(index),
                    &step.directive,
                    "unrecognised directive; expected one of formula, cask, tap, bundle-file, app-store",
                ));
                continue;
            }

            if step.items.is_empty() {
                warnings.push(ValidationWarning::new(
                    step_source(index),
                    &step.directive,
                    "step has no items",
                ));
            }

            let mut seen = HashSet::new();
            for item in &step.items {
                if item.trim().is_empty() {
                    warnings.push(ValidationWarning::new(
                        step_source(index),
                        item,
                        "item is empty",
                    ));
                } else if !seen.insert(item.as_str()) {
                    warnings.push(ValidationWarning::new(
                        step_source(index),
                        item,
                        "duplicate item",
                    ));
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "steps"
    }
}

/// Checks that bundle files exist relative to the base directory.
#[derive(Debug)]
pub struct BundleFileValidator<'a> {
    steps: &'a [Step],
}

impl<'a> BundleFileValidator<'a> {
    /// Validate the bundle-file steps among `steps`.
    #[must_use]
    pub const fn new(steps: &'a [Step]) -> Self {
        Self { steps }
    }
}

impl ConfigValidator for BundleFileValidator<'_> {
    fn validate(&self, base_dir: &Path, _platform: &Platform) -> Vec<ValidationWarning> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.kind() == Some(Directive::BundleFile))
            .flat_map(|(index, step)| {
                step.items
                    .iter()
                    .filter(|item| !item.trim().is_empty() && !base_dir.join(item).is_file())
                    .map(move |item| {
                        ValidationWarning::new(
                            step_source(index),
                            item,
                            "bundle file not found relative to base directory",
                        )
                    })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "bundle files"
    }
}

/// Checks directives and options against the host platform.
#[derive(Debug)]
pub struct PlatformValidator<'a> {
    steps: &'a [Step],
    defaults: &'a UserDefaults,
}

impl<'a> PlatformValidator<'a> {
    /// Validate `steps` with the effective options from `defaults`.
    #[must_use]
    pub const fn new(steps: &'a [Step], defaults: &'a UserDefaults) -> Self {
        Self { steps, defaults }
    }
}

impl ConfigValidator for PlatformValidator<'_> {
    fn validate(&self, _base_dir: &Path, platform: &Platform) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut present = HashSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            let Some(directive) = step.kind() else {
                continue;
            };
            present.insert(directive);

            if directive.is_macos_only() && !platform.is_macos() {
                warnings.push(ValidationWarning::new(
                    step_source(index),
                    directive.name(),
                    format!("{directive} requires macOS but platform is {}", platform.os),
                ));
            }
        }

        // One warning per directive, however many steps use it.
        if !platform.supports_x86_64_translation() {
            for directive in Directive::ALL {
                if present.contains(&directive) && self.defaults.resolve(directive).force_intel {
                    warnings.push(ValidationWarning::new(
                        format!("defaults.{directive}"),
                        "force_intel",
                        "force_intel requires Apple Silicon macOS with Rosetta 2",
                    ));
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "platform"
    }
}

/// Validate all configuration and return collected warnings.
#[must_use]
pub fn validate_all(config: &super::Config, platform: &Platform) -> Vec<ValidationWarning> {
    let steps = &config.run.steps;
    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(StepValidator::new(steps)),
        Box::new(BundleFileValidator::new(steps)),
        Box::new(PlatformValidator::new(steps, &config.run.defaults)),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        let warnings = validator.validate(&config.base_dir, platform);
        tracing::debug!(
            "{} validator: {}",
            validator.name(),
            crate::logging::plural(warnings.len(), "warning")
        );
        all_warnings.extend(warnings);
    }

    all_warnings
}
