//! Declarative Homebrew installer.
//!
//! dotbrew reads a TOML run file of steps, each naming a directive
//! (`formula`, `cask`, `tap`, `bundle-file`, `app-store`) and a list of items,
//! and makes sure every item is installed by running the matching package
//! manager. Missing package managers are installed on demand.
//!
//! The library is organised in layers:
//!
//! - **[`directive`]**, **[`command`]**: the closed set of directives and the
//!   argument vectors they build
//! - **[`exec`]**: process execution behind the [`exec::Executor`] trait
//! - **[`installers`]**, **[`dispatcher`]**: prerequisite checks and the
//!   per-item install loop
//! - **[`config`]**: run file loading, option overlays and validation
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `plan`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]
#![cfg_attr(test, allow(missing_docs))]

pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod directive;
pub mod dispatcher;
pub mod error;
pub mod exec;
pub mod installers;
pub mod logging;
pub mod platform;
