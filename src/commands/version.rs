//! Command: print version information.

/// Version string: `DOTBREW_VERSION` from the build, else `dev-<crate version>`.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("DOTBREW_VERSION") {
        Some(v) => v,
        None => concat!("dev-", env!("CARGO_PKG_VERSION")),
    }
}

/// Print the dotbrew version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dotbrew {}", version());
}
