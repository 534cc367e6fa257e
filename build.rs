//! Build script for dotbrew.

use std::process::Command;

fn main() {
    // DOTBREW_VERSION from the environment wins (release builds); otherwise
    // use git describe for local builds.
    if let Ok(version) = std::env::var("DOTBREW_VERSION") {
        println!("cargo:rustc-env=DOTBREW_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=DOTBREW_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DOTBREW_VERSION");
}
