// Build script to inject version information from git tags
//
// Falls back to CARGO_PKG_VERSION when git is unavailable, so builds from
// a source tarball still carry a usable version string.

use std::process::Command;

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=CODEGAUGE_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    if let Some(tag) = described.strip_prefix('v') {
        // Clean tag like "v0.1.0", or tag with commit suffix like
        // "v0.1.0-5-gabc123"; keep only the version component
        Some(tag.split('-').next().unwrap_or(tag).to_string())
    } else {
        // Untagged commit: package version plus the commit description
        Some(format!("{}-{}", env!("CARGO_PKG_VERSION"), described))
    }
}
