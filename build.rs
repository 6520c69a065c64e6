// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=SHUTTER_VERSION");

    // Packagers (flatpak, distro builds) pin the version explicitly
    let version = std::env::var("SHUTTER_VERSION").unwrap_or_else(|_| describe_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version string for the about page.
///
/// `0.1.0` on a release tag, `0.1.0+3.gabc1234` after it, the bare crate
/// version when git is unavailable (source tarballs).
fn describe_version() -> String {
    let pkg_version = env!("CARGO_PKG_VERSION").to_string();

    let Some(described) = git(&["describe", "--tags", "--match", "v*"]) else {
        return match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) => format!("{}+g{}", pkg_version, hash),
            None => pkg_version,
        };
    };

    let described = described.strip_prefix('v').unwrap_or(&described);

    // "<tag>-<commits>-g<hash>" when HEAD is past the tag
    let mut parts = described.rsplitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(hash), Some(commits), Some(tag)) if hash.starts_with('g') => {
            format!("{}+{}.{}", tag, commits, hash)
        }
        _ => described.to_string(),
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
