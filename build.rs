use std::process::Command;

// Embed `git describe` output as the CLI version, falling back to the crate version
// when building outside a checkout (e.g. from a published tarball).
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let described = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|raw| raw.trim().trim_start_matches('v').to_string())
        .filter(|v| !v.is_empty());

    let version = described.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=TASKBOARD_VERSION={version}");
}
