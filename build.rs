use std::path::Path;
use std::process::Command;

/// Embeds the short commit hash so `strokecanvas --version` can report the exact build.
fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=STROKECANVAS_GIT_HASH={hash}");

    let git_dir = std::env::var_os("GIT_DIR").unwrap_or_else(|| ".git".into());
    let git_dir = Path::new(&git_dir);
    for entry in ["HEAD", "refs", "packed-refs"] {
        let path = git_dir.join(entry);
        if path.exists() {
            if let Some(display) = path.to_str() {
                println!("cargo:rerun-if-changed={display}");
            }
        }
    }
}
