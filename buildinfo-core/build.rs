use std::path::Path;
use std::process::Command;

#[path = "src/provision.rs"]
mod provision;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/provision.rs");
    for var in provision::WATCHED_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    // Only ask git when this package is part of the checkout. An extracted
    // crate sitting inside some unrelated repository must not pick up its SHA.
    let tracked = git(&["ls-files", "--error-unmatch", "Cargo.toml"]).is_some();

    // Rebuild if git HEAD changes
    if tracked {
        if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
            watch_git_dir(Path::new(&git_dir));
        }
    }

    let assignments = provision::plan(
        |key: &str| std::env::var(key).ok(),
        |args: &[&str]| if tracked { git(args) } else { None },
        chrono::Utc::now(),
    );
    for (key, value) in assignments {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Missing paths are skipped: cargo treats them as always changed.
fn watch_git_dir(git_dir: &Path) {
    for entry in ["HEAD", "refs/heads", "packed-refs"] {
        let path = git_dir.join(entry);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                String::from_utf8(o.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
