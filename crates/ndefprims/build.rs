use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TARGET");
    if let Ok(target) = std::env::var("TARGET") {
        println!("cargo:rustc-env=NDEFPRIMS_BUILD_TARGET={target}");
    }

    // Absent outside a git checkout (e.g. crates.io builds).
    let hash = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok());
    if let Some(hash) = hash {
        println!("cargo:rustc-env=NDEFPRIMS_GIT_HASH={}", hash.trim());
    }
}
