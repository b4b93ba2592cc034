use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .filter(|out| !out.is_empty())
        .unwrap_or_else(|| "unknown".into());
    let status = match git(&["status", "--porcelain"]) {
        Some(out) if out.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    let built = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    emit("FORM_CORE_BUILD_HASH", &hash);
    emit("FORM_CORE_BUILD_STATUS", status);
    emit("FORM_CORE_BUILD_TIMESTAMP", &built);
    emit("FORM_CORE_BUILD_TARGET", &env::var("TARGET").unwrap_or_else(|_| "unknown".into()));
    emit("FORM_CORE_BUILD_PROFILE", &env::var("PROFILE").unwrap_or_else(|_| "unknown".into()));
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

/// Trimmed stdout of a successful git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok().map(|out| out.trim().to_string())
}
