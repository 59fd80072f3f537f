//! Custom cargo commands for the search crate.
//!
//! Usage:
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask test      - Run all tests
//!   cargo xtask lint      - Formatting and clippy
//!   cargo xtask fuzz <t>  - Run one fuzz target (needs cargo-fuzz)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Fuzz targets under fuzz/fuzz_targets.
const FUZZ_TARGETS: &[&str] = &[
    "hit_parsing",
    "route_normalization",
    "excerpt_truncation",
    "ltc_summary",
];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("check") => check()?,
        Some("test") => test()?,
        Some("lint") => lint()?,
        Some("fuzz") => fuzz(args.next().as_deref(), args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  check               Quick check (cargo check + test + clippy)
  test                Run all Rust tests
  lint                rustfmt --check and clippy with warnings denied
  fuzz <target> [s]   Run a fuzz target for [s] seconds (default 60)

Fuzz targets: {}
"#,
        FUZZ_TARGETS.join(", ")
    );
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test", "--workspace"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--workspace", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn lint() -> Result<()> {
    println!("[1/2] cargo fmt --check...");
    run_cargo(&["fmt", "--all", "--", "--check"])?;

    println!("[2/2] cargo clippy...");
    run_cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;

    println!("\n✓ Lint passed");
    Ok(())
}

fn fuzz(target: Option<&str>, seconds: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("fuzz needs a target: {}", FUZZ_TARGETS.join(", "));
    };
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target '{}' (expected one of: {})", target, FUZZ_TARGETS.join(", "));
    }
    let seconds: u64 = seconds
        .unwrap_or("60")
        .parse()
        .context("fuzz duration must be a number of seconds")?;

    let root = project_root()?;
    let status = Command::new("cargo")
        .args(["+nightly", "fuzz", "run", target, "--"])
        .arg(format!("-max_total_time={}", seconds))
        .current_dir(root.join("fuzz"))
        .status()
        .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

    if !status.success() {
        bail!("fuzz target {} failed", target);
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
