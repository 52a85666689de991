//! Custom cargo commands for the tsmatch crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz [s]  - Run every fuzz target for `s` seconds (default 60)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fuzz targets declared in fuzz/Cargo.toml.
const FUZZ_TARGETS: &[&str] = &["evaluate_items", "vector_construction", "merge_positions"];

/// Contract checks the evaluator must keep calling outside `verify/`.
const CONTRACT_CALLS: &[&str] = &[
    "check_positions_normalized(",
    "check_positions_sorted(",
    "check_vector_well_formed(",
];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => {
            let seconds = match args.next() {
                Some(s) => s.parse().with_context(|| format!("Invalid duration '{}'", s))?,
                None => 60,
            };
            fuzz(seconds)?
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify      Run full verification suite (contracts + tests + clippy)
  test        Run all Rust tests
  check       Quick check (cargo check + test + clippy)
  bench       Run benchmarks
  fuzz [SECS] Run each fuzz target for SECS seconds (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("tsmatch Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking contract call sites...");
    check_contract_calls()?;
    println!("✓ Contracts wired in\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running tests without rayon...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build passed\n");

    println!("[4/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run every fuzz target for a fixed time
fn fuzz(seconds: u64) -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    let max_time = format!("-max_total_time={}", seconds);

    for (i, &target) in FUZZ_TARGETS.iter().enumerate() {
        println!("[{}/{}] fuzzing {} for {}s...", i + 1, FUZZ_TARGETS.len(), target, seconds);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", max_time.as_str()])
            .current_dir(&fuzz_dir)
            .status()
            .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }

    println!("\n✓ No fuzz failures");
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

/// Each contract must be called from evaluator code, not just defined.
fn check_contract_calls() -> Result<()> {
    let src_dir = project_root()?.join("src");
    let mut sources = Vec::new();
    collect_sources(&src_dir, &mut sources)?;

    for contract in CONTRACT_CALLS {
        let mut calls = 0usize;
        for path in &sources {
            if path.starts_with(src_dir.join("verify")) {
                continue;
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            calls += text.matches(contract).count();
        }
        if calls == 0 {
            bail!(
                "No call to {}..) outside src/verify. Someone may have removed a contract check!",
                contract
            );
        }
        println!("  {}..) called {} time(s)", contract, calls);
    }

    Ok(())
}

fn collect_sources(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}
