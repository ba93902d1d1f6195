//! `test` subcommand: run declarative test scripts

use crate::harness::TestRunner;
use crate::script::TestScript;
use anyhow::{Context, bail};
use clap::Args;
use colored::Colorize;
use meridian_core::Persistable;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the `test` subcommand
#[derive(Args, Debug)]
pub struct TestArgs {
    /// A script file or a directory to scan for scripts
    pub path: PathBuf,

    /// Print passing steps as well as failures
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run every script found under the given path
pub fn test(args: TestArgs) -> anyhow::Result<()> {
    let scripts = collect_scripts(&args.path)?;
    if scripts.is_empty() {
        bail!("no test scripts found under {}", args.path.display());
    }

    let runner = TestRunner::new();
    let mut failures = 0usize;

    for path in &scripts {
        let script = TestScript::load_from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?;
        let report = runner
            .run(&script)
            .with_context(|| format!("running script {}", path.display()))?;

        if report.passed() {
            println!("{} {}", "PASS".green().bold(), report.name);
        } else {
            println!("{} {}", "FAIL".red().bold(), report.name);
            failures += report.failure_count();
        }
        for step in &report.steps {
            if step.passed() {
                if args.verbose {
                    println!("  {} {}", "ok".green(), step.label);
                }
            } else {
                for failure in &step.failures {
                    println!("  {} {}: {}", "not ok".red(), step.label, failure);
                }
            }
        }
    }

    println!();
    if failures > 0 {
        bail!("{failures} assertion(s) failed across {} script(s)", scripts.len());
    }
    println!(
        "{} {} script(s) passed",
        "OK".green().bold(),
        scripts.len()
    );
    Ok(())
}

fn collect_scripts(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut scripts = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("scanning {}", path.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            scripts.push(entry.into_path());
        }
    }
    Ok(scripts)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_scripts_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let scripts = collect_scripts(dir.path()).unwrap();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].ends_with("a.json"));
    }

    #[test]
    fn test_collect_scripts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.json");
        std::fs::write(&file, "{}").unwrap();
        let scripts = collect_scripts(&file).unwrap();
        assert_eq!(scripts, vec![file]);
    }
}
