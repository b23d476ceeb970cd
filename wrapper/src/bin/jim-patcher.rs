//! `jim-patcher` — maintenance surface for the GSD source patches.
//!
//! Applies, restores, or reports the patch set against the installed Kimi
//! CLI sources. `status` is the default action and never mutates anything.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use jim::io::config::load_default_config;
use jim::io::locate::locate;
use jim::{exit_codes, logging, maintain};

#[derive(Parser)]
#[command(
    name = "jim-patcher",
    version,
    about = "Apply, restore, and inspect GSD source patches for Kimi CLI"
)]
struct Cli {
    /// Action to perform.
    #[arg(value_enum, default_value_t = Action::Status)]
    action: Action,

    /// Kimi CLI installation root (skips discovery).
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Action {
    /// Apply all GSD patches.
    Apply,
    /// Restore original sources from backups.
    Restore,
    /// Report per-file patch status.
    Status,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = load_default_config()?;

    let root = match &cli.root {
        Some(root) => {
            if !root.is_dir() {
                return Err(anyhow!("root {} is not a directory", root.display()));
            }
            root.clone()
        }
        None => locate(&config).context("locate Kimi CLI installation")?,
    };

    Ok(match cli.action {
        Action::Apply => maintain::run_apply(&root, &config),
        Action::Restore => maintain::run_restore(&root),
        Action::Status => maintain::run_status(&root),
    })
}
