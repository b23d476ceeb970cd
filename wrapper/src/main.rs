//! `jim` — GSD-enhanced launcher for Kimi CLI.
//!
//! Ensures the installed Kimi CLI sources carry the GSD patches, prints a
//! project-status banner, and execs `kimi` with the GSD master agent
//! preloaded. Maintenance flags expose apply/restore/status directly.

use anyhow::{Context, Result};
use clap::Parser;

use jim::io::config::{WrapperConfig, load_default_config};
use jim::io::locate::locate;
use jim::{exit_codes, launch, logging, maintain};

#[derive(Parser)]
#[command(
    name = "jim",
    version,
    about = "GSD-enhanced wrapper around Kimi CLI"
)]
struct Cli {
    /// Re-apply GSD patches to Kimi CLI and exit.
    #[arg(long)]
    patch: bool,

    /// Restore original Kimi CLI sources from backups and exit.
    #[arg(long)]
    restore: bool,

    /// Show patch status and exit.
    #[arg(long)]
    status: bool,

    /// Arguments passed through to Kimi CLI verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
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

    if cli.patch || cli.restore || cli.status {
        let root = locate_root(&config)?;
        if cli.patch {
            return Ok(maintain::run_apply(&root, &config));
        }
        if cli.restore {
            return Ok(maintain::run_restore(&root));
        }
        return Ok(maintain::run_status(&root));
    }

    launch::launch(&config, &cli.args)
}

fn locate_root(config: &WrapperConfig) -> Result<std::path::PathBuf> {
    locate(config).context("locate Kimi CLI installation")
}
