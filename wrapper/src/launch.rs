//! Launcher: build and run the wrapped `kimi` command line.
//!
//! The wrapper is a transparent pass-through: user arguments are forwarded
//! verbatim, stdio is inherited, there is no timeout, and the wrapper's exit
//! code equals the wrapped process's.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::banner::build_banner;
use crate::core::state::{PatchState, classify};
use crate::io::config::{WrapperConfig, home_dir};
use crate::io::engine;
use crate::io::locate::locate;
use crate::io::registry::patch_set;
use crate::io::verify::PythonValidator;

/// Executable name of the wrapped tool.
pub const KIMI_BIN: &str = "kimi";

/// Default GSD master-agent configuration (`~/.kimi/gsd-agent.yaml`).
/// Consumed, never written.
pub fn default_agent_file() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".kimi").join("gsd-agent.yaml"))
}

/// Arguments for the wrapped command.
///
/// Inserts `--agent-file <path>` only when the agent file exists and the user
/// supplied neither `--agent-file` nor `--agent` themselves (first-wins: user
/// flags are never overridden). `extra_args` are appended verbatim.
pub fn build_command_args(agent_file: Option<&Path>, extra_args: &[String]) -> Vec<String> {
    let user_supplied = extra_args.iter().any(|arg| {
        arg == "--agent-file"
            || arg == "--agent"
            || arg.starts_with("--agent-file=")
            || arg.starts_with("--agent=")
    });

    let mut args = Vec::new();
    if let Some(agent) = agent_file
        && agent.exists()
        && !user_supplied
    {
        args.push("--agent-file".to_string());
        args.push(agent.display().to_string());
    }
    args.extend(extra_args.iter().cloned());
    args
}

/// Apply patches when the installation is not fully patched.
///
/// Best-effort: a patch failure is reported but never blocks the launch; the
/// user just gets a stock Kimi CLI.
pub fn ensure_patched(root: &Path, config: &WrapperConfig) {
    let descriptors = patch_set(root);
    let flags: Vec<bool> = engine::status(&descriptors)
        .iter()
        .map(|entry| entry.patched)
        .collect();

    if classify(&flags) == PatchState::Patched {
        debug!("installation already patched");
        return;
    }

    info!("applying GSD patches before launch");
    let validator = PythonValidator::from_config(config);
    if !engine::apply_all(&descriptors, &validator) {
        warn!("some patches failed; continuing with stock Kimi CLI");
        println!("warning: some GSD patches failed; continuing with stock Kimi CLI");
    }
}

/// Launch `kimi` with pass-through arguments and return its exit code.
pub fn launch(config: &WrapperConfig, extra_args: &[String]) -> Result<i32> {
    match locate(config) {
        Ok(root) => ensure_patched(&root, config),
        Err(err) => warn!(err = %err, "skipping patch check, launching anyway"),
    }

    let cwd = std::env::current_dir().context("resolve current directory")?;
    if let Some(banner) = build_banner(&cwd) {
        println!();
        println!("{banner}");
        println!();
    }

    let agent_file = config.agent_file.clone().or_else(default_agent_file);
    let args = build_command_args(agent_file.as_deref(), extra_args);

    debug!(?args, "launching kimi");
    let status = Command::new(KIMI_BIN)
        .args(&args)
        .status()
        .with_context(|| format!("run {KIMI_BIN}"))?;

    // Exit code 1 when the child was terminated by a signal.
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn agent_file_in(dir: &Path) -> PathBuf {
        let path = dir.join("gsd-agent.yaml");
        fs::write(&path, "name: gsd\n").expect("write agent file");
        path
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn inserts_agent_file_when_present_and_unclaimed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let agent = agent_file_in(temp.path());

        let built = build_command_args(Some(&agent), &args(&["--model", "k2"]));

        assert_eq!(built[0], "--agent-file");
        assert_eq!(built[1], agent.display().to_string());
        assert_eq!(&built[2..], &args(&["--model", "k2"])[..]);
    }

    /// User-supplied agent flags win; the default path must not appear.
    #[test]
    fn user_agent_file_is_never_overridden() {
        let temp = tempfile::tempdir().expect("tempdir");
        let agent = agent_file_in(temp.path());

        let built = build_command_args(Some(&agent), &args(&["--agent-file", "custom.yaml"]));

        assert_eq!(built, args(&["--agent-file", "custom.yaml"]));
        assert!(!built.contains(&agent.display().to_string()));
    }

    #[test]
    fn user_agent_flag_suppresses_insertion() {
        let temp = tempfile::tempdir().expect("tempdir");
        let agent = agent_file_in(temp.path());

        let built = build_command_args(Some(&agent), &args(&["--agent=researcher"]));
        assert_eq!(built, args(&["--agent=researcher"]));
    }

    #[test]
    fn missing_agent_file_is_not_inserted() {
        let temp = tempfile::tempdir().expect("tempdir");
        let absent = temp.path().join("absent.yaml");

        let built = build_command_args(Some(&absent), &args(&["chat"]));
        assert_eq!(built, args(&["chat"]));
    }

    #[test]
    fn extra_args_order_is_preserved() {
        let built = build_command_args(None, &args(&["a", "--b", "c", "--d=e"]));
        assert_eq!(built, args(&["a", "--b", "c", "--d=e"]));
    }
}
