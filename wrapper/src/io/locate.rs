//! Discovery of the Kimi CLI installation root.
//!
//! Kimi CLI is installed as a `uv` tool; its Python package lives under
//! `<tool-dir>/lib/<python>/site-packages/kimi_cli`. Discovery probes known
//! locations first (newest runtime first) and falls back to asking `uv`
//! where the tool directory is. Nothing is cached across runs.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::io::config::{WrapperConfig, home_dir};
use crate::io::process::run_command_with_timeout;

/// Known runtime directories, newest first. Order is significant.
const PYTHON_DIRS: &[&str] = &["python3.13", "python3.12", "python3.11"];

const TOOL_DIR_REL: &str = ".local/share/uv/tools/kimi-cli";

/// Locate the Kimi CLI installation root.
///
/// A configured `kimi_root` wins outright. Otherwise fixed candidate paths
/// are probed in order, then `uv tool dir kimi-cli` is queried and its `lib/`
/// tree scanned. The error message carries install instructions because this
/// failure is always user-facing.
pub fn locate(config: &WrapperConfig) -> Result<PathBuf> {
    if let Some(root) = &config.kimi_root {
        if root.is_dir() {
            return Ok(root.clone());
        }
        return Err(anyhow!(
            "configured kimi_root {} does not exist",
            root.display()
        ));
    }

    if let Some(home) = home_dir()
        && let Some(found) = probe_candidates(&home)
    {
        return Ok(found);
    }

    if let Some(found) = query_uv_tool_dir(config) {
        return Ok(found);
    }

    Err(anyhow!(
        "could not find Kimi CLI installation; install it with `uv tool install kimi-cli`"
    ))
}

/// Probe the fixed candidate roots under `home`. First match wins.
fn probe_candidates(home: &Path) -> Option<PathBuf> {
    let lib = home.join(TOOL_DIR_REL).join("lib");
    for python_dir in PYTHON_DIRS {
        let candidate = lib.join(python_dir).join("site-packages").join("kimi_cli");
        if candidate.is_dir() {
            debug!(root = %candidate.display(), "found installation at known path");
            return Some(candidate);
        }
    }
    None
}

/// Ask `uv` for the tool directory, then scan its `lib/` tree.
///
/// Best-effort: any failure (uv missing, non-zero exit, no match) yields
/// `None` so the caller can report a single not-found error.
fn query_uv_tool_dir(config: &WrapperConfig) -> Option<PathBuf> {
    let mut cmd = Command::new("uv");
    cmd.arg("tool").arg("dir").arg("kimi-cli");

    let output = match run_command_with_timeout(
        cmd,
        None,
        Duration::from_secs(config.tool_query_timeout_secs),
        config.output_limit_bytes,
    ) {
        Ok(output) => output,
        Err(err) => {
            debug!(err = %err, "uv tool dir query failed to run");
            return None;
        }
    };
    if output.timed_out || !output.status.success() {
        debug!(exit_code = ?output.status.code(), timed_out = output.timed_out, "uv tool dir query failed");
        return None;
    }

    let base = PathBuf::from(output.stdout_text().trim());
    scan_site_packages(&base)
}

/// Scan `<base>/lib/python*/site-packages/kimi_cli`, preferring newer runtimes.
fn scan_site_packages(base: &Path) -> Option<PathBuf> {
    let lib = base.join("lib");
    let entries = std::fs::read_dir(&lib).ok()?;

    let mut python_dirs: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("python"))
        .collect();
    python_dirs.sort();
    python_dirs.reverse();

    for python_dir in python_dirs {
        let candidate = lib.join(python_dir).join("site-packages").join("kimi_cli");
        if candidate.is_dir() {
            debug!(root = %candidate.display(), "found installation via uv tool dir");
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fake_install(home: &Path, python_dir: &str) -> PathBuf {
        let root = home
            .join(TOOL_DIR_REL)
            .join("lib")
            .join(python_dir)
            .join("site-packages")
            .join("kimi_cli");
        fs::create_dir_all(&root).expect("create fake install");
        root
    }

    #[test]
    fn probe_finds_known_candidate() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = fake_install(temp.path(), "python3.12");
        assert_eq!(probe_candidates(temp.path()), Some(root));
    }

    #[test]
    fn probe_prefers_newest_runtime() {
        let temp = tempfile::tempdir().expect("tempdir");
        fake_install(temp.path(), "python3.11");
        let newest = fake_install(temp.path(), "python3.13");
        assert_eq!(probe_candidates(temp.path()), Some(newest));
    }

    #[test]
    fn probe_misses_when_nothing_installed() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(probe_candidates(temp.path()), None);
    }

    #[test]
    fn scan_prefers_newest_runtime() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path();
        for python_dir in ["python3.11", "python3.12"] {
            fs::create_dir_all(
                base.join("lib")
                    .join(python_dir)
                    .join("site-packages")
                    .join("kimi_cli"),
            )
            .expect("create candidate");
        }

        let found = scan_site_packages(base).expect("candidate");
        assert!(found.to_string_lossy().contains("python3.12"));
    }

    #[test]
    fn configured_root_wins() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = WrapperConfig {
            kimi_root: Some(temp.path().to_path_buf()),
            ..WrapperConfig::default()
        };
        assert_eq!(locate(&config).expect("locate"), temp.path());
    }

    #[test]
    fn configured_root_must_exist() {
        let config = WrapperConfig {
            kimi_root: Some(PathBuf::from("/nonexistent/kimi_cli")),
            ..WrapperConfig::default()
        };
        let err = locate(&config).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
