//! Syntax validation for transformed sources.
//!
//! The [`SyntaxValidator`] trait decouples the patch engine from the actual
//! checker (currently `python3`'s `ast` module). Tests use scripted
//! validators that accept or reject without spawning processes.

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::io::config::WrapperConfig;
use crate::io::process::run_command_with_timeout;

/// Abstraction over source-code syntax checkers.
pub trait SyntaxValidator {
    /// Fail when `source` does not parse in the target language.
    fn validate(&self, name: &str, source: &str) -> Result<()>;
}

const PARSE_SNIPPET: &str = "import ast, sys\nast.parse(sys.stdin.read())";

/// Validator that pipes the source through `python3 -c 'ast.parse(...)'`.
pub struct PythonValidator {
    timeout: Duration,
    output_limit_bytes: usize,
}

impl PythonValidator {
    pub fn new(timeout: Duration, output_limit_bytes: usize) -> Self {
        Self {
            timeout,
            output_limit_bytes,
        }
    }

    pub fn from_config(config: &WrapperConfig) -> Self {
        Self::new(
            Duration::from_secs(config.validation_timeout_secs),
            config.output_limit_bytes,
        )
    }
}

impl SyntaxValidator for PythonValidator {
    fn validate(&self, name: &str, source: &str) -> Result<()> {
        let mut cmd = Command::new("python3");
        cmd.arg("-c").arg(PARSE_SNIPPET);

        let output = run_command_with_timeout(
            cmd,
            Some(source.as_bytes()),
            self.timeout,
            self.output_limit_bytes,
        )
        .context("run python3 syntax check")?;

        if output.timed_out {
            bail!("python syntax check for {name} timed out after {:?}", self.timeout);
        }
        if !output.status.success() {
            bail!(
                "{name} failed python syntax check: {}",
                output.stderr_text().trim()
            );
        }

        debug!(name, "syntax check passed");
        Ok(())
    }
}
