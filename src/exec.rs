//! Process execution boundary: run a shell command, reduce it to a line
//! count or an error.
//!
//! Commands are opaque strings (they may already contain an upstream pipe
//! stage) and are handed to `sh -c` unmodified. This is deliberately a
//! narrow capability, not a general subprocess framework, so the verifier
//! and runner can be driven by a mock in tests.

use anyhow::{Context, Result, bail};
use std::process::{Command, Stdio};

/// The one capability the harness needs from the host: run a whole-line
/// filter command and observe its output size or its failure.
pub trait Execute {
    /// Run `command`, capture stdout, and return the number of
    /// newline-terminated lines it produced. Zero lines is a normal result;
    /// a non-zero exit status is an error naming the command.
    fn count_lines(&self, command: &str) -> Result<u64>;

    /// Run `command` with all output discarded. Used for warmup and
    /// measured benchmark runs.
    fn run_discard(&self, command: &str) -> Result<()>;

    /// Whether an executable of this name resolves on `$PATH`. Absence is
    /// a normal `false`, never an error.
    fn is_available(&self, tool: &str) -> bool;
}

/// Real implementation: everything goes through `sh -c`.
pub struct Shell;

impl Execute for Shell {
    fn count_lines(&self, command: &str) -> Result<u64> {
        let output = Command::new("sh")
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to spawn: {command}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("command exited with {}: {command}", output.status);
            }
            bail!(
                "command exited with {}: {command}\n  stderr: {stderr}",
                output.status
            );
        }

        Ok(memchr::memchr_iter(b'\n', &output.stdout).count() as u64)
    }

    fn run_discard(&self, command: &str) -> Result<()> {
        let status = Command::new("sh")
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("failed to spawn: {command}"))?;

        if !status.success() {
            bail!("command exited with {status}: {command}");
        }
        Ok(())
    }

    fn is_available(&self, tool: &str) -> bool {
        Command::new("which")
            .arg(tool)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
