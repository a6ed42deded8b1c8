//! Command execution utilities
//!
//! Provides consistent command execution with proper error handling and logging.

use anyhow::{anyhow, Context, Result};
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Result of a command execution.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Convert into stdout, or an error naming the command and its stderr.
    pub fn into_checked(self, cmd: &str) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            let code = self
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            Err(anyhow!("{} failed (exit {}): {}", cmd, code, self.stderr))
        }
    }
}

/// A command invocation with extra environment variables.
///
/// Environment values are never logged, so secrets such as `PGPASSWORD`
/// can be passed here instead of on the command line.
#[derive(Debug, Default)]
pub struct Invocation<'a> {
    pub args: Vec<&'a str>,
    pub envs: Vec<(&'a str, &'a str)>,
}

/// Run a command and return its output.
///
/// This is a low-level function that returns both stdout and stderr.
/// Use `run_checked` if you want to treat non-zero exit as an error.
#[instrument(skip_all, fields(cmd = %cmd))]
pub fn run(cmd: &str, invocation: &Invocation<'_>) -> Result<CommandOutput> {
    debug!(args = ?invocation.args, "Running command");

    let output = Command::new(cmd)
        .args(&invocation.args)
        .envs(invocation.envs.iter().copied())
        .stdin(Stdio::null())
        .output()
        .context(format!("Failed to execute {}", cmd))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Run a command and return stdout if successful, error otherwise.
///
/// # Example
/// ```ignore
/// let version = run_checked("psql", &Invocation { args: vec!["--version"], ..Default::default() })?;
/// ```
pub fn run_checked(cmd: &str, invocation: &Invocation<'_>) -> Result<String> {
    run(cmd, invocation)?.into_checked(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_checked_captures_stdout() {
        let out = run_checked(
            "sh",
            &Invocation {
                args: vec!["-c", "echo \"$GREETING\""],
                envs: vec![("GREETING", "hello")],
            },
        )
        .unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_non_zero_exit_is_error() {
        let err = run_checked(
            "sh",
            &Invocation {
                args: vec!["-c", "echo boom >&2; exit 3"],
                ..Default::default()
            },
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exit 3"));
        assert!(msg.contains("boom"));
    }
}
