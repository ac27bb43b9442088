use crate::error::{BloomError, Result};
use std::process::{Command, Stdio};

/// Renders a command the way a user would type it, for messages and logs.
pub fn command_line(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Runs a command to completion, capturing its output.
///
/// # Returns
/// * `Ok(String)` - Stdout of the command when it exits with code 0
/// * `Err` - If the command cannot be launched or returns a non-zero exit code
pub fn run_captured(cmd: &mut Command) -> Result<String> {
    let line = command_line(cmd);
    tracing::debug!(command = %line, "running");

    let output = cmd
        .output()
        .map_err(|e| BloomError::command(&line, format!("failed to launch: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(BloomError::command(
            line,
            format!(
                "exit code {}\nStdout: {}\nStderr: {}",
                output.status.code().unwrap_or(-1),
                stdout.trim(),
                stderr.trim()
            ),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs a command with inherited stdio so the user can see and answer it.
pub fn run_interactive(cmd: &mut Command) -> Result<()> {
    let line = command_line(cmd);
    tracing::debug!(command = %line, "running interactively");

    let status = cmd
        .status()
        .map_err(|e| BloomError::command(&line, format!("failed to launch: {}", e)))?;

    if !status.success() {
        return Err(BloomError::command(
            line,
            format!("exit code {}", status.code().unwrap_or(-1)),
        ));
    }
    Ok(())
}

/// True if the command launches and exits with code 0; all output is discarded.
pub fn succeeds_quietly(cmd: &mut Command) -> bool {
    let line = command_line(cmd);
    let ok = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    tracing::debug!(command = %line, ok, "probed");
    ok
}
