use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Runs `command_line` with `shell -c`, inheriting the standard streams.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_shell_command(shell: &str, command_line: &str) -> Result<()> {
    info!("Executing `{}` with {}", command_line, shell);

    let subprocess_exit_success = Command::new(shell)
        .args(["-c", command_line])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}
