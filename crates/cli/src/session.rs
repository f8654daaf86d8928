//! Running command lines against a loaded alias plugin.

use std::io::{BufRead, Write};

use rust_alias_core::config::COMMAND_MARKER;
use rust_alias_core::error::{Error, Result};
use rust_alias_core::host::Host;
use rust_alias_core::persistence::LoadReport;
use rust_alias_core::plugin::AliasPlugin;

use crate::host::{ConsoleHost, SessionRequest};

/// Prints the aliases that could not be loaded.
///
/// # Errors
///
/// Returns [`Error::Stdio`] if the output cannot be written.
pub fn report_failures<W: Write>(host: &mut ConsoleHost<W>, report: &LoadReport) -> Result<()> {
    for (name, command, e) in &report.failures {
        host.print(&format!(
            "Alias: error creating alias \"{name}\" => \"{command}\": {e}"
        ))?;
    }
    Ok(())
}

/// Applies the requests made by built-in commands. Returns `false` once the
/// session should end.
fn apply_requests<W: Write>(plugin: &mut AliasPlugin, host: &mut ConsoleHost<W>) -> Result<bool> {
    let mut keep_going = true;

    for request in host.take_requests() {
        match request {
            SessionRequest::Quit => keep_going = false,
            SessionRequest::Reload => {
                let report = plugin.reload(host)?;
                host.print(&format!("Reloaded {} aliases", report.loaded))?;
                report_failures(host, &report)?;
            }
            SessionRequest::Save => {
                plugin.save()?;
                host.print(&format!("Aliases saved to `{}`", plugin.config().path()))?;
            }
        }
    }

    Ok(keep_going)
}

/// Runs one command line. A missing command marker is added.
///
/// Returns `false` once the session should end.
///
/// # Errors
///
/// Returns the error of the command, or of a reload or save it requested.
pub fn run_line<W: Write>(
    plugin: &mut AliasPlugin,
    host: &mut ConsoleHost<W>,
    line: &str,
) -> Result<bool> {
    let command = if line.starts_with(COMMAND_MARKER) {
        line.to_string()
    } else {
        format!("{COMMAND_MARKER}{line}")
    };

    let dispatched = host.dispatch(plugin.engine(), &command);
    // Requests made before a failure still apply
    let keep_going = apply_requests(plugin, host)?;
    dispatched?;

    Ok(keep_going)
}

/// Runs every line of `input` until it ends or `/quit` is entered. Errors are
/// printed and the session goes on.
///
/// # Errors
///
/// Returns [`Error::Stdio`] if reading input or writing output fails.
pub fn run_session<R: BufRead, W: Write>(
    plugin: &mut AliasPlugin,
    host: &mut ConsoleHost<W>,
    input: R,
) -> Result<()> {
    for line in input.lines() {
        let line = line.map_err(Error::Stdio)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match run_line(plugin, host, line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => host.print(&format!("Error: {e}"))?,
        }
    }

    Ok(())
}
