//! Splitting alias templates into commands ready for dispatch.

use itertools::{Itertools, Position};

use crate::config::COMMAND_MARKER;
use crate::error::Result;
use crate::substitution::{append_arguments, substitute};

/// Splits a command template on `;`.
///
/// Leading spaces of each command are dropped, and empty commands are skipped.
pub fn split_commands(template: &str) -> Vec<&str> {
    template
        .split(';')
        .map(str::trim_start)
        .filter(|command| !command.is_empty())
        .collect()
}

fn with_marker(mut command: String) -> String {
    if !command.starts_with(COMMAND_MARKER) {
        command.insert(0, COMMAND_MARKER);
    }
    command
}

/// Expands every command of `template` with `arguments`.
///
/// Arguments are forwarded to the last command when no command in the
/// sequence used a placeholder. Without arguments, commands are passed on
/// verbatim and placeholders are left untouched.
///
/// # Errors
///
/// Returns [`crate::error::Error::ResourceExhaustion`] if a command cannot be
/// allocated.
///
/// # Examples
///
/// ```
/// use rust_alias_core::sequence::build_commands;
///
/// let commands = build_commands("join $1;/msg $1 hello", Some("#rust"))?;
/// assert_eq!(commands, vec!["/join #rust", "/msg #rust hello"]);
///
/// let commands = build_commands("buffer clear;part", Some("#rust bye"))?;
/// assert_eq!(commands, vec!["/buffer clear", "/part #rust bye"]);
/// # Ok::<(), rust_alias_core::error::Error>(())
/// ```
pub fn build_commands(template: &str, arguments: Option<&str>) -> Result<Vec<String>> {
    let commands = split_commands(template);

    let Some(arguments) = arguments.filter(|arguments| !arguments.is_empty()) else {
        return Ok(commands
            .into_iter()
            .map(|command| with_marker(command.to_string()))
            .collect());
    };

    let mut some_args_consumed = false;
    let mut expanded_commands = Vec::with_capacity(commands.len());

    for (position, command) in commands.into_iter().with_position() {
        let mut expanded = substitute(command, Some(arguments))?;
        some_args_consumed |= expanded.matched();

        let is_last = matches!(position, Position::Last | Position::Only);
        if is_last && !some_args_consumed {
            append_arguments(&mut expanded.text, arguments)?;
        }

        expanded_commands.push(with_marker(expanded.text));
    }

    Ok(expanded_commands)
}
