//! The `alias` and `unalias` commands, and routing of hooked commands.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::alias::Alias;
use crate::config::{strip_marker, COMMAND_MARKER};
use crate::engine::AliasEngine;
use crate::error::{Error, Result};
use crate::host::{CommandHook, HookCallback, Host};

/// Text shown to the user after an `alias` or `unalias` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    List(Vec<Alias>),
    Show {
        alias: Alias,
        /// End of the alias chain, when the alias only names another alias.
        final_command: Option<String>,
    },
    NoAliasFound,
    Created {
        name: String,
        command: String,
    },
    Removed(String),
}

impl Display for CommandOutput {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandOutput::List(aliases) if aliases.is_empty() => {
                formatter.write_str("No alias defined.")
            }
            CommandOutput::List(aliases) => {
                formatter.write_str("List of aliases:")?;
                for alias in aliases {
                    write!(formatter, "\n  {alias}")?;
                }
                Ok(())
            }
            CommandOutput::Show {
                alias,
                final_command,
            } => {
                write!(formatter, "Alias:\n  {alias}")?;
                if let Some(final_command) = final_command {
                    write!(formatter, "\n  (runs {COMMAND_MARKER}{final_command})")?;
                }
                Ok(())
            }
            CommandOutput::NoAliasFound => formatter.write_str("No alias found."),
            CommandOutput::Created { name, command } => {
                write!(formatter, "Alias \"{name}\" => \"{command}\" created")
            }
            CommandOutput::Removed(name) => write!(formatter, "Alias \"{name}\" removed"),
        }
    }
}

/// Hook for the `alias` command.
pub fn alias_hook() -> CommandHook {
    CommandHook {
        name: "alias".to_string(),
        description: "create an alias for a command".to_string(),
        usage: "[alias_name [command [arguments]]]".to_string(),
        usage_description: "alias_name: name of alias\n   \
             command: command name (many commands can be separated by semicolons)\n \
             arguments: arguments for command\n\n\
             Note: in command, special variables $1, $2,..,$9 are replaced by \
             arguments given by user, and $* is replaced by all arguments."
            .to_string(),
        completion: "%- %h".to_string(),
        callback: HookCallback::AliasCommand,
    }
}

/// Hook for the `unalias` command.
pub fn unalias_hook() -> CommandHook {
    CommandHook {
        name: "unalias".to_string(),
        description: "remove an alias".to_string(),
        usage: "alias_name".to_string(),
        usage_description: "alias_name: name of alias to remove".to_string(),
        completion: "%h".to_string(),
        callback: HookCallback::UnaliasCommand,
    }
}

/// Splits `name rest of line` into the name, with one leading marker removed,
/// and the rest.
fn split_name(arguments: &str) -> (&str, &str) {
    let (name, rest) = match arguments.split_once(' ') {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (arguments, ""),
    };

    (name.strip_prefix(COMMAND_MARKER).unwrap_or(name), rest)
}

/// Lists, shows or defines aliases.
///
/// - no arguments: list every alias
/// - `name`: show one alias
/// - `name command...`: define or redefine an alias
///
/// # Errors
///
/// Returns an error if a definition is rejected by [`AliasEngine::define`].
pub fn alias_command(
    engine: &AliasEngine,
    host: &mut dyn Host,
    arguments: Option<&str>,
) -> Result<CommandOutput> {
    let arguments = arguments.unwrap_or("").trim_start();
    if arguments.trim_end().is_empty() {
        return Ok(CommandOutput::List(engine.list()));
    }

    let (name, command) = split_name(arguments);

    if command.trim_end().is_empty() {
        let Some(alias) = engine.lookup(name) else {
            return Ok(CommandOutput::NoAliasFound);
        };

        // A looping chain is logged by the walker and shown without a target
        let final_command = engine
            .final_command(&alias.name)
            .ok()
            .filter(|final_command| final_command != strip_marker(&alias.command));

        return Ok(CommandOutput::Show {
            alias,
            final_command,
        });
    }

    let alias = engine.define(host, name, command)?;

    Ok(CommandOutput::Created {
        name: alias.name,
        command: alias.command,
    })
}

/// Removes an alias.
///
/// # Errors
///
/// Returns [`Error::MissingArgument`] without a name, and [`Error::NotFound`]
/// for an unknown alias.
pub fn unalias_command(
    engine: &AliasEngine,
    host: &mut dyn Host,
    arguments: Option<&str>,
) -> Result<CommandOutput> {
    let arguments = arguments.unwrap_or("").trim();
    if arguments.is_empty() {
        return Err(Error::MissingArgument("alias_name"));
    }

    let (name, _) = split_name(arguments);
    let alias = engine.remove(host, name)?;

    Ok(CommandOutput::Removed(alias.name))
}

/// Runs the command behind a hook the engine registered.
///
/// Hosts call this when the user, or a dispatched command, enters a hooked
/// command. `name` is the hooked command name and `arguments` the rest of the
/// command line.
///
/// # Errors
///
/// Returns the error of the alias invocation or management command.
pub fn run_hook(
    engine: &AliasEngine,
    host: &mut dyn Host,
    callback: HookCallback,
    name: &str,
    arguments: Option<&str>,
) -> Result<Option<CommandOutput>> {
    debug!("Running hook `{}` ({:?}) with {:?}", name, callback, arguments);

    match callback {
        HookCallback::Alias => engine.invoke(host, name, arguments).map(|()| None),
        HookCallback::AliasCommand => alias_command(engine, host, arguments).map(Some),
        HookCallback::UnaliasCommand => unalias_command(engine, host, arguments).map(Some),
    }
}
