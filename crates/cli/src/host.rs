//! A terminal host for the alias engine.
//!
//! Commands are entered as `/name arguments`. Hooked names run through the
//! engine, `help`, `quit`, `reload` and `save` are built in, and anything else
//! is a terminal command: printed by default, or run through the shell.

use std::io::Write;

use indexmap::IndexMap;
use log::debug;
use rust_alias_core::command::run_hook;
use rust_alias_core::config::{strip_marker, COMMAND_MARKER};
use rust_alias_core::engine::AliasEngine;
use rust_alias_core::error::{Error, Result};
use rust_alias_core::execution::execute_shell_command;
use rust_alias_core::host::{CommandHook, HookHandle, Host};

const BUILTIN_COMMANDS: [(&str, &str); 4] = [
    ("help", "list available commands"),
    ("quit", "end the session"),
    ("reload", "reload aliases from the config file"),
    ("save", "write aliases to the config file"),
];

/// What to do with commands that are neither hooked nor built in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalMode {
    Print,
    Execute { shell: String },
}

/// Built-in commands that act on the session once the current command line
/// has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    Quit,
    Reload,
    Save,
}

pub struct ConsoleHost<W: Write> {
    hooks: IndexMap<String, (HookHandle, CommandHook)>,
    next_handle: u64,
    mode: TerminalMode,
    output: W,
    requests: Vec<SessionRequest>,
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(output: W, mode: TerminalMode) -> Self {
        Self {
            hooks: IndexMap::new(),
            next_handle: 0,
            mode,
            output,
            requests: Vec::new(),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Names of the hooked commands, in the order they were hooked.
    pub fn hooked_commands(&self) -> Vec<&str> {
        self.hooks.values().map(|(_, hook)| hook.name.as_str()).collect()
    }

    /// Returns and forgets the session requests made so far.
    pub fn take_requests(&mut self) -> Vec<SessionRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Writes one message line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stdio`] if the output cannot be written.
    pub fn print(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").map_err(Error::Stdio)
    }

    fn print_help(&mut self) -> Result<()> {
        let mut lines = vec!["Commands:".to_string()];
        for (name, description) in BUILTIN_COMMANDS {
            lines.push(format!("  {COMMAND_MARKER}{name}: {description}"));
        }
        for (_, hook) in self.hooks.values() {
            lines.push(format!("  {COMMAND_MARKER}{}: {}", hook.name, hook.description));
        }
        self.print(&lines.join("\n"))
    }

    fn run_terminal_command(&mut self, command: &str) -> Result<()> {
        if let TerminalMode::Execute { shell } = &self.mode {
            return execute_shell_command(shell, strip_marker(command));
        }

        self.print(&format!("Executing command: {command}"))
    }
}

impl<W: Write> Host for ConsoleHost<W> {
    fn hook_command(&mut self, hook: &CommandHook) -> Result<HookHandle> {
        let key = hook.name.to_ascii_lowercase();
        let is_builtin = BUILTIN_COMMANDS.iter().any(|(name, _)| *name == key);

        if is_builtin || self.hooks.contains_key(&key) {
            return Err(Error::HookRegistration(hook.name.clone()));
        }

        self.next_handle += 1;
        let handle = HookHandle(self.next_handle);
        self.hooks.insert(key, (handle, hook.clone()));

        Ok(handle)
    }

    fn unhook(&mut self, handle: HookHandle) {
        self.hooks.retain(|_, (hooked, _)| *hooked != handle);
    }

    fn dispatch(&mut self, engine: &AliasEngine, command: &str) -> Result<()> {
        let line = strip_marker(command);
        let (name, arguments) = match line.split_once(' ') {
            Some((name, arguments)) => {
                let arguments = arguments.trim_start_matches(' ');
                (name, Some(arguments).filter(|a| !a.is_empty()))
            }
            None => (line, None),
        };

        if name.is_empty() {
            return Err(Error::UnknownCommand(command.to_string()));
        }

        let key = name.to_ascii_lowercase();
        debug!("Dispatching `{}`", command);

        if let Some((_, hook)) = self.hooks.get(&key).cloned() {
            if let Some(output) = run_hook(engine, self, hook.callback, &hook.name, arguments)? {
                self.print(&output.to_string())?;
            }
            return Ok(());
        }

        match key.as_str() {
            "help" => self.print_help(),
            "quit" => {
                self.requests.push(SessionRequest::Quit);
                Ok(())
            }
            "reload" => {
                self.requests.push(SessionRequest::Reload);
                Ok(())
            }
            "save" => {
                self.requests.push(SessionRequest::Save);
                Ok(())
            }
            _ => self.run_terminal_command(command),
        }
    }
}
