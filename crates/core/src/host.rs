//! Interfaces the engine consumes from its host application.
//!
//! The host owns the command line: it installs command hooks, and it executes
//! fully expanded command strings. Dispatching a command may call back into
//! the engine when the command names another alias.

use std::fmt::{Display, Formatter};

use crate::engine::AliasEngine;
use crate::error::Result;

/// Opaque identifier for a command hook installed in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle(pub u64);

impl Display for HookHandle {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "hook#{}", self.0)
    }
}

/// What the host must call when a hooked command is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCallback {
    /// Expand the alias with the hook's name.
    Alias,
    /// The `alias` management command.
    AliasCommand,
    /// The `unalias` management command.
    UnaliasCommand,
}

/// A command hook request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHook {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub usage_description: String,
    /// Completion template, in the host's own notation.
    pub completion: String,
    pub callback: HookCallback,
}

impl CommandHook {
    /// Hook for a user-defined alias.
    pub fn alias(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: "[alias]".to_string(),
            usage: String::new(),
            usage_description: String::new(),
            completion: String::new(),
            callback: HookCallback::Alias,
        }
    }
}

pub trait Host {
    /// Installs a command hook.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::HookRegistration`] if the host refuses
    /// the hook, for instance because the name is already taken.
    fn hook_command(&mut self, hook: &CommandHook) -> Result<HookHandle>;

    /// Removes a previously installed hook. Unknown handles are ignored.
    fn unhook(&mut self, handle: HookHandle);

    /// Executes one complete command line, such as `/join #rust`.
    ///
    /// The call is synchronous and may re-enter `engine`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be executed.
    fn dispatch(&mut self, engine: &AliasEngine, command: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;
    use crate::command::run_hook;
    use crate::config::strip_marker;
    use crate::error::Error;

    /// Host that records dispatched commands and routes hooked names back
    /// into the engine. A name can only be hooked once.
    #[derive(Default)]
    pub struct RecordingHost {
        pub hooks: HashMap<HookHandle, CommandHook>,
        pub dispatched: Vec<String>,
        pub refuse_hooks: bool,
        pub fail_on: Option<String>,
        pub outputs: Vec<String>,
        pub next_handle: u64,
    }

    impl RecordingHost {
        pub fn hook_names(&self) -> Vec<String> {
            let mut names: Vec<String> = self.hooks.values().map(|h| h.name.clone()).collect();
            names.sort();
            names
        }
    }

    impl Host for RecordingHost {
        fn hook_command(&mut self, hook: &CommandHook) -> Result<HookHandle> {
            let taken = self
                .hooks
                .values()
                .any(|hooked| hooked.name.eq_ignore_ascii_case(&hook.name));
            if self.refuse_hooks || taken {
                return Err(Error::HookRegistration(hook.name.clone()));
            }
            self.next_handle += 1;
            let handle = HookHandle(self.next_handle);
            self.hooks.insert(handle, hook.clone());
            Ok(handle)
        }

        fn unhook(&mut self, handle: HookHandle) {
            self.hooks.remove(&handle);
        }

        fn dispatch(&mut self, engine: &AliasEngine, command: &str) -> Result<()> {
            self.dispatched.push(command.to_string());

            if self.fail_on.as_deref() == Some(command) {
                return Err(Error::dispatch_error(command, "refused by test host"));
            }

            let line = strip_marker(command);
            let (name, arguments) = match line.split_once(' ') {
                Some((name, arguments)) => (name, Some(arguments)),
                None => (line, None),
            };

            let hook = self
                .hooks
                .values()
                .find(|hook| hook.name.eq_ignore_ascii_case(name))
                .cloned();

            if let Some(hook) = hook {
                if let Some(output) = run_hook(engine, self, hook.callback, &hook.name, arguments)? {
                    self.outputs.push(output.to_string());
                }
            }

            Ok(())
        }
    }
}
