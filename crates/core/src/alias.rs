use std::fmt::{Display, Formatter};

use crate::host::HookHandle;

/// A name bound to one or more host commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    /// Commands separated by `;`, possibly containing `$1`..`$9`, `$*` and `\$`.
    pub command: String,
    pub hook: HookHandle,
    pub(crate) running: bool,
}

impl Alias {
    pub(crate) fn new(name: &str, command: &str, hook: HookHandle) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            hook,
            running: false,
        }
    }

    /// Whether the alias is being expanded right now.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Display for Alias {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} => {}", self.name, self.command)
    }
}
