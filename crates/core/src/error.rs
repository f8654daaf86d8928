use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error creating alias \"{}\" => \"{}\": name and command may not be empty", .name, .command)]
    InvalidDefinition { name: String, command: String },

    #[error("Invalid alias name `{}`: name may not contain spaces or `;`", .0)]
    InvalidName(String),

    #[error("Alias \"{}\" not found", .0)]
    NotFound(String),

    #[error("Circular reference when calling alias \"/{}\"", .0)]
    CircularReference(String),

    #[error("Unable to register command hook for alias \"{}\"", .0)]
    HookRegistration(String),

    #[error("Out of memory while expanding alias: {}", .0)]
    ResourceExhaustion(#[from] TryReserveError),

    #[error("Missing argument: {}", .0)]
    MissingArgument(&'static str),

    #[error("Error dispatching command `{}`: {}", .command, .reason)]
    Dispatch { command: String, reason: String },

    #[error("Unknown command: `{}`", .0)]
    UnknownCommand(String),

    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },
}

impl Error {
    pub fn invalid_definition(name: &str, command: &str) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            command: command.to_string(),
        }
    }

    pub fn dispatch_error(command: &str, reason: impl Into<String>) -> Self {
        Self::Dispatch {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
