//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::Parser;

/// Command-line arguments for the rust-alias console.
///
/// Without a command, an interactive session reads command lines from
/// standard input. With a command, that single line is run and the program
/// exits.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_alias_cli::cli_args::Args;
///
/// let args = Args::parse_from(["ra", "-x", "/j", "#rust"]);
/// assert!(args.execute);
/// assert_eq!(args.command_line(), Some("/j #rust".to_string()));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the alias config file YAML.
    ///
    /// If not provided, defaults to `~/.rust-alias/alias.yml`. The file is
    /// created with the default aliases when it does not exist.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Run expanded commands through the shell instead of printing them.
    ///
    /// The shell is taken from `$SHELL`, falling back to `/bin/bash`.
    #[arg(long, short = 'x', action)]
    pub execute: bool,

    /// Do not write the aliases back to the config file on exit.
    ///
    /// Aliases defined or removed during the session are then lost.
    #[arg(long, short = 's', action)]
    pub no_save: bool,

    /// A single command line to run, such as `/j #rust`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    /// The one-shot command line, if one was given.
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}
