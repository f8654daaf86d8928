//! Rust Alias CLI Library
//!
//! This crate provides a terminal host for the rust-alias engine. It installs
//! the engine's command hooks, reads command lines, and hands every expanded
//! command to the terminal.
//!
//! # Key Features
//!
//! - **Interactive Session**: Reads `/command arguments` lines from standard input
//! - **One-Shot Mode**: Runs a single command line given on the command line
//! - **Dry Run by Default**: Expanded commands are printed unless `--execute`
//!   is given, in which case they run through the shell
//! - **Persistence**: Aliases are loaded at startup and saved on exit
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`host`]: The terminal implementation of the engine's host interface
//! - [`session`]: The line loop and its built-in session commands
//!
//! # Examples
//!
//! The CLI binary (`ra`) can be used in several ways:
//!
//! ```bash
//! # Interactive session
//! ra
//!
//! # Define an alias that runs `ls -la` on its arguments
//! ra /alias l ls -la
//!
//! # Run it through the shell
//! ra --execute /l /tmp
//!
//! # Use another config file and do not save changes
//! ra -c ./aliases.yml --no-save
//! ```

pub mod cli_args;
pub mod host;
pub mod session;
