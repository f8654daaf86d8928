//! Rust Alias Core Library
//!
//! This crate provides the alias engine for rust-alias: it binds short names to
//! one or more commands and expands them, with the user's arguments, every time
//! the short name is entered on the host's command line.
//!
//! # Key Features
//!
//! - **Argument Substitution**: `$1`..`$9`, `$*` and `\$` in alias commands
//! - **Command Sequences**: Several commands per alias, separated by `;`
//! - **Nested Aliases**: Aliases may call other aliases; loops are detected
//!   when they run and reported as errors
//! - **Persistence**: Aliases are kept in a YAML configuration file, seeded
//!   with a bundle of default aliases
//! - **Host Integration**: Hooks and dispatch go through the [`host::Host`] trait
//!
//! # Examples
//!
//! Starting the engine inside a host and running an alias:
//!
//! ```no_run
//! use rust_alias_core::config::get_config_path;
//! use rust_alias_core::host::Host;
//! use rust_alias_core::plugin::AliasPlugin;
//!
//! fn start(host: &mut dyn Host) -> rust_alias_core::error::Result<()> {
//!     let (plugin, _report) = AliasPlugin::init(host, &get_config_path(&None))?;
//!     plugin.engine().invoke(host, "J", Some("#rust"))?;
//!     plugin.end(host, true)
//! }
//! ```

pub mod alias;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod host;
pub mod persistence;
pub mod plugin;
pub mod registry;
pub mod sequence;
pub mod substitution;
