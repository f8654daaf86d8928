//! Configuration constants and path utilities for rust-alias.
//!
//! This module provides the defaults shared by the engine and its hosts, and
//! resolves the alias configuration file path, expanding `~` in paths.

/// Default path for the alias configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.rust-alias/alias.yml";

/// Name of the configuration section holding aliases
pub const ALIAS_SECTION: &str = "alias";

/// Character that introduces a command on the host command line
pub const COMMAND_MARKER: char = '/';

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Arguments
///
/// * `config_path_arg` - Optional custom configuration file path
///
/// # Returns
///
/// The resolved absolute path to the configuration file
///
/// # Examples
///
/// ```
/// use rust_alias_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/alias.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/alias.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Removes every leading command marker from `text`.
///
/// ```
/// use rust_alias_core::config::strip_marker;
///
/// assert_eq!(strip_marker("//join"), "join");
/// assert_eq!(strip_marker("join"), "join");
/// ```
pub fn strip_marker(text: &str) -> &str {
    text.trim_start_matches(COMMAND_MARKER)
}
