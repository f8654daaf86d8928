//! Mapping between the alias registry and the configuration store.
//!
//! Every alias is stored as one line of the `alias` section: the key is the
//! alias name and the value is the command template in double quotes.

use log::{info, warn};

use crate::engine::AliasEngine;
use crate::error::{Error, Result};
use crate::host::Host;

/// Aliases written to a newly created configuration file.
pub const DEFAULT_ALIASES: [(&str, &str); 24] = [
    ("SAY", "msg *"),
    ("BYE", "quit"),
    ("EXIT", "quit"),
    ("SIGNOFF", "quit"),
    ("C", "clear"),
    ("CL", "clear"),
    ("CLOSE", "buffer close"),
    ("CHAT", "dcc chat"),
    ("IG", "ignore"),
    ("J", "join"),
    ("K", "kick"),
    ("KB", "kickban"),
    ("LEAVE", "part"),
    ("M", "msg"),
    ("MUB", "unban *"),
    ("N", "names"),
    ("Q", "query"),
    ("T", "topic"),
    ("UB", "unban"),
    ("UNIG", "unignore"),
    ("W", "who"),
    ("WC", "window merge"),
    ("WI", "whois"),
    ("WW", "whowas"),
];

/// Destination for the lines of one configuration section.
pub trait SectionWriter {
    /// Writes one `option = value` line.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot take the line.
    fn write_line(&mut self, option: &str, value: &str) -> Result<()>;
}

impl SectionWriter for Vec<(String, String)> {
    fn write_line(&mut self, option: &str, value: &str) -> Result<()> {
        self.push((option.to_string(), value.to_string()));
        Ok(())
    }
}

/// Wraps a command in double quotes.
pub fn quote(command: &str) -> String {
    format!("\"{command}\"")
}

/// Removes one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value)
}

/// Outcome of loading alias records.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records that could not be defined, with the reason.
    pub failures: Vec<(String, String, Error)>,
}

/// Defines one alias per `(name, command)` record.
///
/// A record that cannot be defined is logged and skipped; the remaining records
/// are still loaded. References between aliases are not checked here, loops
/// are only detected when an alias runs.
pub fn load<I, K, V>(engine: &AliasEngine, host: &mut dyn Host, records: I) -> LoadReport
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut report = LoadReport::default();

    for (name, value) in records {
        let (name, command) = (name.as_ref(), unquote(value.as_ref()));

        match engine.define(host, name, command) {
            Ok(_) => report.loaded += 1,
            Err(e) => {
                warn!(
                    "Alias: error creating alias \"{}\" => \"{}\": {}",
                    name, command, e
                );
                report
                    .failures
                    .push((name.to_string(), command.to_string(), e));
            }
        }
    }

    info!(
        "Loaded {} aliases ({} failed)",
        report.loaded,
        report.failures.len()
    );

    report
}

/// Writes every alias, in registry order, with its command quoted.
///
/// # Errors
///
/// Returns the first error of the writer.
pub fn write_section(engine: &AliasEngine, writer: &mut dyn SectionWriter) -> Result<()> {
    for alias in engine.list() {
        writer.write_line(&alias.name, &quote(&alias.command))?;
    }
    Ok(())
}

/// Writes the built-in aliases.
///
/// # Errors
///
/// Returns the first error of the writer.
pub fn write_defaults(writer: &mut dyn SectionWriter) -> Result<()> {
    for (name, command) in DEFAULT_ALIASES {
        writer.write_line(name, &quote(command))?;
    }
    Ok(())
}

/// The registry as `(name, quoted command)` records.
pub fn save(engine: &AliasEngine) -> Vec<(String, String)> {
    engine
        .list()
        .into_iter()
        .map(|alias| (alias.name, quote(&alias.command)))
        .collect()
}
