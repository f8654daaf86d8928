//! Storage for defined aliases.
//!
//! Aliases are keyed by their lowercased name and kept in insertion order.
//! Redefining an alias changes its command in place, so it keeps its position,
//! its hook and its running state.

use indexmap::IndexMap;

use crate::alias::Alias;
use crate::config::strip_marker;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct Registry {
    aliases: IndexMap<String, Alias>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Normalises and validates an alias definition, returning the name to store.
///
/// # Errors
///
/// Returns [`Error::InvalidDefinition`] if the name (once leading markers are
/// removed) or the command is empty, and [`Error::InvalidName`] if the name
/// contains whitespace or `;`.
pub fn validate_definition<'a>(name: &'a str, command: &str) -> Result<&'a str> {
    let normalized = strip_marker(name);

    if normalized.is_empty() || command.is_empty() {
        return Err(Error::invalid_definition(name, command));
    }

    if normalized.contains(|c: char| c.is_whitespace() || c == ';') {
        return Err(Error::InvalidName(normalized.to_string()));
    }

    Ok(normalized)
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(&key(name))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Alias> {
        self.aliases.get_mut(&key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(&key(name))
    }

    /// Replaces the command of an existing alias, returning it.
    pub(crate) fn redefine(&mut self, name: &str, command: &str) -> Option<&Alias> {
        let alias = self.get_mut(name)?;
        command.clone_into(&mut alias.command);
        Some(alias)
    }

    /// Appends a new alias. An alias with the same name is replaced in place.
    pub(crate) fn insert(&mut self, alias: Alias) {
        self.aliases.insert(key(&alias.name), alias);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Alias> {
        self.aliases.shift_remove(&key(name))
    }

    /// Removes every alias, returning them in registry order.
    pub(crate) fn drain(&mut self) -> Vec<Alias> {
        self.aliases.drain(..).map(|(_, alias)| alias).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
