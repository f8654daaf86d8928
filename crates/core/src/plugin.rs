//! Startup and shutdown of the alias engine inside a host.

use log::info;

use crate::command::{alias_hook, unalias_hook};
use crate::config::ALIAS_SECTION;
use crate::engine::AliasEngine;
use crate::error::Result;
use crate::file_handling::ConfigFile;
use crate::host::{HookHandle, Host};
use crate::persistence::{self, write_defaults, write_section, LoadReport};

/// The engine together with its configuration file and management hooks.
#[derive(Debug)]
pub struct AliasPlugin {
    engine: AliasEngine,
    config: ConfigFile,
    alias_hook: HookHandle,
    unalias_hook: HookHandle,
}

/// Reads the alias section into `engine`, creating the file with the default
/// aliases when it does not exist.
fn read_aliases(
    engine: &AliasEngine,
    host: &mut dyn Host,
    config: &mut ConfigFile,
) -> Result<LoadReport> {
    if !config.exists() {
        info!("Creating config file `{}` with default aliases", config.path());
        write_defaults(&mut config.section_writer(ALIAS_SECTION))?;
        config.write()?;
    }

    config.read()?;
    let records = config.section_records(ALIAS_SECTION);

    Ok(persistence::load(engine, host, records))
}

impl AliasPlugin {
    /// Loads the aliases from `config_path` and installs the `alias` and
    /// `unalias` commands.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The host refuses the `alias` or `unalias` hook
    /// - The configuration file cannot be created, read or parsed
    ///
    /// Aliases that cannot be defined, including ones named like a command the
    /// host already has, are skipped and listed in the report.
    pub fn init(host: &mut dyn Host, config_path: &str) -> Result<(Self, LoadReport)> {
        // Management hooks go first, so a record cannot take their names
        let alias_hook = host.hook_command(&alias_hook())?;
        let unalias_hook = match host.hook_command(&unalias_hook()) {
            Ok(handle) => handle,
            Err(e) => {
                host.unhook(alias_hook);
                return Err(e);
            }
        };

        let engine = AliasEngine::new();
        let mut config = ConfigFile::open(config_path);
        let report = match read_aliases(&engine, host, &mut config) {
            Ok(report) => report,
            Err(e) => {
                engine.clear_all(host);
                host.unhook(alias_hook);
                host.unhook(unalias_hook);
                return Err(e);
            }
        };

        let plugin = Self {
            engine,
            config,
            alias_hook,
            unalias_hook,
        };

        Ok((plugin, report))
    }

    pub fn engine(&self) -> &AliasEngine {
        &self.engine
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Drops every alias and loads the configuration file again.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read. The registry
    /// is left empty in that case.
    pub fn reload(&mut self, host: &mut dyn Host) -> Result<LoadReport> {
        self.engine.clear_all(host);
        read_aliases(&self.engine, host, &mut self.config)
    }

    /// Writes the current aliases to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        write_section(&self.engine, &mut self.config.section_writer(ALIAS_SECTION))?;
        self.config.write()
    }

    /// Optionally saves the aliases, then removes them and the management
    /// hooks from the host.
    ///
    /// # Errors
    ///
    /// Returns the save error, after the host has been cleaned up anyway.
    pub fn end(mut self, host: &mut dyn Host, save: bool) -> Result<()> {
        let saved = if save { self.save() } else { Ok(()) };

        self.engine.clear_all(host);
        self.config.close();
        host.unhook(self.alias_hook);
        host.unhook(self.unalias_hook);

        saved
    }
}
