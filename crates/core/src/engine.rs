//! The alias engine: definition, invocation and resolution of aliases.
//!
//! An invocation marks its alias as running for as long as its commands are
//! being dispatched. Dispatching may re-enter the engine through the host, and
//! entering an alias that is already running is a circular reference. The
//! running flag is owned by a guard, so it is cleared on every exit path.

use std::cell::RefCell;

use log::{debug, error, info};

use crate::alias::Alias;
use crate::config::COMMAND_MARKER;
use crate::error::{Error, Result};
use crate::host::{CommandHook, Host};
use crate::registry::{validate_definition, Registry};
use crate::sequence::build_commands;

#[derive(Debug, Default)]
pub struct AliasEngine {
    registry: RefCell<Registry>,
}

/// Keeps an alias marked as running until dropped.
struct RunningGuard<'a> {
    registry: &'a RefCell<Registry>,
    name: String,
}

impl<'a> RunningGuard<'a> {
    /// Marks `name` as running and returns its command template.
    fn acquire(registry: &'a RefCell<Registry>, name: &str) -> Result<(Self, String)> {
        let mut aliases = registry.borrow_mut();
        let alias = aliases
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        if alias.running {
            // The frame that set the flag clears it
            error!("Circular reference when calling alias \"/{}\"", alias.name);
            return Err(Error::CircularReference(alias.name.clone()));
        }

        alias.running = true;
        let guard = Self {
            registry,
            name: alias.name.clone(),
        };

        Ok((guard, alias.command.clone()))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        // The alias may have been removed while it was running
        if let Some(alias) = self.registry.borrow_mut().get_mut(&self.name) {
            alias.running = false;
        }
    }
}

impl AliasEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new alias, or replaces the command of an existing one.
    ///
    /// Leading `/` characters are removed from `name`. A new alias gets its own
    /// command hook in the host; a redefined alias keeps its hook and its
    /// position in [`AliasEngine::list`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` or `command` is empty ([`Error::InvalidDefinition`])
    /// - `name` contains whitespace or `;` ([`Error::InvalidName`])
    /// - the host refuses the hook ([`Error::HookRegistration`]), in which case
    ///   no alias is added
    pub fn define(&self, host: &mut dyn Host, name: &str, command: &str) -> Result<Alias> {
        let name = validate_definition(name, command)?;

        if let Some(alias) = self.registry.borrow_mut().redefine(name, command) {
            info!("Alias \"{}\" redefined => \"{}\"", alias.name, command);
            return Ok(alias.clone());
        }

        let hook = host.hook_command(&CommandHook::alias(name)).map_err(|e| {
            debug!("Hook for alias \"{}\" refused: {}", name, e);
            Error::HookRegistration(name.to_string())
        })?;

        let alias = Alias::new(name, command, hook);
        self.registry.borrow_mut().insert(alias.clone());
        info!("Alias \"{}\" => \"{}\" created ({})", name, command, hook);

        Ok(alias)
    }

    /// Looks up an alias by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<Alias> {
        self.registry.borrow().get(name).cloned()
    }

    /// Removes an alias and its hook.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no alias has this name.
    pub fn remove(&self, host: &mut dyn Host, name: &str) -> Result<Alias> {
        let alias = self
            .registry
            .borrow_mut()
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        host.unhook(alias.hook);
        info!("Alias \"{}\" removed", alias.name);

        Ok(alias)
    }

    /// All aliases, in the order they were first defined.
    pub fn list(&self) -> Vec<Alias> {
        self.registry.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    /// Removes every alias and its hook.
    pub fn clear_all(&self, host: &mut dyn Host) {
        let aliases = self.registry.borrow_mut().drain();
        for alias in &aliases {
            host.unhook(alias.hook);
        }
        debug!("Removed {} aliases", aliases.len());
    }

    /// Runs the alias `name` with the raw argument string given by the user.
    ///
    /// Each command of the alias is expanded and dispatched to the host in
    /// order. Dispatching stops at the first failing command; commands already
    /// dispatched are not undone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no alias has this name ([`Error::NotFound`])
    /// - the alias is already running ([`Error::CircularReference`])
    /// - a command cannot be built or dispatched
    pub fn invoke(&self, host: &mut dyn Host, name: &str, arguments: Option<&str>) -> Result<()> {
        let (_running, template) = RunningGuard::acquire(&self.registry, name)?;

        for command in build_commands(&template, arguments)? {
            debug!("Alias \"{}\" dispatching `{}`", name, command);
            host.dispatch(self, &command)?;
        }

        Ok(())
    }

    /// Follows an alias whose command is just the name of another alias, and
    /// returns the command found at the end of the chain, without its first
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown alias and
    /// [`Error::CircularReference`] if the chain loops.
    pub fn final_command(&self, name: &str) -> Result<String> {
        let (_running, command) = RunningGuard::acquire(&self.registry, name)?;
        let target = command.strip_prefix(COMMAND_MARKER).unwrap_or(&command);

        if self.registry.borrow().contains(target) {
            return self.final_command(target);
        }

        Ok(target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;

    fn engine_with(host: &mut RecordingHost, aliases: &[(&str, &str)]) -> AliasEngine {
        let engine = AliasEngine::new();
        for (name, command) in aliases {
            engine.define(host, name, command).unwrap();
        }
        engine
    }

    fn assert_all_idle(engine: &AliasEngine) {
        assert!(engine.list().iter().all(|alias| !alias.is_running()));
    }

    #[test]
    fn test_define_and_lookup_ignore_case() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("Join", "join #rust")]);

        let alias = engine.lookup("JOIN").unwrap();
        assert_eq!(alias.name, "Join");
        assert_eq!(alias.command, "join #rust");
        assert_eq!(host.hook_names(), vec!["Join"]);
    }

    #[test]
    fn test_define_strips_marker() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("//w", "who")]);
        assert_eq!(engine.lookup("w").unwrap().name, "w");
    }

    #[test]
    fn test_redefine_keeps_hook_and_position() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "one"), ("b", "two"), ("c", "three")]);
        let hook = engine.lookup("b").unwrap().hook;

        let alias = engine.define(&mut host, "B", "deux").unwrap();
        assert_eq!(alias.hook, hook);
        assert_eq!(alias.name, "b");

        let listed: Vec<String> = engine.list().iter().map(ToString::to_string).collect();
        assert_eq!(listed, vec!["a => one", "b => deux", "c => three"]);
        assert_eq!(host.hooks.len(), 3);
    }

    #[test]
    fn test_define_invalid_leaves_registry_unchanged() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "one")]);

        assert!(matches!(
            engine.define(&mut host, "", "who"),
            Err(Error::InvalidDefinition { .. })
        ));
        assert!(matches!(
            engine.define(&mut host, "a", ""),
            Err(Error::InvalidDefinition { .. })
        ));
        assert_eq!(engine.lookup("a").unwrap().command, "one");
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_define_hook_failure_adds_nothing() {
        let mut host = RecordingHost {
            refuse_hooks: true,
            ..Default::default()
        };
        let engine = AliasEngine::new();

        let result = engine.define(&mut host, "j", "join");
        assert!(matches!(result, Err(Error::HookRegistration(name)) if name == "j"));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_remove_unknown_alias() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "one"), ("b", "two")]);

        assert!(matches!(engine.remove(&mut host, "zzz"), Err(Error::NotFound(_))));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_remove_releases_hook() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "one"), ("b", "two")]);

        engine.remove(&mut host, "A").unwrap();
        assert!(engine.lookup("a").is_none());
        assert_eq!(host.hook_names(), vec!["b"]);
    }

    #[test]
    fn test_clear_all() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "one"), ("b", "two")]);

        engine.clear_all(&mut host);
        assert!(engine.is_empty());
        assert!(host.hooks.is_empty());
    }

    #[test]
    fn test_invoke_dispatches_in_order() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("hop", "part $1;join $1")]);

        engine.invoke(&mut host, "hop", Some("#rust")).unwrap();
        assert_eq!(host.dispatched, vec!["/part #rust", "/join #rust"]);
        assert_all_idle(&engine);
    }

    #[test]
    fn test_invoke_unknown_alias() {
        let mut host = RecordingHost::default();
        let engine = AliasEngine::new();
        assert!(matches!(
            engine.invoke(&mut host, "nope", None),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_invoke_follows_nested_alias() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("hi", "greet $1"), ("greet", "msg $1 hello")]);

        engine.invoke(&mut host, "hi", Some("bob")).unwrap();
        assert_eq!(host.dispatched, vec!["/greet bob", "/msg bob hello"]);
        assert_all_idle(&engine);
    }

    #[test]
    fn test_invoke_same_alias_twice_in_sequence() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("twice", "w;w"), ("w", "who")]);

        engine.invoke(&mut host, "twice", None).unwrap();
        assert_eq!(host.dispatched, vec!["/w", "/who", "/w", "/who"]);
    }

    #[test]
    fn test_two_alias_cycle_is_rejected() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "b"), ("b", "a")]);

        let result = engine.invoke(&mut host, "a", None);
        assert!(matches!(result, Err(Error::CircularReference(name)) if name == "a"));
        assert_eq!(host.dispatched, vec!["/b", "/a"]);
        assert_all_idle(&engine);
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("loop", "echo;loop")]);

        let result = engine.invoke(&mut host, "loop", Some("x"));
        assert!(matches!(result, Err(Error::CircularReference(_))));
        assert_all_idle(&engine);

        // The engine stays usable afterwards
        engine.define(&mut host, "loop", "echo").unwrap();
        engine.invoke(&mut host, "loop", None).unwrap();
    }

    #[test]
    fn test_dispatch_failure_stops_sequence_and_resets_state() {
        let mut host = RecordingHost {
            fail_on: Some("/two".to_string()),
            ..Default::default()
        };
        let engine = engine_with(&mut host, &[("seq", "one;two;three")]);

        let result = engine.invoke(&mut host, "seq", None);
        assert!(matches!(result, Err(Error::Dispatch { .. })));
        assert_eq!(host.dispatched, vec!["/one", "/two"]);
        assert_all_idle(&engine);
    }

    #[test]
    fn test_alias_removing_itself_while_running() {
        let mut host = RecordingHost::default();
        let engine = AliasEngine::new();
        host.hooks.insert(
            crate::host::HookHandle(1000),
            CommandHook {
                callback: crate::host::HookCallback::UnaliasCommand,
                ..CommandHook::alias("unalias")
            },
        );
        engine.define(&mut host, "once", "who;unalias once").unwrap();

        engine.invoke(&mut host, "once", None).unwrap();
        assert!(engine.lookup("once").is_none());
        assert_eq!(host.dispatched, vec!["/who", "/unalias once"]);
    }

    #[test]
    fn test_final_command_follows_chain() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "/b"), ("b", "c"), ("c", "/join #rust")]);

        assert_eq!(engine.final_command("a").unwrap(), "join #rust");
        assert_eq!(engine.final_command("c").unwrap(), "join #rust");
        assert_all_idle(&engine);
    }

    #[test]
    fn test_final_command_ignores_commands_with_arguments() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "b x"), ("b", "who")]);
        assert_eq!(engine.final_command("a").unwrap(), "b x");
    }

    #[test]
    fn test_final_command_strips_one_marker() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "//b"), ("b", "who")]);
        assert_eq!(engine.final_command("a").unwrap(), "/b");
    }

    #[test]
    fn test_final_command_detects_cycle() {
        let mut host = RecordingHost::default();
        let engine = engine_with(&mut host, &[("a", "b"), ("b", "/a")]);

        assert!(matches!(
            engine.final_command("a"),
            Err(Error::CircularReference(name)) if name == "a"
        ));
        assert_all_idle(&engine);
    }
}
