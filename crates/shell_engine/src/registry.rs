//! Command registration and lookup.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use futures::future::LocalBoxFuture;
use shell_contract::{CommandDescriptor, CompletionItem, DispatchOutcome, ShellError};

/// Async command handler invoked with the argument list and the shared
/// session context.
pub type CommandHandler<C> =
    Rc<dyn Fn(Vec<String>, Rc<C>) -> LocalBoxFuture<'static, Result<DispatchOutcome, ShellError>>>;

/// Pure argument predicate run before the handler; rejection surfaces the
/// descriptor's usage string and skips execution entirely.
pub type ArgValidator = Rc<dyn Fn(&[String]) -> bool>;

/// One registered command: metadata plus its validator and handler.
pub struct CommandRegistration<C> {
    /// Registration metadata.
    pub descriptor: CommandDescriptor,
    /// Optional argument predicate.
    pub validate: Option<ArgValidator>,
    /// Execution function.
    pub handler: CommandHandler<C>,
}

impl<C> Clone for CommandRegistration<C> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            validate: self.validate.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C> CommandRegistration<C> {
    /// Creates a registration without an argument validator.
    pub fn new(descriptor: CommandDescriptor, handler: CommandHandler<C>) -> Self {
        Self {
            descriptor,
            validate: None,
            handler,
        }
    }

    /// Attaches an argument validator.
    pub fn with_validator(mut self, validate: ArgValidator) -> Self {
        self.validate = Some(validate);
        self
    }
}

struct RegistryState<C> {
    commands: BTreeMap<String, CommandRegistration<C>>,
    aliases: BTreeMap<String, String>,
}

impl<C> Default for RegistryState<C> {
    fn default() -> Self {
        Self {
            commands: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

/// Shared command registry: case-folded name map plus alias indirection.
///
/// Built append-only during session construction and read-only afterwards
/// from the dispatcher's perspective. Every alias entry targets a name that
/// is present in the primary map.
pub struct CommandRegistry<C> {
    state: Rc<RefCell<RegistryState<C>>>,
}

impl<C> Clone for CommandRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState::default())),
        }
    }
}

impl<C> CommandRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a command by case-folded name and indexes its aliases.
    ///
    /// Re-registering an existing name silently replaces the prior
    /// registration (last wins); the replaced descriptor's aliases are
    /// dropped so every remaining alias still targets a live name.
    pub fn register(&self, registration: CommandRegistration<C>) {
        let folded = registration.descriptor.name.to_lowercase();
        let mut state = self.state.borrow_mut();
        state.aliases.retain(|_, target| *target != folded);
        for alias in &registration.descriptor.aliases {
            state.aliases.insert(alias.to_lowercase(), folded.clone());
        }
        state.commands.insert(folded, registration);
    }

    /// Resolves a name or alias, case-insensitively. Names win over aliases.
    pub fn resolve(&self, token: &str) -> Option<CommandRegistration<C>> {
        let folded = token.to_lowercase();
        let state = self.state.borrow();
        if let Some(found) = state.commands.get(&folded) {
            return Some(found.clone());
        }
        let target = state.aliases.get(&folded)?;
        state.commands.get(target).cloned()
    }

    /// Returns all registered descriptors, sorted by name.
    pub fn list(&self) -> Vec<CommandDescriptor> {
        self.state
            .borrow()
            .commands
            .values()
            .map(|registration| registration.descriptor.clone())
            .collect()
    }

    /// Returns every matchable token: each name followed by its aliases.
    pub fn known_tokens(&self) -> Vec<String> {
        let state = self.state.borrow();
        state
            .commands
            .values()
            .flat_map(|registration| {
                registration
                    .descriptor
                    .matchable_tokens()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Prefix-only completion over names and aliases, case-insensitive.
    ///
    /// This is the autocomplete-as-you-type mode; it is distinct from the
    /// edit-distance typo suggester used on resolution misses.
    pub fn complete(&self, prefix: &str) -> Vec<CompletionItem> {
        let needle = prefix.to_lowercase();
        let state = self.state.borrow();
        let mut items = Vec::new();
        for registration in state.commands.values() {
            for token in registration.descriptor.matchable_tokens() {
                if token.to_lowercase().starts_with(&needle) {
                    items.push(CompletionItem {
                        value: token.to_string(),
                        label: token.to_string(),
                        detail: Some(registration.descriptor.description.clone()),
                    });
                }
            }
        }
        items.sort_by(|left, right| left.value.cmp(&right.value));
        items.dedup_by(|left, right| left.value == right.value);
        items
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.state.borrow().commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().commands.is_empty()
    }
}
