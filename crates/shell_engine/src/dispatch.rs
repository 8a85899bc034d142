//! Stateless dispatch pipeline: tokenize, resolve, validate, execute.

use std::rc::Rc;

use shell_contract::DispatchOutcome;

use crate::registry::CommandRegistry;
use crate::suggest::{suggest, SUGGESTION_THRESHOLD};
use crate::tokenize::tokenize;

/// Informational prompt returned for blank input.
pub const EMPTY_INPUT_PROMPT: &str = "Type a command, or `help` to see what's available.";

/// Composes the tokenizer, registry, and suggester into one
/// request/response pipeline.
///
/// The dispatcher is stateless between calls: it never touches history and
/// never mutates the context beyond what handlers themselves do. Faults
/// thrown by handlers are caught here — this is the only catch point — and
/// surfaced as `Error`-kind outcomes, so nothing escapes to the hosting
/// shell as an unhandled failure.
pub struct Dispatcher<C> {
    registry: CommandRegistry<C>,
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<C> Dispatcher<C> {
    /// Creates a dispatcher over an existing registry.
    pub fn new(registry: CommandRegistry<C>) -> Self {
        Self { registry }
    }

    /// Returns a handle to the underlying registry.
    pub fn registry(&self) -> CommandRegistry<C> {
        self.registry.clone()
    }

    /// Resolves and executes one raw input line.
    pub async fn execute(&self, raw: &str, context: Rc<C>) -> DispatchOutcome {
        let parsed = tokenize(raw);
        if parsed.is_empty() {
            return DispatchOutcome::info(EMPTY_INPUT_PROMPT);
        }

        let Some(registration) = self.registry.resolve(&parsed.command) else {
            let suggestions =
                suggest(&parsed.command, &self.registry.known_tokens(), SUGGESTION_THRESHOLD);
            let mut text = format!("command not found: {}", parsed.command);
            if !suggestions.is_empty() {
                text.push_str(&format!("\ndid you mean: {}?", suggestions.join(", ")));
            }
            return DispatchOutcome::error(text);
        };

        if let Some(validate) = registration.validate.as_ref() {
            if !validate(&parsed.args) {
                return DispatchOutcome::error(format!(
                    "usage: {}",
                    registration.descriptor.usage
                ));
            }
        }

        match (registration.handler)(parsed.args, context).await {
            Ok(outcome) => outcome,
            Err(fault) => DispatchOutcome::error(format!(
                "command `{}` failed: {}",
                registration.descriptor.name, fault.message
            )),
        }
    }
}
