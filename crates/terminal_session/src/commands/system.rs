//! Terminal housekeeping commands.

use std::rc::Rc;

use leptos::SignalGetUntracked;
use shell_contract::{CommandDescriptor, DispatchOutcome};
use shell_engine::CommandRegistration;

use super::{arity, CLEAR_ACTION};
use crate::context::SessionContext;

pub(super) fn help_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "help",
            &["?"],
            "List commands, or show one command's help.",
            "help [command]",
        ),
        Rc::new(|args: Vec<String>, context: Rc<SessionContext>| {
            Box::pin(async move {
                let descriptors = (context.descriptors)();

                if let Some(target) = args.first() {
                    let folded = target.to_lowercase();
                    let Some(matched) = descriptors.iter().find(|descriptor| {
                        descriptor
                            .matchable_tokens()
                            .any(|token| token.to_lowercase() == folded)
                    }) else {
                        return Ok(DispatchOutcome::error(format!(
                            "command not found: {target}"
                        )));
                    };

                    let mut lines = vec![
                        matched.name.clone(),
                        matched.description.clone(),
                        format!("usage: {}", matched.usage),
                    ];
                    if !matched.aliases.is_empty() {
                        lines.push(format!("aliases: {}", matched.aliases.join(", ")));
                    }
                    return Ok(DispatchOutcome::success(lines.join("\n")));
                }

                let mut lines = vec!["Available commands:".to_string()];
                for descriptor in &descriptors {
                    lines.push(format!(
                        "  {:<12} {}",
                        descriptor.name, descriptor.description
                    ));
                }
                lines.push(String::new());
                lines.push("Type `help <command>` for usage.".to_string());
                Ok(DispatchOutcome::success(lines.join("\n")))
            })
        }),
    )
    .with_validator(arity(0..=1))
}

pub(super) fn clear_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("clear", &["cls"], "Clear the transcript.", "clear"),
        Rc::new(|_, _| {
            Box::pin(async {
                Ok(DispatchOutcome::success("")
                    .with_payload(serde_json::json!({ "action": CLEAR_ACTION })))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

pub(super) fn history_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("history", &[], "Recent commands, oldest first.", "history"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let lines = context.command_lines.get_untracked();
                if lines.is_empty() {
                    return Ok(DispatchOutcome::info("no commands yet"));
                }
                let rendered = lines
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(index, line)| format!("  {:>3}  {line}", index + 1))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(DispatchOutcome::success(rendered))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

pub(super) fn echo_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("echo", &[], "Print the arguments back.", "echo [text...]"),
        Rc::new(|args: Vec<String>, _| {
            Box::pin(async move { Ok(DispatchOutcome::success(args.join(" "))) })
        }),
    )
}

pub(super) fn sudo_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("sudo", &[], "Ask for more power.", "sudo [anything]"),
        Rc::new(|_, _| {
            Box::pin(async {
                Ok(DispatchOutcome::warning(
                    "permission denied: this terminal runs on trust, not privileges",
                ))
            })
        }),
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use leptos::SignalUpdate;
    use shell_contract::OutputKind;

    use super::*;
    use crate::context::test_support::test_context;

    #[test]
    fn echo_round_trips_quoted_arguments() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let registration = echo_registration();
        let outcome = block_on((registration.handler)(
            vec!["a b".to_string(), "c".to_string()],
            context,
        ))
        .expect("handler");
        assert_eq!(outcome.text, "a b c");
        runtime.dispose();
    }

    #[test]
    fn history_renders_numbered_lines() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        context.command_lines.update(|log| {
            log.push("help".to_string());
            log.push("about".to_string());
        });
        let registration = history_registration();
        let outcome =
            block_on((registration.handler)(Vec::new(), context.clone())).expect("handler");
        assert!(outcome.text.contains("1  help"));
        assert!(outcome.text.contains("2  about"));
        runtime.dispose();
    }

    #[test]
    fn clear_emits_the_action_payload() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let registration = clear_registration();
        let outcome = block_on((registration.handler)(Vec::new(), context)).expect("handler");
        assert_eq!(outcome.payload.expect("payload")["action"], "clear");
        runtime.dispose();
    }

    #[test]
    fn sudo_is_a_warning_not_a_failure() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let registration = sudo_registration();
        let outcome = block_on((registration.handler)(
            vec!["rm".to_string(), "-rf".to_string()],
            context,
        ))
        .expect("handler");
        assert_eq!(outcome.kind, OutputKind::Warning);
        assert!(outcome.succeeded);
        runtime.dispose();
    }
}
