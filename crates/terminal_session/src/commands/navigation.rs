//! Commands that drive the hosting page: sections, theme, guide overlay.

use std::rc::Rc;

use portfolio_content::SECTION_IDS;
use shell_contract::{CommandDescriptor, DispatchOutcome};
use shell_engine::CommandRegistration;

use super::arity;
use crate::context::{SessionContext, ThemeId};

pub(super) fn registrations() -> Vec<CommandRegistration<SessionContext>> {
    vec![
        goto_registration(),
        theme_registration(),
        guide_registration(),
    ]
}

fn goto_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "goto",
            &["nav", "cd"],
            "Open a portfolio section.",
            "goto <section>",
        ),
        Rc::new(|args: Vec<String>, context: Rc<SessionContext>| {
            Box::pin(async move {
                let Some(raw) = args.first() else {
                    return Ok(DispatchOutcome::error("usage: goto <section>"));
                };
                let section = raw.to_lowercase();
                if !SECTION_IDS.contains(&section.as_str()) {
                    return Ok(DispatchOutcome::error(format!(
                        "unknown section `{section}`. sections: {}",
                        SECTION_IDS.join(", ")
                    )));
                }

                let Some(navigate) = context.navigate() else {
                    return Ok(DispatchOutcome::error(
                        "navigation is not attached in this host",
                    ));
                };
                navigate(&section);
                context.record_visit(&section);
                Ok(DispatchOutcome::success(format!("opened `{section}`")))
            })
        }),
    )
    .with_validator(arity(1..=1))
}

fn theme_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "theme",
            &[],
            "Show or switch the terminal theme.",
            "theme [name]",
        ),
        Rc::new(|args: Vec<String>, context: Rc<SessionContext>| {
            Box::pin(async move {
                use leptos::{SignalGetUntracked, SignalSet};

                let names = ThemeId::ALL
                    .iter()
                    .map(|theme| theme.css_id())
                    .collect::<Vec<_>>()
                    .join(", ");

                let Some(raw) = args.first() else {
                    return Ok(DispatchOutcome::info(format!(
                        "current theme: {}\navailable: {names}",
                        context.theme.get_untracked().css_id()
                    )));
                };

                let Some(theme) = ThemeId::from_name(raw) else {
                    return Ok(DispatchOutcome::error(format!(
                        "unknown theme `{raw}`. available: {names}"
                    )));
                };

                context.theme.set(theme);
                if let Some(apply) = context.apply_theme() {
                    apply(theme);
                }
                Ok(DispatchOutcome::success(format!(
                    "theme set to {}",
                    theme.css_id()
                )))
            })
        }),
    )
    .with_validator(arity(0..=1))
}

fn guide_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "guide",
            &["tour"],
            "Open the quick-start guide overlay.",
            "guide",
        ),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let Some(show) = context.show_guide() else {
                    return Ok(DispatchOutcome::error(
                        "the guide overlay is not available in this host",
                    ));
                };
                show();
                Ok(DispatchOutcome::success("opening the guide"))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use leptos::SignalGetUntracked;
    use pretty_assertions::assert_eq;
    use shell_contract::OutputKind;

    use super::*;
    use crate::context::test_support::test_context;

    #[test]
    fn goto_degrades_without_a_navigation_callback() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let registration = goto_registration();
        let outcome = block_on((registration.handler)(vec!["about".to_string()], context))
            .expect("handler");
        assert_eq!(outcome.kind, OutputKind::Error);
        assert!(outcome.text.contains("navigation"));
        runtime.dispose();
    }

    #[test]
    fn goto_navigates_and_records_the_visit() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = seen.clone();
        context.attach_navigate(Rc::new(move |section| {
            sink.borrow_mut().push(section.to_string());
        }));

        let registration = goto_registration();
        let outcome = block_on((registration.handler)(
            vec!["PROJECTS".to_string()],
            context.clone(),
        ))
        .expect("handler");
        assert!(outcome.succeeded);
        assert_eq!(seen.borrow().clone(), vec!["projects".to_string()]);
        assert_eq!(
            context.visited_sections.get_untracked(),
            vec!["projects".to_string()]
        );
        runtime.dispose();
    }

    #[test]
    fn theme_switch_updates_state_even_without_a_host_callback() {
        let runtime = leptos::create_runtime();
        let context = test_context();
        let registration = theme_registration();
        let outcome = block_on((registration.handler)(
            vec!["phosphor".to_string()],
            context.clone(),
        ))
        .expect("handler");
        assert!(outcome.succeeded);
        assert_eq!(context.theme.get_untracked(), ThemeId::Phosphor);

        let outcome = block_on((registration.handler)(vec!["neon".to_string()], context))
            .expect("handler");
        assert_eq!(outcome.kind, OutputKind::Error);
        runtime.dispose();
    }
}
