//! Commands that read the biographical half of the dataset.

use std::rc::Rc;

use shell_contract::{CommandDescriptor, DispatchOutcome};
use shell_engine::CommandRegistration;

use super::{arity, render_table};
use crate::context::SessionContext;

pub(super) fn registrations() -> Vec<CommandRegistration<SessionContext>> {
    vec![
        about_registration(),
        whoami_registration(),
        contact_registration(),
        socials_registration(),
    ]
}

fn about_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("about", &["bio"], "Who runs this terminal.", "about"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let data = &context.portfolio;
                Ok(DispatchOutcome::success(format!(
                    "{} — {}\n{}\n\n{}",
                    data.name, data.headline, data.contact.location, data.summary
                )))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

fn whoami_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("whoami", &[], "One-line introduction.", "whoami"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let data = &context.portfolio;
                Ok(DispatchOutcome::success(format!(
                    "{} ({})",
                    data.name, data.headline
                )))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

fn contact_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "contact",
            &[],
            "Contact channels. Use `send` to reach out directly.",
            "contact",
        ),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let contact = &context.portfolio.contact;
                let outcome = DispatchOutcome::success(format!(
                    "email:    {}\nlocation: {}",
                    contact.email, contact.location
                ));
                let payload = serde_json::to_value(contact).ok();
                Ok(match payload {
                    Some(payload) => outcome.with_payload(payload),
                    None => outcome,
                })
            })
        }),
    )
    .with_validator(arity(0..=0))
}

fn socials_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("socials", &[], "Profiles elsewhere.", "socials"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let rows = context
                    .portfolio
                    .socials
                    .iter()
                    .map(|social| {
                        vec![
                            social.platform.clone(),
                            social.handle.clone(),
                            social.url.clone(),
                        ]
                    })
                    .collect();
                Ok(DispatchOutcome::success(render_table(
                    &["platform", "handle", "url"],
                    rows,
                )))
            })
        }),
    )
    .with_validator(arity(0..=0))
}
