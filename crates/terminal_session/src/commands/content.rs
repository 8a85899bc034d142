//! Commands that present skills, projects, and history.

use std::rc::Rc;

use shell_contract::{CommandDescriptor, DispatchOutcome};
use shell_engine::CommandRegistration;

use super::{arity, render_table};
use crate::context::SessionContext;

pub(super) fn registrations() -> Vec<CommandRegistration<SessionContext>> {
    vec![
        skills_registration(),
        projects_registration(),
        experience_registration(),
        education_registration(),
    ]
}

fn skills_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("skills", &["stack"], "Skill groups.", "skills"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let rows = context
                    .portfolio
                    .skills
                    .iter()
                    .map(|group| vec![group.label.clone(), group.items.join(", ")])
                    .collect();
                Ok(DispatchOutcome::success(render_table(
                    &["group", "skills"],
                    rows,
                )))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

fn projects_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "projects",
            &["work"],
            "Project list, or one project in detail.",
            "projects [slug]",
        ),
        Rc::new(|args: Vec<String>, context: Rc<SessionContext>| {
            Box::pin(async move {
                let data = &context.portfolio;
                let Some(slug) = args.first() else {
                    let rows = data
                        .projects
                        .iter()
                        .map(|project| {
                            vec![
                                project.slug.clone(),
                                project.summary.clone(),
                                project.stack.join(", "),
                            ]
                        })
                        .collect();
                    let mut text = render_table(&["slug", "summary", "stack"], rows);
                    text.push_str("\n\nTry `projects <slug>` for details.");
                    return Ok(DispatchOutcome::success(text));
                };

                match data.project(&slug.to_lowercase()) {
                    Some(project) => Ok(DispatchOutcome::success(format!(
                        "{}\n{}\nstack: {}\n{}",
                        project.name,
                        project.summary,
                        project.stack.join(", "),
                        project.url
                    ))
                    .with_payload(serde_json::json!({ "slug": project.slug }))),
                    None => {
                        let known = data
                            .projects
                            .iter()
                            .map(|project| project.slug.as_str())
                            .collect::<Vec<_>>()
                            .join(", ");
                        Ok(DispatchOutcome::error(format!(
                            "unknown project `{slug}`. known slugs: {known}"
                        )))
                    }
                }
            })
        }),
    )
    .with_validator(arity(0..=1))
}

fn experience_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("experience", &["exp"], "Professional roles.", "experience"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let mut sections = Vec::new();
                for role in &context.portfolio.experience {
                    let mut lines =
                        vec![format!("{} @ {} ({})", role.title, role.org, role.period)];
                    for highlight in &role.highlights {
                        lines.push(format!("  - {highlight}"));
                    }
                    sections.push(lines.join("\n"));
                }
                Ok(DispatchOutcome::success(sections.join("\n\n")))
            })
        }),
    )
    .with_validator(arity(0..=0))
}

fn education_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new("education", &["edu"], "Formal education.", "education"),
        Rc::new(|_, context: Rc<SessionContext>| {
            Box::pin(async move {
                let rows = context
                    .portfolio
                    .education
                    .iter()
                    .map(|school| {
                        vec![
                            school.program.clone(),
                            school.institution.clone(),
                            school.year.clone(),
                        ]
                    })
                    .collect();
                Ok(DispatchOutcome::success(render_table(
                    &["program", "institution", "year"],
                    rows,
                )))
            })
        }),
    )
    .with_validator(arity(0..=0))
}
