//! Static portfolio dataset rendered by the terminal commands.
//!
//! Everything here is hand-authored data with no I/O; commands read it
//! through the session context and format it for the transcript. The types
//! are serde-serializable so command payloads can carry structured slices of
//! the dataset.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Section identifiers the `goto` command accepts, in display order.
pub const SECTION_IDS: &[&str] = &[
    "about",
    "skills",
    "projects",
    "experience",
    "education",
    "contact",
];

/// One named group of related skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    /// Group label, for example "Languages".
    pub label: String,
    /// Skills in the group.
    pub items: Vec<String>,
}

/// One portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable slug used for lookups.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Technologies used.
    pub stack: Vec<String>,
    /// Canonical link.
    pub url: String,
}

/// One professional role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Job title.
    pub title: String,
    /// Organization name.
    pub org: String,
    /// Human-readable period, for example "2021 — present".
    pub period: String,
    /// Notable work in the role.
    pub highlights: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Degree or program.
    pub program: String,
    /// Institution name.
    pub institution: String,
    /// Completion year.
    pub year: String,
}

/// One social/profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    /// Platform label.
    pub platform: String,
    /// Handle shown in the transcript.
    pub handle: String,
    /// Profile URL.
    pub url: String,
}

/// Contact channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Primary email address.
    pub email: String,
    /// City / timezone hint.
    pub location: String,
}

/// The complete hand-authored portfolio object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Full name.
    pub name: String,
    /// Short headline shown next to the name.
    pub headline: String,
    /// Longer free-form introduction.
    pub summary: String,
    /// Skill groups.
    pub skills: Vec<SkillGroup>,
    /// Projects, most recent first.
    pub projects: Vec<Project>,
    /// Roles, most recent first.
    pub experience: Vec<Role>,
    /// Education entries.
    pub education: Vec<School>,
    /// Contact channels.
    pub contact: Contact,
    /// Social links.
    pub socials: Vec<Social>,
}

impl Portfolio {
    /// Looks up a project by slug.
    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }
}

/// Returns the portfolio dataset.
pub fn portfolio() -> Portfolio {
    Portfolio {
        name: "Mara Lindqvist".to_string(),
        headline: "systems-curious web engineer".to_string(),
        summary: "I build fast, resilient interfaces and the tooling behind \
                  them. Lately that means WebAssembly front ends, browser \
                  storage plumbing, and the occasional terminal that thinks \
                  it is a website."
            .to_string(),
        skills: vec![
            SkillGroup {
                label: "Languages".to_string(),
                items: vec![
                    "Rust".to_string(),
                    "TypeScript".to_string(),
                    "Python".to_string(),
                    "SQL".to_string(),
                ],
            },
            SkillGroup {
                label: "Web".to_string(),
                items: vec![
                    "Leptos".to_string(),
                    "WebAssembly".to_string(),
                    "React".to_string(),
                    "CSS".to_string(),
                ],
            },
            SkillGroup {
                label: "Infrastructure".to_string(),
                items: vec![
                    "PostgreSQL".to_string(),
                    "Docker".to_string(),
                    "GitHub Actions".to_string(),
                ],
            },
        ],
        projects: vec![
            Project {
                slug: "termfolio".to_string(),
                name: "termfolio".to_string(),
                summary: "This site: a portfolio that answers to a command line."
                    .to_string(),
                stack: vec![
                    "Rust".to_string(),
                    "Leptos".to_string(),
                    "WebAssembly".to_string(),
                ],
                url: "https://github.com/mlindqvist/termfolio".to_string(),
            },
            Project {
                slug: "driftwatch".to_string(),
                name: "driftwatch".to_string(),
                summary: "Schema-drift monitor for Postgres with a tiny TUI."
                    .to_string(),
                stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
                url: "https://github.com/mlindqvist/driftwatch".to_string(),
            },
            Project {
                slug: "pagefold".to_string(),
                name: "pagefold".to_string(),
                summary: "Static-site generator with incremental rebuilds."
                    .to_string(),
                stack: vec!["TypeScript".to_string(), "Node".to_string()],
                url: "https://github.com/mlindqvist/pagefold".to_string(),
            },
        ],
        experience: vec![
            Role {
                title: "Senior Frontend Engineer".to_string(),
                org: "Fjordline Analytics".to_string(),
                period: "2022 — present".to_string(),
                highlights: vec![
                    "Moved the dashboard hot path to a Rust/WASM module; median render dropped 40%."
                        .to_string(),
                    "Own the design-system build and its visual regression suite.".to_string(),
                ],
            },
            Role {
                title: "Full-stack Developer".to_string(),
                org: "Kantarell Studio".to_string(),
                period: "2019 — 2022".to_string(),
                highlights: vec![
                    "Shipped client sites on a shared component platform.".to_string(),
                    "Built the studio's internal preview/deploy pipeline.".to_string(),
                ],
            },
        ],
        education: vec![School {
            program: "BSc Computer Science".to_string(),
            institution: "Umeå University".to_string(),
            year: "2019".to_string(),
        }],
        contact: Contact {
            email: "mara@lindqvist.dev".to_string(),
            location: "Göteborg, Sweden (CET)".to_string(),
        },
        socials: vec![
            Social {
                platform: "GitHub".to_string(),
                handle: "mlindqvist".to_string(),
                url: "https://github.com/mlindqvist".to_string(),
            },
            Social {
                platform: "Mastodon".to_string(),
                handle: "@mara@hachyderm.io".to_string(),
                url: "https://hachyderm.io/@mara".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn project_slugs_are_unique() {
        let data = portfolio();
        let slugs: BTreeSet<_> = data.projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), data.projects.len());
    }

    #[test]
    fn project_lookup_by_slug() {
        let data = portfolio();
        assert!(data.project("driftwatch").is_some());
        assert!(data.project("missing").is_none());
    }

    #[test]
    fn every_section_id_is_nonempty_and_lowercase() {
        for id in SECTION_IDS {
            assert!(!id.is_empty());
            assert_eq!(*id, id.to_lowercase());
        }
    }

    #[test]
    fn dataset_serializes_to_json() {
        let value = serde_json::to_value(portfolio()).expect("serialize");
        assert_eq!(value["name"], "Mara Lindqvist");
        assert!(value["projects"].as_array().is_some_and(|p| !p.is_empty()));
    }
}
