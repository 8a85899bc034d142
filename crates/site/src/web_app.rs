use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use platform_storage::LocalStorageStore;
use portfolio_content::{Portfolio, SECTION_IDS};
use terminal_app::TerminalView;
use terminal_session::{TerminalSession, ThemeId};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let session = TerminalSession::new(Rc::new(LocalStorageStore));
    let active_section = create_rw_signal("about".to_string());
    let guide_open = create_rw_signal(false);

    let context = session.context();
    context.attach_navigate(Rc::new(move |section| {
        active_section.set(section.to_string());
    }));
    context.attach_theme(Rc::new(apply_document_theme));
    context.attach_guide(Rc::new(move || guide_open.set(true)));
    {
        let email = context.portfolio.contact.email.clone();
        context.attach_mailer(Rc::new(move |body| open_mailto(&email, body)));
    }

    let theme = session.theme();
    let visited = session.visited_sections();
    let terminal_visible = session.terminal_visible();
    let portfolio = context.portfolio.clone();

    // One-shot hydration; the guide opens on first visit only.
    let hydrate_session = session.clone();
    let guide_dismissed = session.guide_dismissed();
    create_effect(move |_| {
        let session = hydrate_session.clone();
        spawn_local(async move {
            session.hydrate().await;
            apply_document_theme(session.theme().get_untracked());
            if !guide_dismissed.get_untracked() {
                guide_open.set(true);
            }
        });
    });

    let dismiss_session = session.clone();
    let dismiss_on_click: Rc<dyn Fn()> = Rc::new(move || {
        guide_open.set(false);
        let session = dismiss_session.clone();
        spawn_local(async move { session.dismiss_guide().await });
    });

    let toggle_session = session.clone();
    let toggle_terminal = move |_| {
        let session = toggle_session.clone();
        let visible = !terminal_visible.get_untracked();
        spawn_local(async move { session.set_terminal_visible(visible).await });
    };

    let portfolio_for_panel = portfolio.clone();
    let session_for_terminal = session.clone();

    view! {
        <Title text="Mara Lindqvist — termfolio" />
        <Meta name="description" content="A terminal-style personal portfolio." />

        <div class="site-root" data-theme=move || theme.get().css_id()>
            <header class="site-header">
                <h1>{portfolio.name.clone()}</h1>
                <p class="site-headline">{portfolio.headline.clone()}</p>
                <button type="button" class="site-action" on:click=toggle_terminal>
                    {move || if terminal_visible.get() { "Hide terminal" } else { "Show terminal" }}
                </button>
            </header>

            <nav class="section-tabs" aria-label="Sections">
                <For each=move || SECTION_IDS.iter().copied() key=|id| *id let:id>
                    <button
                        type="button"
                        class=move || {
                            let mut classes = String::from("section-tab");
                            if active_section.get() == id {
                                classes.push_str(" is-active");
                            }
                            if visited.get().iter().any(|seen| seen == id) {
                                classes.push_str(" is-visited");
                            }
                            classes
                        }
                        on:click=move |_| active_section.set(id.to_string())
                    >
                        {id}
                    </button>
                </For>
            </nav>

            <main class="section-panel">
                <h2>{move || active_section.get()}</h2>
                <pre class="section-content">
                    {move || section_text(&portfolio_for_panel, &active_section.get())}
                </pre>
            </main>

            <Show when=move || terminal_visible.get() fallback=|| ()>
                <TerminalView session=session_for_terminal.clone() />
            </Show>

            <Show when=move || guide_open.get() fallback=|| ()>
                <div class="guide-overlay" role="dialog" aria-label="Quick start">
                    <div class="guide-card">
                        <h2>"Welcome"</h2>
                        <p>"This portfolio answers to a command line. A few starters:"</p>
                        <ul>
                            <li><code>"help"</code>" — list every command"</li>
                            <li><code>"projects"</code>" — what I've built"</li>
                            <li><code>"goto skills"</code>" — jump to a section"</li>
                            <li><code>"theme phosphor"</code>" — change the look"</li>
                        </ul>
                        <button type="button" class="site-action" on:click={let dismiss_on_click = dismiss_on_click.clone(); move |_| dismiss_on_click()}>
                            "Got it"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn section_text(data: &Portfolio, section: &str) -> String {
    match section {
        "about" => data.summary.clone(),
        "skills" => data
            .skills
            .iter()
            .map(|group| format!("{}: {}", group.label, group.items.join(", ")))
            .collect::<Vec<_>>()
            .join("\n"),
        "projects" => data
            .projects
            .iter()
            .map(|project| format!("{} — {}", project.name, project.summary))
            .collect::<Vec<_>>()
            .join("\n"),
        "experience" => data
            .experience
            .iter()
            .map(|role| format!("{} @ {} ({})", role.title, role.org, role.period))
            .collect::<Vec<_>>()
            .join("\n"),
        "education" => data
            .education
            .iter()
            .map(|school| format!("{}, {} ({})", school.program, school.institution, school.year))
            .collect::<Vec<_>>()
            .join("\n"),
        "contact" => format!("{}\n{}", data.contact.email, data.contact.location),
        _ => "Nothing here. Try `goto about`.".to_string(),
    }
}

fn apply_document_theme(theme: ThemeId) {
    #[cfg(target_arch = "wasm32")]
    {
        let root = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element());
        if let Some(root) = root {
            if let Err(err) = root.set_attribute("data-theme", theme.css_id()) {
                logging::warn!("theme attribute update failed: {err:?}");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = theme;
    }
}

fn open_mailto(email: &str, body: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let encoded = String::from(js_sys::encode_uri_component(body));
        let url = format!("mailto:{email}?subject=Hello%20from%20termfolio&body={encoded}");
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        window
            .open_with_url_and_target(&url, "_blank")
            .map_err(|err| format!("open failed: {err:?}"))?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (email, body);
        Ok(())
    }
}
