//! Terminal UI component backed by a [`TerminalSession`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use leptos::ev::KeyboardEvent;
use leptos::*;
use shell_contract::{CompletionItem, OutputEntry, OutputKind};
use terminal_session::TerminalSession;

fn entry_class(entry: &OutputEntry) -> &'static str {
    if entry.pending {
        return "terminal-line is-pending";
    }
    match entry.kind {
        OutputKind::Success => "terminal-line is-success",
        OutputKind::Error => "terminal-line is-error",
        OutputKind::Info => "terminal-line is-info",
        OutputKind::Warning => "terminal-line is-warning",
    }
}

/// Terminal panel: transcript, prompt input, history navigation, and
/// prefix completion.
///
/// The input surface is disabled while a command is in flight, so at most
/// one command runs at a time and transcript order matches submission order.
#[component]
pub fn TerminalView(
    /// Session owned by the hosting page.
    session: TerminalSession,
) -> impl IntoView {
    let input = create_rw_signal(String::new());
    let suggestions = create_rw_signal(Vec::<CompletionItem>::new());
    let history_cursor = create_rw_signal::<Option<usize>>(None);

    let outputs = session.outputs();
    let busy = session.busy();
    let command_lines = session.command_lines();

    let submit_command: Rc<dyn Fn(String)> = Rc::new({
        let session = session.clone();
        move |line: String| {
            if busy.get_untracked() {
                return;
            }
            history_cursor.set(None);
            suggestions.set(Vec::new());
            input.set(String::new());
            let session = session.clone();
            spawn_local(async move {
                session.submit(&line).await;
            });
        }
    });

    let try_history_navigation = move |direction: i32| {
        let lines = command_lines.get_untracked();
        if lines.is_empty() {
            return;
        }
        let entries = lines.entries().to_vec();
        let next_index = match (history_cursor.get_untracked(), direction) {
            (None, -1) => Some(entries.len().saturating_sub(1)),
            (Some(index), -1) if index > 0 => Some(index - 1),
            (Some(index), 1) if index + 1 < entries.len() => Some(index + 1),
            (Some(_), 1) => None,
            (current, _) => current,
        };
        history_cursor.set(next_index);
        match next_index {
            Some(index) => input.set(entries[index].clone()),
            None => input.set(String::new()),
        }
    };

    let trigger_completion = {
        let session = session.clone();
        move || {
            let prefix = input.get_untracked();
            let items = session.complete(prefix.trim());
            if items.len() == 1 {
                input.set(format!("{} ", items[0].value));
                suggestions.set(Vec::new());
            } else {
                suggestions.set(items);
            }
        }
    };

    let indexed_entries = move || {
        outputs
            .get()
            .entries()
            .iter()
            .cloned()
            .enumerate()
            .collect::<Vec<_>>()
    };

    let submit_on_enter = submit_command.clone();
    let submit_on_click = submit_command.clone();
    let submit_clear = submit_command.clone();

    view! {
        <div class="terminal-shell">
            <div class="terminal-screen" role="log" aria-live="polite">
                <For each=indexed_entries key=|(index, _)| *index let:item>
                    <div class=entry_class(&item.1)>{item.1.text.clone()}</div>
                </For>
            </div>

            <Show when=move || !suggestions.get().is_empty() fallback=|| ()>
                <div class="terminal-completions" role="listbox" aria-label="Completions">
                    <For each=move || suggestions.get() key=|item| item.value.clone() let:item>
                        <button
                            type="button"
                            class="terminal-completion"
                            on:click=move |_| {
                                input.set(format!("{} ", item.value));
                                suggestions.set(Vec::new());
                            }
                        >
                            {item.label}
                        </button>
                    </For>
                </div>
            </Show>

            <div class="terminal-input-row">
                <label class="terminal-prompt" for="terminal-input">"visitor@termfolio:~$"</label>
                <input
                    id="terminal-input"
                    class="terminal-input"
                    type="text"
                    prop:value=move || input.get()
                    prop:disabled=move || busy.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => submit_on_enter(input.get_untracked()),
                            "ArrowUp" => {
                                ev.prevent_default();
                                try_history_navigation(-1);
                            }
                            "ArrowDown" => {
                                ev.prevent_default();
                                try_history_navigation(1);
                            }
                            "Tab" => {
                                ev.prevent_default();
                                trigger_completion();
                            }
                            "Escape" => suggestions.set(Vec::new()),
                            "l" | "L" if ev.ctrl_key() => {
                                ev.prevent_default();
                                submit_clear("clear".to_string());
                            }
                            _ => {}
                        }
                    }
                    placeholder="Try: help"
                    autocomplete="off"
                    spellcheck="false"
                />
                <button
                    type="button"
                    class="terminal-run"
                    prop:disabled=move || busy.get()
                    on:click=move |_| submit_on_click(input.get_untracked())
                >
                    "Run"
                </button>
            </div>

            <div class="terminal-statusbar">
                <span>{move || if busy.get() { "Running command" } else { "Ready" }}</span>
                <span>{move || format!("{} entrie(s)", outputs.get().len())}</span>
            </div>
        </div>
    }
}
