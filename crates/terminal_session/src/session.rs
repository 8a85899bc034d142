//! The stateful terminal session owning context, histories, and persistence.

use std::rc::Rc;

use leptos::{create_rw_signal, RwSignal, SignalGetUntracked, SignalSet, SignalUpdate};
use platform_storage::{
    clear_snapshot, load_snapshot, save_snapshot, unix_time_ms_now, StateStore,
    COMMAND_HISTORY_KEY, GUIDE_DISMISSED_KEY, OUTPUT_HISTORY_KEY, TERMINAL_VISIBLE_KEY,
    VISITED_SECTIONS_KEY,
};
use portfolio_content::{portfolio, Portfolio};
use shell_contract::{CommandDescriptor, CompletionItem, DispatchOutcome, OutputEntry, OutputKind};
use shell_engine::{CommandRegistry, Dispatcher};

use crate::commands::{builtin_registrations, CLEAR_ACTION};
use crate::context::{SessionContext, ThemeId};
use crate::error::SessionError;
use crate::history::{
    BoundedLog, COMMAND_HISTORY_CAP, COMMAND_HISTORY_SCHEMA_VERSION, OUTPUT_HISTORY_CAP,
    OUTPUT_HISTORY_SCHEMA_VERSION,
};

/// Payload schema version for the visited-section snapshot.
const VISITED_SECTIONS_SCHEMA_VERSION: u32 = 1;
/// Payload schema version for the boolean UI-state snapshots.
const UI_FLAG_SCHEMA_VERSION: u32 = 1;

/// One terminal session: an explicit, constructed instance owned by the
/// hosting shell. No ambient globals — every session (and every test) builds
/// its own registry, dispatcher, context, and history state.
///
/// `submit` runs one command at a time; the hosting view disables its input
/// surface while [`TerminalSession::busy`] is set. A handler that never
/// resolves leaves the flag set — there is no timeout.
#[derive(Clone)]
pub struct TerminalSession {
    dispatcher: Dispatcher<SessionContext>,
    context: Rc<SessionContext>,
    store: Rc<dyn StateStore>,
    outputs: RwSignal<BoundedLog<OutputEntry>>,
    busy: RwSignal<bool>,
    terminal_visible: RwSignal<bool>,
    guide_dismissed: RwSignal<bool>,
}

fn welcome_entries(data: &Portfolio) -> Vec<OutputEntry> {
    vec![
        OutputEntry::new(
            format!("{} — {}", data.name, data.headline),
            OutputKind::Info,
            unix_time_ms_now(),
        ),
        OutputEntry::new(
            "Type `help` to look around.",
            OutputKind::Info,
            unix_time_ms_now(),
        ),
    ]
}

impl TerminalSession {
    /// Creates a session over the default portfolio dataset.
    pub fn new(store: Rc<dyn StateStore>) -> Self {
        Self::with_portfolio(store, portfolio())
    }

    /// Creates a session over a caller-supplied dataset.
    pub fn with_portfolio(store: Rc<dyn StateStore>, data: Portfolio) -> Self {
        let registry = CommandRegistry::new();
        let introspection = registry.clone();

        let command_lines = create_rw_signal(BoundedLog::new(COMMAND_HISTORY_CAP));
        let visited_sections = create_rw_signal(Vec::new());
        let theme = create_rw_signal(ThemeId::default());
        let outputs = create_rw_signal(BoundedLog::from_entries(
            OUTPUT_HISTORY_CAP,
            welcome_entries(&data),
        ));

        let context = Rc::new(SessionContext::new(
            Rc::new(data),
            Rc::new(move || introspection.list()),
            command_lines,
            visited_sections,
            theme,
        ));

        for registration in builtin_registrations() {
            registry.register(registration);
        }

        Self {
            dispatcher: Dispatcher::new(registry),
            context,
            store,
            outputs,
            busy: create_rw_signal(false),
            terminal_visible: create_rw_signal(true),
            guide_dismissed: create_rw_signal(false),
        }
    }

    /// Shared execution context; the hosting view attaches collaborators
    /// (navigation, theme, guide, mailer) through it.
    pub fn context(&self) -> Rc<SessionContext> {
        self.context.clone()
    }

    /// Transcript entries, oldest first.
    pub fn outputs(&self) -> RwSignal<BoundedLog<OutputEntry>> {
        self.outputs
    }

    /// Raw command lines, oldest first.
    pub fn command_lines(&self) -> RwSignal<BoundedLog<String>> {
        self.context.command_lines
    }

    /// Sections opened through `goto`, first-visit order.
    pub fn visited_sections(&self) -> RwSignal<Vec<String>> {
        self.context.visited_sections
    }

    /// Current theme.
    pub fn theme(&self) -> RwSignal<ThemeId> {
        self.context.theme
    }

    /// Whether a command is currently in flight.
    pub fn busy(&self) -> RwSignal<bool> {
        self.busy
    }

    /// Whether the terminal panel is shown.
    pub fn terminal_visible(&self) -> RwSignal<bool> {
        self.terminal_visible
    }

    /// Whether the guide overlay has been dismissed before.
    pub fn guide_dismissed(&self) -> RwSignal<bool> {
        self.guide_dismissed
    }

    /// Registered command descriptors, sorted by name.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.dispatcher.registry().list()
    }

    /// Prefix completion for the autocomplete surface.
    pub fn complete(&self, prefix: &str) -> Vec<CompletionItem> {
        self.dispatcher.registry().complete(prefix)
    }

    /// Parses and executes one input line, recording it in history and
    /// appending the outcome to the transcript.
    ///
    /// The raw line lands in command history whether the dispatch succeeds
    /// or fails; blank lines produce an informational prompt but are not
    /// recorded. Returns the outcome so callers can inspect it.
    pub async fn submit(&self, line: &str) -> DispatchOutcome {
        if self.busy.get_untracked() {
            let outcome = DispatchOutcome::warning("another command is already running");
            self.outputs.update(|log| {
                log.push(OutputEntry::from_outcome(&outcome, unix_time_ms_now()));
            });
            return outcome;
        }
        self.busy.set(true);

        let trimmed = line.trim().to_string();
        if !trimmed.is_empty() {
            self.context.command_lines.update(|log| log.push(trimmed.clone()));
            self.persist_command_history().await;
            self.outputs.update(|log| {
                log.push(OutputEntry::pending(
                    format!("running `{trimmed}`"),
                    unix_time_ms_now(),
                ));
            });
        }

        let outcome = self.dispatcher.execute(line, self.context.clone()).await;

        if !trimmed.is_empty() {
            self.outputs.update(|log| {
                log.remove_last_matching(|entry| entry.pending);
            });
        }

        let wants_clear = outcome
            .payload
            .as_ref()
            .and_then(|payload| payload.get("action"))
            .and_then(|action| action.as_str())
            == Some(CLEAR_ACTION);

        if wants_clear {
            self.outputs.update(BoundedLog::clear);
            if let Err(err) = clear_snapshot(self.store.as_ref(), OUTPUT_HISTORY_KEY)
                .await
                .map_err(|message| SessionError::storage(OUTPUT_HISTORY_KEY, message))
            {
                leptos::logging::warn!("{err}");
            }
        } else {
            self.outputs.update(|log| {
                log.push(OutputEntry::from_outcome(&outcome, unix_time_ms_now()));
            });
            self.persist_output_history().await;
        }

        self.persist_visited_sections().await;
        self.busy.set(false);
        outcome
    }

    /// Restores every persisted snapshot, tolerating absence, corruption,
    /// and schema mismatches by keeping the current in-memory state.
    pub async fn hydrate(&self) {
        let store = self.store.as_ref();

        if let Some(lines) = load_snapshot::<_, Vec<String>>(
            store,
            COMMAND_HISTORY_KEY,
            COMMAND_HISTORY_SCHEMA_VERSION,
        )
        .await
        {
            self.context
                .command_lines
                .set(BoundedLog::from_entries(COMMAND_HISTORY_CAP, lines));
        }

        if let Some(entries) = load_snapshot::<_, Vec<OutputEntry>>(
            store,
            OUTPUT_HISTORY_KEY,
            OUTPUT_HISTORY_SCHEMA_VERSION,
        )
        .await
        {
            let had_pending = entries.iter().any(|entry| entry.pending);
            let mut entries: Vec<OutputEntry> =
                entries.into_iter().filter(|entry| !entry.pending).collect();
            if had_pending {
                entries.push(OutputEntry::new(
                    "previous command was interrupted by a reload",
                    OutputKind::Info,
                    unix_time_ms_now(),
                ));
            }
            self.outputs
                .set(BoundedLog::from_entries(OUTPUT_HISTORY_CAP, entries));
        }

        if let Some(visited) = load_snapshot::<_, Vec<String>>(
            store,
            VISITED_SECTIONS_KEY,
            VISITED_SECTIONS_SCHEMA_VERSION,
        )
        .await
        {
            self.context.visited_sections.set(visited);
        }

        if let Some(visible) =
            load_snapshot::<_, bool>(store, TERMINAL_VISIBLE_KEY, UI_FLAG_SCHEMA_VERSION).await
        {
            self.terminal_visible.set(visible);
        }

        if let Some(dismissed) =
            load_snapshot::<_, bool>(store, GUIDE_DISMISSED_KEY, UI_FLAG_SCHEMA_VERSION).await
        {
            self.guide_dismissed.set(dismissed);
        }
    }

    /// Toggles the terminal panel and mirrors the flag to storage.
    pub async fn set_terminal_visible(&self, visible: bool) {
        self.terminal_visible.set(visible);
        self.persist_flag(TERMINAL_VISIBLE_KEY, visible).await;
    }

    /// Marks the guide overlay dismissed and mirrors the flag to storage.
    pub async fn dismiss_guide(&self) {
        self.guide_dismissed.set(true);
        self.persist_flag(GUIDE_DISMISSED_KEY, true).await;
    }

    /// Empties the command-line history and removes its snapshot.
    pub async fn clear_command_history(&self) {
        self.context.command_lines.update(BoundedLog::clear);
        if let Err(err) = clear_snapshot(self.store.as_ref(), COMMAND_HISTORY_KEY)
            .await
            .map_err(|message| SessionError::storage(COMMAND_HISTORY_KEY, message))
        {
            leptos::logging::warn!("{err}");
        }
    }

    async fn persist_command_history(&self) {
        let lines = self.context.command_lines.get_untracked().to_vec();
        self.persist_snapshot(
            COMMAND_HISTORY_KEY,
            COMMAND_HISTORY_SCHEMA_VERSION,
            &lines,
        )
        .await;
    }

    async fn persist_output_history(&self) {
        let entries: Vec<OutputEntry> = self
            .outputs
            .get_untracked()
            .entries()
            .iter()
            .filter(|entry| !entry.pending)
            .cloned()
            .collect();
        self.persist_snapshot(OUTPUT_HISTORY_KEY, OUTPUT_HISTORY_SCHEMA_VERSION, &entries)
            .await;
    }

    async fn persist_visited_sections(&self) {
        let visited = self.context.visited_sections.get_untracked();
        self.persist_snapshot(
            VISITED_SECTIONS_KEY,
            VISITED_SECTIONS_SCHEMA_VERSION,
            &visited,
        )
        .await;
    }

    async fn persist_flag(&self, key: &str, value: bool) {
        self.persist_snapshot(key, UI_FLAG_SCHEMA_VERSION, &value).await;
    }

    async fn persist_snapshot<T: serde::Serialize>(&self, key: &str, schema: u32, payload: &T) {
        if let Err(err) = save_snapshot(self.store.as_ref(), key, schema, payload)
            .await
            .map_err(|message| SessionError::storage(key, message))
        {
            leptos::logging::warn!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_storage::MemoryStateStore;
    use pretty_assertions::assert_eq;

    use super::*;

    fn session_over(store: &MemoryStateStore) -> TerminalSession {
        TerminalSession::new(Rc::new(store.clone()))
    }

    #[test]
    fn submit_records_history_and_honors_both_caps() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        for n in 0..60 {
            block_on(session.submit(&format!("echo line {n}")));
        }

        let lines = session.command_lines().get_untracked();
        assert_eq!(lines.len(), COMMAND_HISTORY_CAP);
        assert_eq!(lines.entries()[0], "echo line 10", "oldest lines not evicted");
        assert_eq!(lines.entries()[49], "echo line 59");

        let outputs = session.outputs().get_untracked();
        assert!(outputs.len() <= OUTPUT_HISTORY_CAP);
        assert!(!session.busy().get_untracked());
        runtime.dispose();
    }

    #[test]
    fn blank_input_prompts_without_touching_history() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        let outcome = block_on(session.submit("   "));
        assert_eq!(outcome.kind, OutputKind::Info);
        assert!(session.command_lines().get_untracked().is_empty());
        runtime.dispose();
    }

    #[test]
    fn typo_surfaces_an_error_entry_with_a_suggestion() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        let outcome = block_on(session.submit("projets"));
        assert_eq!(outcome.kind, OutputKind::Error);
        assert!(outcome.text.contains("projects"), "no suggestion in: {}", outcome.text);

        let outputs = session.outputs().get_untracked();
        let last = outputs.entries().last().expect("entry");
        assert_eq!(last.kind, OutputKind::Error);
        runtime.dispose();
    }

    #[test]
    fn clear_empties_the_transcript_and_its_snapshot() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        block_on(session.submit("help"));
        assert!(store.contains(OUTPUT_HISTORY_KEY));

        block_on(session.submit("clear"));
        assert!(session.outputs().get_untracked().is_empty());
        assert!(!store.contains(OUTPUT_HISTORY_KEY));

        // History still records the `clear` line itself.
        let lines = session.command_lines().get_untracked();
        assert_eq!(lines.entries().last().map(String::as_str), Some("clear"));
        runtime.dispose();
    }

    #[test]
    fn a_second_session_hydrates_what_the_first_persisted() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();

        let first = session_over(&store);
        block_on(first.submit("help"));
        block_on(first.submit("whoami"));
        let expected = first.command_lines().get_untracked().to_vec();

        let second = session_over(&store);
        block_on(second.hydrate());
        assert_eq!(second.command_lines().get_untracked().to_vec(), expected);
        assert!(!second.outputs().get_untracked().is_empty());
        runtime.dispose();
    }

    #[test]
    fn corrupt_snapshots_hydrate_as_empty_state() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        store.seed(COMMAND_HISTORY_KEY, "{definitely not an envelope");
        store.seed(OUTPUT_HISTORY_KEY, "[1,2,3]");

        let session = session_over(&store);
        let banner_len = session.outputs().get_untracked().len();
        block_on(session.hydrate());

        assert!(session.command_lines().get_untracked().is_empty());
        assert_eq!(session.outputs().get_untracked().len(), banner_len);
        runtime.dispose();
    }

    #[test]
    fn interrupted_pending_entries_are_dropped_on_hydrate() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let stale = vec![
            OutputEntry::new("done", OutputKind::Success, 1),
            OutputEntry::pending("running `send hi`", 2),
        ];
        block_on(save_snapshot(
            &store,
            OUTPUT_HISTORY_KEY,
            OUTPUT_HISTORY_SCHEMA_VERSION,
            &stale,
        ))
        .expect("seed snapshot");

        let session = session_over(&store);
        block_on(session.hydrate());

        let outputs = session.outputs().get_untracked();
        assert!(outputs.entries().iter().all(|entry| !entry.pending));
        assert!(outputs
            .entries()
            .iter()
            .any(|entry| entry.text.contains("interrupted")));
        runtime.dispose();
    }

    #[test]
    fn handler_fault_becomes_an_error_entry_and_history_stays_sound() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);
        session
            .context()
            .attach_mailer(Rc::new(|_| Err("relay unreachable".to_string())));

        let outcome = block_on(session.submit("send hello there"));
        assert_eq!(outcome.kind, OutputKind::Error);
        assert!(outcome.text.contains("relay unreachable"));

        for n in 0..55 {
            block_on(session.submit(&format!("echo after {n}")));
        }
        let lines = session.command_lines().get_untracked();
        assert_eq!(lines.len(), COMMAND_HISTORY_CAP);
        assert!(!session.busy().get_untracked());
        runtime.dispose();
    }

    #[test]
    fn goto_visits_persist_across_sessions() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();

        let first = session_over(&store);
        first.context().attach_navigate(Rc::new(|_| {}));
        block_on(first.submit("goto projects"));
        block_on(first.submit("nav about"));

        let second = session_over(&store);
        block_on(second.hydrate());
        assert_eq!(
            second.visited_sections().get_untracked(),
            vec!["projects".to_string(), "about".to_string()]
        );
        runtime.dispose();
    }

    #[test]
    fn ui_flags_round_trip_through_storage() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();

        let first = session_over(&store);
        block_on(first.set_terminal_visible(false));
        block_on(first.dismiss_guide());

        let second = session_over(&store);
        block_on(second.hydrate());
        assert!(!second.terminal_visible().get_untracked());
        assert!(second.guide_dismissed().get_untracked());
        runtime.dispose();
    }

    #[test]
    fn validator_rejection_cites_usage_in_the_transcript() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        let outcome = block_on(session.submit("goto"));
        assert_eq!(outcome.kind, OutputKind::Error);
        assert!(outcome.text.contains("usage: goto <section>"));
        runtime.dispose();
    }

    #[test]
    fn completion_is_prefix_only_and_case_insensitive() {
        let runtime = leptos::create_runtime();
        let store = MemoryStateStore::default();
        let session = session_over(&store);

        let values: Vec<String> = session
            .complete("Pro")
            .into_iter()
            .map(|item| item.value)
            .collect();
        assert_eq!(values, vec!["projects".to_string()]);

        // A near-miss that is not a prefix completes to nothing even though
        // the typo suggester would catch it.
        assert!(session.complete("projets").is_empty());
        runtime.dispose();
    }
}
