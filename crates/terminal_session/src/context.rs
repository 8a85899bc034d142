//! Shared execution context handed to every command handler.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::RwSignal;
use portfolio_content::Portfolio;
use serde::{Deserialize, Serialize};
use shell_contract::CommandDescriptor;

use crate::history::BoundedLog;

/// Terminal theme identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    /// Dark default.
    Midnight,
    /// Light.
    Paper,
    /// Green-on-black.
    Phosphor,
}

impl ThemeId {
    /// Every selectable theme, in display order.
    pub const ALL: &'static [ThemeId] = &[ThemeId::Midnight, ThemeId::Paper, ThemeId::Phosphor];

    /// CSS identifier applied to the page root.
    pub fn css_id(self) -> &'static str {
        match self {
            ThemeId::Midnight => "midnight",
            ThemeId::Paper => "paper",
            ThemeId::Phosphor => "phosphor",
        }
    }

    /// Parses a theme name, case-insensitively.
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "midnight" => Some(ThemeId::Midnight),
            "paper" => Some(ThemeId::Paper),
            "phosphor" => Some(ThemeId::Phosphor),
            _ => None,
        }
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        ThemeId::Midnight
    }
}

/// Section-navigation callback.
pub type NavigateFn = Rc<dyn Fn(&str)>;
/// Theme-application callback.
pub type ThemeFn = Rc<dyn Fn(ThemeId)>;
/// Guide-overlay trigger.
pub type GuideFn = Rc<dyn Fn()>;
/// Message-delivery host hook; the error string describes the transport
/// failure.
pub type MailerFn = Rc<dyn Fn(&str) -> Result<(), String>>;
/// Registry introspection hook used by `help`.
pub type DescriptorsFn = Rc<dyn Fn() -> Vec<CommandDescriptor>>;

/// Mutable record shared across all command invocations within one session.
///
/// Collaborator callbacks are explicitly optional: the hosting view attaches
/// them after mount, and commands that need a missing collaborator return an
/// informative error outcome instead of failing. The session owns this
/// structure; handlers receive it by `Rc` and only mutate the designated
/// fields (visited sections, theme, message cooldown).
pub struct SessionContext {
    /// Static portfolio dataset.
    pub portfolio: Rc<Portfolio>,
    /// Registry introspection for `help`.
    pub descriptors: DescriptorsFn,
    /// Command-line history, shared with the session layer that persists it.
    pub command_lines: RwSignal<BoundedLog<String>>,
    /// Sections the visitor has opened through `goto`, oldest first.
    pub visited_sections: RwSignal<Vec<String>>,
    /// Current theme.
    pub theme: RwSignal<ThemeId>,
    /// Unix-ms timestamp of the last delivered message, for the send
    /// cooldown. In-memory only; never persisted.
    pub last_message_sent_ms: Cell<Option<u64>>,
    navigate: RefCell<Option<NavigateFn>>,
    apply_theme: RefCell<Option<ThemeFn>>,
    show_guide: RefCell<Option<GuideFn>>,
    mailer: RefCell<Option<MailerFn>>,
}

impl SessionContext {
    /// Creates a context with no collaborators attached.
    pub fn new(
        portfolio: Rc<Portfolio>,
        descriptors: DescriptorsFn,
        command_lines: RwSignal<BoundedLog<String>>,
        visited_sections: RwSignal<Vec<String>>,
        theme: RwSignal<ThemeId>,
    ) -> Self {
        Self {
            portfolio,
            descriptors,
            command_lines,
            visited_sections,
            theme,
            last_message_sent_ms: Cell::new(None),
            navigate: RefCell::new(None),
            apply_theme: RefCell::new(None),
            show_guide: RefCell::new(None),
            mailer: RefCell::new(None),
        }
    }

    /// Attaches the section-navigation callback.
    pub fn attach_navigate(&self, callback: NavigateFn) {
        *self.navigate.borrow_mut() = Some(callback);
    }

    /// Attaches the theme-application callback.
    pub fn attach_theme(&self, callback: ThemeFn) {
        *self.apply_theme.borrow_mut() = Some(callback);
    }

    /// Attaches the guide-overlay trigger.
    pub fn attach_guide(&self, callback: GuideFn) {
        *self.show_guide.borrow_mut() = Some(callback);
    }

    /// Attaches the message-delivery hook.
    pub fn attach_mailer(&self, callback: MailerFn) {
        *self.mailer.borrow_mut() = Some(callback);
    }

    /// Current navigation callback, if one is attached.
    pub fn navigate(&self) -> Option<NavigateFn> {
        self.navigate.borrow().clone()
    }

    /// Current theme-application callback, if one is attached.
    pub fn apply_theme(&self) -> Option<ThemeFn> {
        self.apply_theme.borrow().clone()
    }

    /// Current guide trigger, if one is attached.
    pub fn show_guide(&self) -> Option<GuideFn> {
        self.show_guide.borrow().clone()
    }

    /// Current message-delivery hook, if one is attached.
    pub fn mailer(&self) -> Option<MailerFn> {
        self.mailer.borrow().clone()
    }

    /// Records a visited section, once per section, preserving first-visit
    /// order.
    pub fn record_visit(&self, section: &str) {
        use leptos::SignalUpdate;

        let section = section.to_string();
        self.visited_sections.update(|visited| {
            if !visited.contains(&section) {
                visited.push(section);
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use leptos::create_rw_signal;

    use super::*;
    use crate::history::{BoundedLog, COMMAND_HISTORY_CAP};

    /// Builds an isolated context with no collaborators attached. Callers
    /// must hold a `leptos` runtime.
    pub(crate) fn test_context() -> Rc<SessionContext> {
        Rc::new(SessionContext::new(
            Rc::new(portfolio_content::portfolio()),
            Rc::new(Vec::new),
            create_rw_signal(BoundedLog::new(COMMAND_HISTORY_CAP)),
            create_rw_signal(Vec::new()),
            create_rw_signal(ThemeId::default()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use leptos::SignalGetUntracked;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn theme_names_round_trip() {
        for theme in ThemeId::ALL {
            assert_eq!(ThemeId::from_name(theme.css_id()), Some(*theme));
        }
        assert_eq!(ThemeId::from_name("MIDNIGHT"), Some(ThemeId::Midnight));
        assert_eq!(ThemeId::from_name("neon"), None);
    }

    #[test]
    fn visits_record_once_in_first_visit_order() {
        let runtime = leptos::create_runtime();
        let context = test_support::test_context();
        context.record_visit("projects");
        context.record_visit("about");
        context.record_visit("projects");
        assert_eq!(
            context.visited_sections.get_untracked(),
            vec!["projects".to_string(), "about".to_string()]
        );
        runtime.dispose();
    }

    #[test]
    fn collaborators_start_detached_and_attach_later() {
        let runtime = leptos::create_runtime();
        let context = test_support::test_context();
        assert!(context.navigate().is_none());
        assert!(context.mailer().is_none());

        context.attach_navigate(Rc::new(|_| {}));
        assert!(context.navigate().is_some());
        runtime.dispose();
    }
}
