//! Shared terminal command contracts used by the command engine, the session
//! runtime, and the terminal UI.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable
//! command metadata, dispatch outcomes, completion payloads, and transcript
//! entries without depending on Leptos, browser APIs, or session internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of one dispatch outcome or transcript entry.
///
/// These four kinds are the complete set; callers may match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// The command completed and produced its normal output.
    Success,
    /// The command failed or could not be resolved.
    Error,
    /// Informational output that is neither success nor failure.
    Info,
    /// The command completed but wants the user's attention.
    Warning,
}

impl OutputKind {
    /// Returns the kind as its serialized kebab-case token.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputKind::Success => "success",
            OutputKind::Error => "error",
            OutputKind::Info => "info",
            OutputKind::Warning => "warning",
        }
    }
}

/// Positional argument metadata rendered in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArgSpec {
    /// Human-readable argument label.
    pub name: String,
    /// Short description.
    pub summary: String,
    /// Whether this argument is required.
    pub required: bool,
}

/// Full registration metadata for one command.
///
/// Descriptors are constructed once at session startup and never mutated.
/// The `name` is unique case-insensitively; `aliases` map to the same
/// command. Alias collisions are resolved last-registration-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Canonical command name, matched case-insensitively.
    pub name: String,
    /// Alternate names resolving to the same command.
    pub aliases: Vec<String>,
    /// Summary sentence shown in listings.
    pub description: String,
    /// Usage string cited on argument-validation failures.
    pub usage: String,
    /// Positional argument metadata.
    pub args: Vec<CommandArgSpec>,
}

impl CommandDescriptor {
    /// Builds a descriptor with no positional arguments.
    pub fn new(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            description: description.into(),
            usage: usage.into(),
            args: Vec::new(),
        }
    }

    /// Adds positional argument metadata.
    pub fn with_args(mut self, args: Vec<CommandArgSpec>) -> Self {
        self.args = args;
        self
    }

    /// Iterates the canonical name followed by every alias.
    pub fn matchable_tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Structured result returned by every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Whether the command ran to completion successfully.
    pub succeeded: bool,
    /// Text rendered into the transcript.
    pub text: String,
    /// Severity classification.
    pub kind: OutputKind,
    /// Optional structured payload for the hosting shell (for example the
    /// clear-transcript action marker).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl DispatchOutcome {
    /// Successful outcome with `Success` kind.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            text: text.into(),
            kind: OutputKind::Success,
            payload: None,
        }
    }

    /// Failed outcome with `Error` kind.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            text: text.into(),
            kind: OutputKind::Error,
            payload: None,
        }
    }

    /// Informational outcome. Not an error: used for empty input and other
    /// prompts that should not render as failures.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            text: text.into(),
            kind: OutputKind::Info,
            payload: None,
        }
    }

    /// Completed-with-caveat outcome.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            text: text.into(),
            kind: OutputKind::Warning,
            payload: None,
        }
    }

    /// Attaches a structured payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Handler-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellErrorCode {
    /// User input violated command usage.
    Usage,
    /// The requested resource does not exist.
    NotFound,
    /// A collaborator the command needs is not attached in this host.
    Unavailable,
    /// Internal command failure.
    Internal,
}

/// Error surfaced by command handlers.
///
/// Errors never escape the dispatch boundary: the dispatcher converts them
/// into `Error`-kind outcomes and the session continues normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellError {
    /// Error category.
    pub code: ShellErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ShellErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Usage-violation error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Usage, message)
    }

    /// Missing-resource error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::NotFound, message)
    }

    /// Detached-collaborator error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Unavailable, message)
    }

    /// Internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// One completion candidate for the autocomplete surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Text inserted into the input line.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Optional short description.
    pub detail: Option<String>,
}

/// One produced transcript entry.
///
/// Insertion order is display order; the session layer bounds the sequence
/// and drops the oldest entries first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    /// Rendered text.
    pub text: String,
    /// Severity classification.
    pub kind: OutputKind,
    /// Production time in unix milliseconds.
    pub timestamp_unix_ms: u64,
    /// Whether the producing command was still running when this entry was
    /// recorded. Pending entries are replaced on completion and are not
    /// restored across reloads.
    #[serde(default)]
    pub pending: bool,
}

impl OutputEntry {
    /// Creates a completed entry.
    pub fn new(text: impl Into<String>, kind: OutputKind, timestamp_unix_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp_unix_ms,
            pending: false,
        }
    }

    /// Creates a still-running placeholder entry.
    pub fn pending(text: impl Into<String>, timestamp_unix_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind: OutputKind::Info,
            timestamp_unix_ms,
            pending: true,
        }
    }

    /// Builds an entry from a dispatch outcome.
    pub fn from_outcome(outcome: &DispatchOutcome, timestamp_unix_ms: u64) -> Self {
        Self::new(outcome.text.clone(), outcome.kind, timestamp_unix_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(OutputKind::Warning).expect("serialize"),
            json!("warning")
        );
        assert_eq!(OutputKind::Error.as_str(), "error");
    }

    #[test]
    fn outcome_constructors_set_succeeded_and_kind() {
        assert!(DispatchOutcome::success("ok").succeeded);
        assert!(!DispatchOutcome::error("no").succeeded);
        let info = DispatchOutcome::info("type something");
        assert!(!info.succeeded);
        assert_eq!(info.kind, OutputKind::Info);
    }

    #[test]
    fn outcome_payload_is_omitted_when_absent() {
        let value = serde_json::to_value(DispatchOutcome::success("ok")).expect("serialize");
        assert!(value.as_object().is_some_and(|o| !o.contains_key("payload")));

        let tagged = DispatchOutcome::success("ok").with_payload(json!({"action": "clear"}));
        let value = serde_json::to_value(tagged).expect("serialize");
        assert_eq!(value["payload"]["action"], json!("clear"));
    }

    #[test]
    fn descriptor_matchable_tokens_lead_with_name() {
        let descriptor = CommandDescriptor::new("goto", &["nav", "cd"], "Navigate.", "goto <id>");
        let tokens = descriptor.matchable_tokens().collect::<Vec<_>>();
        assert_eq!(tokens, vec!["goto", "nav", "cd"]);
    }

    #[test]
    fn pending_entry_round_trips_with_default() {
        let entry = OutputEntry::new("done", OutputKind::Success, 7);
        let value = serde_json::to_value(&entry).expect("serialize");
        let decoded: OutputEntry = serde_json::from_value(value).expect("deserialize");
        assert!(!decoded.pending);
    }
}
