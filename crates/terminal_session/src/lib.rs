//! Session runtime for the portfolio terminal.
//!
//! This crate is the stateful layer one level above the command dispatcher:
//! it owns the execution context shared with command handlers, the bounded
//! command/output histories and their persisted snapshots, visited-section
//! tracking, and the builtin command set. The dispatcher itself stays a pure
//! request/response pipeline; everything with memory lives here.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod context;
pub mod error;
pub mod history;
pub mod session;

pub use context::{SessionContext, ThemeId};
pub use error::SessionError;
pub use history::{
    BoundedLog, COMMAND_HISTORY_CAP, COMMAND_HISTORY_SCHEMA_VERSION, OUTPUT_HISTORY_CAP,
    OUTPUT_HISTORY_SCHEMA_VERSION,
};
pub use session::TerminalSession;
