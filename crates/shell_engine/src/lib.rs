//! Headless terminal command engine: tokenization, registry lookup,
//! typo suggestions, and stateless dispatch.
//!
//! The engine is generic over the context type the hosting session owns, so
//! every session (and every test) constructs an isolated registry and
//! dispatcher — there is no ambient global state here. History and other
//! statefulness live one layer up, in the session that owns the context.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dispatch;
pub mod registry;
pub mod suggest;
pub mod tokenize;

pub use dispatch::{Dispatcher, EMPTY_INPUT_PROMPT};
pub use registry::{ArgValidator, CommandHandler, CommandRegistration, CommandRegistry};
pub use suggest::{edit_distance, suggest, MAX_SUGGESTIONS, SUGGESTION_THRESHOLD};
pub use tokenize::{tokenize, ParsedLine};
