//! Client-local persistence for terminal session state.
//!
//! Wraps browser `localStorage` behind a small async key-value trait with
//! in-memory and no-op fallbacks, and layers schema-versioned snapshot
//! envelopes on top. Persistence here is always best-effort: the in-memory
//! session is the source of truth, readers treat absent/corrupt/mismatched
//! snapshots as empty state, and writers report failures without ever
//! interrupting the caller.
//!
//! # Example
//!
//! ```rust
//! use platform_storage::{load_snapshot, save_snapshot, MemoryStateStore};
//!
//! let store = MemoryStateStore::default();
//! futures::executor::block_on(async {
//!     save_snapshot(&store, "example.v1", 1, &vec!["help".to_string()])
//!         .await
//!         .expect("save");
//!     let lines: Option<Vec<String>> = load_snapshot(&store, "example.v1", 1).await;
//!     assert_eq!(lines, Some(vec!["help".to_string()]));
//! });
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod snapshot;
mod store;
mod time;
mod web;

pub use snapshot::{
    build_snapshot_envelope, clear_snapshot, decode_snapshot_payload, load_snapshot,
    save_snapshot, SnapshotEnvelope, SNAPSHOT_ENVELOPE_VERSION,
};
pub use store::{
    load_typed_with, save_typed_with, MemoryStateStore, NoopStateStore, StateStore,
    StateStoreFuture,
};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use web::LocalStorageStore;

/// Key for the persisted command-line history snapshot.
pub const COMMAND_HISTORY_KEY: &str = "termfolio.command_history.v1";
/// Key for the persisted output-transcript snapshot.
pub const OUTPUT_HISTORY_KEY: &str = "termfolio.output_history.v1";
/// Key for the persisted terminal-visibility flag.
pub const TERMINAL_VISIBLE_KEY: &str = "termfolio.terminal_visible.v1";
/// Key for the persisted visited-section list.
pub const VISITED_SECTIONS_KEY: &str = "termfolio.visited_sections.v1";
/// Key for the persisted guide-dismissal flag.
pub const GUIDE_DISMISSED_KEY: &str = "termfolio.guide_dismissed.v1";
