//! Schema-versioned snapshot envelopes.
//!
//! Every persisted value is wrapped in an envelope carrying an envelope
//! version, the owning key, an app-defined schema version, and a timestamp.
//! Readers discard mismatched or malformed envelopes and start from empty
//! state; there is no migration path.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::store::StateStore;
use crate::time::next_monotonic_timestamp_ms;

/// Version for [`SnapshotEnvelope`] metadata serialization.
pub const SNAPSHOT_ENVELOPE_VERSION: u32 = 1;

/// Versioned envelope for persisted session-state payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    /// Envelope schema version.
    pub envelope_version: u32,
    /// Storage key the envelope belongs under.
    pub key: String,
    /// App-defined schema version for the payload.
    pub schema_version: u32,
    /// Last update time in unix milliseconds.
    pub updated_at_unix_ms: u64,
    /// Serialized payload.
    pub payload: Value,
}

/// Builds a versioned envelope from a serializable payload, stamping it with
/// a monotonic timestamp.
///
/// # Errors
///
/// Returns an error when `payload` cannot be converted to JSON.
pub fn build_snapshot_envelope<T: Serialize>(
    key: &str,
    schema_version: u32,
    payload: &T,
) -> Result<SnapshotEnvelope, String> {
    let payload = serde_json::to_value(payload).map_err(|e| e.to_string())?;
    Ok(SnapshotEnvelope {
        envelope_version: SNAPSHOT_ENVELOPE_VERSION,
        key: key.to_string(),
        schema_version,
        updated_at_unix_ms: next_monotonic_timestamp_ms(),
        payload,
    })
}

/// Decodes an envelope payload when the versions line up.
///
/// Returns `None` for envelope-version or schema-version mismatches and for
/// payloads that no longer deserialize into `T`.
pub fn decode_snapshot_payload<T: DeserializeOwned>(
    envelope: &SnapshotEnvelope,
    expected_schema_version: u32,
) -> Option<T> {
    if envelope.envelope_version != SNAPSHOT_ENVELOPE_VERSION
        || envelope.schema_version != expected_schema_version
    {
        return None;
    }
    serde_json::from_value(envelope.payload.clone()).ok()
}

/// Loads a snapshot payload for `key`, tolerating every failure mode.
///
/// Absent keys, unreadable stores, malformed JSON, and version mismatches
/// all yield `None` so the caller starts from empty state.
pub async fn load_snapshot<S: StateStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
    expected_schema_version: u32,
) -> Option<T> {
    let raw = store.load_raw(key).await.ok().flatten()?;
    let envelope: SnapshotEnvelope = serde_json::from_str(&raw).ok()?;
    decode_snapshot_payload(&envelope, expected_schema_version)
}

/// Serializes `payload` into an envelope and writes it through to the store.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails. Callers
/// treat this as best-effort: log and continue, never crash.
pub async fn save_snapshot<S: StateStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    schema_version: u32,
    payload: &T,
) -> Result<(), String> {
    let envelope = build_snapshot_envelope(key, schema_version, payload)?;
    let raw = serde_json::to_string(&envelope).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw).await
}

/// Removes the persisted snapshot for `key`.
///
/// # Errors
///
/// Returns an error when the store delete fails.
pub async fn clear_snapshot<S: StateStore + ?Sized>(store: &S, key: &str) -> Result<(), String> {
    store.delete_raw(key).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStateStore;

    #[test]
    fn envelope_serialization_shape_is_stable() {
        let envelope = SnapshotEnvelope {
            envelope_version: SNAPSHOT_ENVELOPE_VERSION,
            key: "termfolio.example.v1".to_string(),
            schema_version: 2,
            updated_at_unix_ms: 1234,
            payload: json!({"ok": true}),
        };

        let value = serde_json::to_value(&envelope).expect("serialize envelope");
        let object = value.as_object().expect("object");
        assert_eq!(object.get("envelope_version"), Some(&json!(1)));
        assert_eq!(object.get("key"), Some(&json!("termfolio.example.v1")));
        assert_eq!(object.get("schema_version"), Some(&json!(2)));
        assert_eq!(object.get("payload"), Some(&json!({"ok": true})));
    }

    #[test]
    fn envelope_timestamps_are_monotonic() {
        let first = build_snapshot_envelope("k", 1, &json!(1)).expect("build");
        let second = build_snapshot_envelope("k", 1, &json!(2)).expect("build");
        assert!(second.updated_at_unix_ms > first.updated_at_unix_ms);
    }

    #[test]
    fn load_after_save_round_trips() {
        let store = MemoryStateStore::default();
        let lines = vec!["help".to_string(), "about".to_string()];
        block_on(save_snapshot(&store, "history", 1, &lines)).expect("save");
        let loaded: Option<Vec<String>> = block_on(load_snapshot(&store, "history", 1));
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn schema_mismatch_is_discarded() {
        let store = MemoryStateStore::default();
        block_on(save_snapshot(&store, "history", 1, &vec!["help".to_string()])).expect("save");
        let loaded: Option<Vec<String>> = block_on(load_snapshot(&store, "history", 2));
        assert_eq!(loaded, None);
    }

    #[test]
    fn malformed_content_loads_as_empty() {
        let store = MemoryStateStore::default();
        store.seed("history", "{not json");
        let loaded: Option<Vec<String>> = block_on(load_snapshot(&store, "history", 1));
        assert_eq!(loaded, None);

        store.seed("history", "{\"wrong\": \"shape\"}");
        let loaded: Option<Vec<String>> = block_on(load_snapshot(&store, "history", 1));
        assert_eq!(loaded, None);
    }

    #[test]
    fn absent_key_loads_as_empty() {
        let store = MemoryStateStore::default();
        let loaded: Option<Vec<String>> = block_on(load_snapshot(&store, "missing", 1));
        assert_eq!(loaded, None);
    }

    #[test]
    fn clear_removes_the_persisted_key() {
        let store = MemoryStateStore::default();
        block_on(save_snapshot(&store, "history", 1, &vec!["help".to_string()])).expect("save");
        assert!(store.contains("history"));
        block_on(clear_snapshot(&store, "history")).expect("clear");
        assert!(!store.contains("history"));
    }
}
