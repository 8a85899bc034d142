//! Key-value state-store contract and baseline implementations.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`StateStore`] async methods.
pub type StateStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for client-local string values keyed by fixed identifiers.
///
/// Implementations must be cheap to clone-by-handle and must never panic on
/// storage failure; errors are reported as strings and the session layer
/// decides whether to warn or fall back.
pub trait StateStore {
    /// Loads the raw serialized value for a key.
    fn load_raw<'a>(&'a self, key: &'a str)
        -> StateStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw serialized value for a key.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> StateStoreFuture<'a, Result<(), String>>;

    /// Deletes a key.
    fn delete_raw<'a>(&'a self, key: &'a str) -> StateStoreFuture<'a, Result<(), String>>;
}

/// No-op store for unsupported targets and baseline tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStateStore;

impl StateStore for NoopStateStore {
    fn load_raw<'a>(
        &'a self,
        _key: &'a str,
    ) -> StateStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw: &'a str,
    ) -> StateStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_raw<'a>(&'a self, _key: &'a str) -> StateStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// In-memory store keyed by string, shared by handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStateStore {
    /// Inserts a raw value directly, bypassing the async surface. Useful for
    /// seeding corrupt or legacy content in tests.
    pub fn seed(&self, key: &str, raw: &str) {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    /// Whether a key is currently present.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }
}

impl StateStore for MemoryStateStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> StateStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> StateStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw.to_string());
            Ok(())
        })
    }

    fn delete_raw<'a>(&'a self, key: &'a str) -> StateStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed value through a [`StateStore`].
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_typed_with<S: StateStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_raw(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`StateStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_typed_with<S: StateStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Flag {
        dismissed: bool,
    }

    #[test]
    fn memory_store_round_trip_and_delete() {
        let store = MemoryStateStore::default();
        let store_obj: &dyn StateStore = &store;

        block_on(store_obj.save_raw("state.key", "{\"k\":1}")).expect("save");
        assert_eq!(
            block_on(store_obj.load_raw("state.key")).expect("load"),
            Some("{\"k\":1}".to_string())
        );
        block_on(store_obj.delete_raw("state.key")).expect("delete");
        assert_eq!(block_on(store_obj.load_raw("state.key")).expect("load"), None);
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryStateStore::default();
        let store_obj: &dyn StateStore = &store;
        block_on(save_typed_with(store_obj, "guide", &Flag { dismissed: true }))
            .expect("save typed");

        let loaded: Option<Flag> =
            block_on(load_typed_with(store_obj, "guide")).expect("load typed");
        assert_eq!(loaded, Some(Flag { dismissed: true }));
    }

    #[test]
    fn typed_load_reports_malformed_content() {
        let store = MemoryStateStore::default();
        store.seed("bad", "not-json");
        let result: Result<Option<Flag>, String> = block_on(load_typed_with(&store, "bad"));
        assert!(result.is_err());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopStateStore;
        let store_obj: &dyn StateStore = &store;
        assert_eq!(block_on(store_obj.load_raw("k")).expect("load"), None);
        block_on(store_obj.save_raw("k", "{}")).expect("save");
        block_on(store_obj.delete_raw("k")).expect("delete");
    }
}
