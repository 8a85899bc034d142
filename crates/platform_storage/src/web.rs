//! `localStorage`-backed state store.
//!
//! Synchronous at the browser API boundary, while also implementing the
//! async [`StateStore`] trait for compatibility with the session layer. On
//! non-WASM targets every operation degrades to the empty/no-op behavior so
//! the crate builds and tests natively.

use crate::store::{StateStore, StateStoreFuture};

/// Browser state store backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// Loads the raw value for a key, or `None` when localStorage is
    /// unavailable or the key is absent.
    pub fn load_item(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Saves a raw value for a key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails
    /// (for example on quota exhaustion).
    pub fn save_item(self, key: &str, raw: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw);
            Ok(())
        }
    }

    /// Deletes a key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn delete_item(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl StateStore for LocalStorageStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> StateStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load_item(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> StateStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_item(key, raw) })
    }

    fn delete_raw<'a>(&'a self, key: &'a str) -> StateStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_item(key) })
    }
}
