//! Auto-persisting value wrapper.
//!
//! [`PersistedValue`] owns one in-memory value, loads it from a
//! [`StorageBackend`] at construction, and writes the whole value back
//! through the backend on every mutation.

use crate::storage::StorageBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A value of `T` kept durable through a storage backend.
///
/// Construction loads the stored value under `key`, falling back to the
/// caller-supplied default when nothing is stored or the stored bytes do
/// not decode. Load and save failures are swallowed by design — the
/// settings-form use case has no error surface — but every swallow is
/// logged, never silent.
///
/// The key is an explicit, required parameter: distinct values sharing a
/// backend must use distinct keys, and collisions are the caller's bug.
///
/// # Example
///
/// ```rust
/// use prefstore::{MemoryBackend, PersistedValue, Settings};
///
/// let mut stored = PersistedValue::new(Settings::default(), "settings", MemoryBackend::new());
/// stored.update(|s| s.counter += 1);
/// assert_eq!(stored.get().counter, 1);
/// ```
pub struct PersistedValue<T, B> {
    /// The live in-memory value.
    value: T,
    /// Key the value is stored under.
    key: String,
    /// Backend the value is persisted through.
    backend: B,
}

impl<T, B> PersistedValue<T, B>
where
    T: Serialize + DeserializeOwned,
    B: StorageBackend,
{
    /// Creates a persisted value, adopting the stored value under `key` or
    /// `default` when nothing usable is stored.
    ///
    /// A decode failure and an absent key both fall back to the default;
    /// callers cannot distinguish "no prior data" from "corrupt prior
    /// data". The distinction is visible in the logs.
    pub fn new(default: T, key: impl Into<String>, backend: B) -> Self {
        let key = key.into();

        let value = match backend.load::<T>(&key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                tracing::debug!(key = %key, "no stored value, adopting default");
                default
            },
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to load stored value, adopting default");
                default
            },
        };

        Self {
            value,
            key,
            backend,
        }
    }

    /// Returns the current in-memory value. No side effects.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Mutates the in-memory value through `mutate`, then re-saves the
    /// entire value under the same key.
    ///
    /// The save is best-effort: on failure the in-memory mutation is kept
    /// and durable state stays stale until the next successful save.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let result = mutate(&mut self.value);
        self.persist();
        result
    }

    /// Replaces the whole value, with the same write-through as
    /// [`update`](Self::update).
    pub fn replace(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.backend.save(&self.value, &self.key) {
            tracing::warn!(key = %self.key, error = %err, "failed to persist value, in-memory state kept");
        }
    }

    /// Returns the key the value is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a reference to the backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the wrapper and returns the backend, e.g. to construct a
    /// fresh instance over the same store.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
