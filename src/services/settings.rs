//! Settings service: typed per-field access over a persisted record.

use crate::models::{Ringtone, Settings};
use crate::persisted::PersistedValue;
use crate::storage::StorageBackend;

/// UI-facing settings surface.
///
/// Owns a [`PersistedValue<Settings, B>`] and exposes an enumerated set of
/// typed accessors per field — no field-path or reflection dispatch. Every
/// setter writes the entire record back through the backend before
/// returning.
pub struct SettingsService<B: StorageBackend> {
    settings: PersistedValue<Settings, B>,
}

impl<B: StorageBackend> SettingsService<B> {
    /// Creates a service over `backend`, loading the record stored under
    /// `key` or falling back to [`Settings::default`].
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self::with_default(Settings::default(), key, backend)
    }

    /// Creates a service with a caller-supplied fallback record.
    pub fn with_default(default: Settings, key: impl Into<String>, backend: B) -> Self {
        Self {
            settings: PersistedValue::new(default, key, backend),
        }
    }

    /// Returns the full current settings record.
    pub const fn settings(&self) -> &Settings {
        self.settings.get()
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.settings.get().username
    }

    /// Sets the username.
    pub fn set_username(&mut self, username: impl Into<String>) {
        let username = username.into();
        self.settings.update(|s| s.username = username);
    }

    /// Returns whether the profile is private.
    pub const fn is_private(&self) -> bool {
        self.settings.get().is_private
    }

    /// Sets whether the profile is private.
    pub fn set_private(&mut self, is_private: bool) {
        self.settings.update(|s| s.is_private = is_private);
    }

    /// Returns the selected ringtone.
    pub const fn ringtone(&self) -> Ringtone {
        self.settings.get().ringtone
    }

    /// Sets the ringtone.
    pub fn set_ringtone(&mut self, ringtone: Ringtone) {
        self.settings.update(|s| s.ringtone = ringtone);
    }

    /// Returns the counter.
    pub const fn counter(&self) -> i64 {
        self.settings.get().counter
    }

    /// Sets the counter to an absolute value.
    pub fn set_counter(&mut self, counter: i64) {
        self.settings.update(|s| s.counter = counter);
    }

    /// Increments the counter by one. No upper bound below `i64::MAX`.
    pub fn increment_counter(&mut self) {
        self.settings.update(|s| s.counter = s.counter.saturating_add(1));
    }

    /// Decrements the counter by one. The counter may go negative.
    pub fn decrement_counter(&mut self) {
        self.settings.update(|s| s.counter = s.counter.saturating_sub(1));
    }

    /// Resets every field to its default and persists the result.
    pub fn reset(&mut self) {
        self.settings.replace(Settings::default());
    }

    /// Consumes the service and returns the backend.
    pub fn into_backend(self) -> B {
        self.settings.into_backend()
    }
}
