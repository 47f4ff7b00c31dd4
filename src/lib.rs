//! # Prefstore
//!
//! Client-side settings persistence with pluggable storage backends.
//!
//! Prefstore keeps a settings record in memory, reloads it from durable
//! storage at startup, and writes the whole record back through a
//! [`StorageBackend`] on every mutation.
//!
//! ## Features
//!
//! - Uniform save/load over a named key for any serde-serializable type
//! - Three backends: in-memory, SQLite preference store, single file
//! - Auto-persisting value wrapper with load-or-default construction
//! - Typed per-field accessors for the settings record
//!
//! ## Example
//!
//! ```rust
//! use prefstore::{MemoryBackend, SettingsService};
//!
//! let mut service = SettingsService::new(MemoryBackend::new(), "settings");
//! service.set_username("ada");
//! service.increment_counter();
//! assert_eq!(service.counter(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod models;
pub mod persisted;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::{BackendKind, PrefstoreConfig};
pub use models::{Ringtone, Settings};
pub use persisted::PersistedValue;
pub use services::SettingsService;
pub use storage::{FileBackend, MemoryBackend, PreferencesBackend, StorageBackend};

/// Error type for prefstore operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// An absent key is not an error: [`StorageBackend::load`] returns
/// `Ok(None)` so callers can tell "no value yet" apart from real failures.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Decode` | Stored bytes exist but do not parse as the expected type |
/// | `Encode` | A value cannot be serialized for storage |
/// | `MediumUnavailable` | The storage medium cannot be reached or written |
/// | `InvalidInput` | Bad configuration values, unknown field or backend names |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Stored bytes could not be decoded as the expected type.
    ///
    /// Raised when:
    /// - The stored value was written with a different schema
    /// - The stored bytes are corrupt or not valid JSON
    #[error("failed to decode value under key '{key}': {cause}")]
    Decode {
        /// The key whose stored bytes failed to decode.
        key: String,
        /// The underlying cause.
        cause: String,
    },

    /// A value could not be serialized for storage.
    ///
    /// Raised when `serde_json` rejects the value, e.g. a map with
    /// non-string keys. Settings-like records never hit this in practice.
    #[error("failed to encode value under key '{key}': {cause}")]
    Encode {
        /// The key the value was being saved under.
        key: String,
        /// The underlying cause.
        cause: String,
    },

    /// The storage medium could not be reached or written.
    ///
    /// Raised when:
    /// - Filesystem reads or writes fail
    /// - The preference store database cannot be opened or queried
    #[error("storage medium unavailable during '{operation}': {cause}")]
    MediumUnavailable {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A configuration file names an unknown backend
    /// - A CLI argument names an unknown field or ringtone
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for prefstore operations.
pub type Result<T> = std::result::Result<T, Error>;
