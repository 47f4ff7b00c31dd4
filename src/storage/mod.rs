//! Storage layer abstraction.
//!
//! This module provides uniform save/load over a named key, with three
//! backend implementations:
//! - **Memory**: in-process map, for tests and mock deployments
//! - **Preferences**: per-application `SQLite` key/value store
//! - **File**: one logical value in a single file, whole-file overwrite

pub mod file;
pub mod memory;
pub mod preferences;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use preferences::PreferencesBackend;
pub use traits::StorageBackend;
