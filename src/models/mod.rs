//! Data models for prefstore.
//!
//! This module contains the settings record persisted by the library.

mod settings;

pub use settings::{Ringtone, Settings};
