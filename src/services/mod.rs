//! Service layer.
//!
//! The UI-facing surface over the persisted settings record.

mod settings;

pub use settings::SettingsService;
