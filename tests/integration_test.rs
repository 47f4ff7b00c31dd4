//! Integration tests for prefstore.
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls
)]

use prefstore::{
    Error, FileBackend, MemoryBackend, PreferencesBackend, Ringtone, Settings, SettingsService,
    StorageBackend,
};
use tempfile::TempDir;

#[test]
fn test_error_types() {
    // Test Decode error
    let err = Error::Decode {
        key: "settings".to_string(),
        cause: "expected value".to_string(),
    };
    let display = format!("{err}");
    assert!(display.contains("decode"));
    assert!(display.contains("settings"));

    // Test MediumUnavailable error
    let err = Error::MediumUnavailable {
        operation: "write_preference".to_string(),
        cause: "database is locked".to_string(),
    };
    let display = format!("{err}");
    assert!(display.contains("write_preference"));
    assert!(display.contains("database is locked"));

    // Test InvalidInput error
    let err = Error::InvalidInput("unknown field 'volume'".to_string());
    let display = format!("{err}");
    assert!(display.contains("invalid input"));
    assert!(display.contains("volume"));
}

fn sample_settings() -> Settings {
    Settings {
        username: "ada".to_string(),
        is_private: false,
        ringtone: Ringtone::Waves,
        counter: -17,
    }
}

/// Round-trip through every backend: save then load returns an equal value.
mod round_trip {
    use super::*;

    #[test]
    fn memory_backend() {
        let mut backend = MemoryBackend::new();
        backend.save(&sample_settings(), "settings").unwrap();
        let loaded: Option<Settings> = backend.load("settings").unwrap();
        assert_eq!(loaded, Some(sample_settings()));
    }

    #[test]
    fn preferences_backend() {
        let mut backend = PreferencesBackend::in_memory().unwrap();
        backend.save(&sample_settings(), "settings").unwrap();
        let loaded: Option<Settings> = backend.load("settings").unwrap();
        assert_eq!(loaded, Some(sample_settings()));
    }

    #[test]
    fn file_backend() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path(), "settings.json");
        backend.save(&sample_settings(), "settings").unwrap();
        let loaded: Option<Settings> = backend.load("settings").unwrap();
        assert_eq!(loaded, Some(sample_settings()));
    }
}

/// End-to-end settings service flows over durable backends: a second
/// service instance over the same store observes the first one's writes.
mod write_through {
    use super::*;

    #[test]
    fn preferences_backend_across_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("preferences.db");

        {
            let backend = PreferencesBackend::new(&db_path).unwrap();
            let mut service = SettingsService::new(backend, "settings");
            service.set_username("ada");
            service.increment_counter();
        }

        let backend = PreferencesBackend::new(&db_path).unwrap();
        let service = SettingsService::new(backend, "settings");
        assert_eq!(service.username(), "ada");
        assert_eq!(service.counter(), 1);
    }

    #[test]
    fn file_backend_across_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let backend = FileBackend::new(dir.path(), "settings.json");
            let mut service = SettingsService::new(backend, "settings");
            service.set_ringtone(Ringtone::Signal);
            service.set_private(false);
        }

        let backend = FileBackend::new(dir.path(), "settings.json");
        let service = SettingsService::new(backend, "settings");
        assert_eq!(service.ringtone(), Ringtone::Signal);
        assert!(!service.is_private());
    }

    #[test]
    fn every_write_is_immediately_durable() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path(), "settings.json");
        let mut service = SettingsService::new(backend, "settings");

        service.set_counter(1);
        // Peek at the store mid-session through an independent handle.
        let observer = FileBackend::new(dir.path(), "settings.json");
        let on_disk: Option<Settings> = observer.load("settings").unwrap();
        assert_eq!(on_disk.unwrap().counter, 1);

        service.set_counter(2);
        let on_disk: Option<Settings> = observer.load("settings").unwrap();
        assert_eq!(on_disk.unwrap().counter, 2);
    }
}

/// The file backend stores one value per instance; keys never select files.
#[test]
fn test_file_backend_ignores_key() {
    let dir = TempDir::new().unwrap();
    let mut backend = FileBackend::new(dir.path(), "settings.json");

    let one = Settings {
        counter: 1,
        ..Settings::default()
    };
    let two = Settings {
        counter: 2,
        ..Settings::default()
    };

    backend.save(&one, "a").unwrap();
    backend.save(&two, "b").unwrap();

    // The second save overwrote the first entirely.
    let under_a: Option<Settings> = backend.load("a").unwrap();
    let under_b: Option<Settings> = backend.load("b").unwrap();
    assert_eq!(under_a, Some(two.clone()));
    assert_eq!(under_b, Some(two));
}

/// Corrupt stored bytes fall back to the supplied default, silently from
/// the caller's point of view.
mod corrupt_fallback {
    use super::*;
    use std::fs;

    #[test]
    fn file_backend() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("settings.json"), b"}{ not json").unwrap();

        let backend = FileBackend::new(dir.path(), "settings.json");
        let service = SettingsService::new(backend, "settings");
        assert_eq!(service.settings(), &Settings::default());
    }

    #[test]
    fn preferences_backend() {
        let mut backend = PreferencesBackend::in_memory().unwrap();
        backend.write("settings", b"\x00\x01\x02").unwrap();

        let service = SettingsService::new(backend, "settings");
        assert_eq!(service.settings(), &Settings::default());
    }

    #[test]
    fn schema_mismatch_counts_as_corrupt() {
        // A record missing the counter field decodes as nothing at all.
        let mut backend = MemoryBackend::new();
        backend
            .write(
                "settings",
                br#"{"username":"ada","is_private":true,"ringtone":"Chimes"}"#,
            )
            .unwrap();

        let service = SettingsService::new(backend, "settings");
        assert_eq!(service.settings(), &Settings::default());
    }
}

/// The stored representation is self-describing JSON.
#[test]
fn test_stored_representation_is_json_object() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path(), "settings.json");
    let mut service = SettingsService::new(backend, "settings");
    service.set_username("ada");

    let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["username"], "ada");
    assert_eq!(parsed["is_private"], true);
    assert_eq!(parsed["ringtone"], "Chimes");
    assert_eq!(parsed["counter"], 0);
}

/// Distinct keys on a shared preference store stay independent.
#[test]
fn test_distinct_keys_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("preferences.db");

    {
        let backend = PreferencesBackend::new(&db_path).unwrap();
        let mut service = SettingsService::new(backend, "alpha");
        service.set_username("alpha-user");
    }
    {
        let backend = PreferencesBackend::new(&db_path).unwrap();
        let mut service = SettingsService::new(backend, "beta");
        service.set_username("beta-user");
    }

    let backend = PreferencesBackend::new(&db_path).unwrap();
    let alpha = SettingsService::new(backend, "alpha");
    assert_eq!(alpha.username(), "alpha-user");

    let backend = alpha.into_backend();
    let beta = SettingsService::new(backend, "beta");
    assert_eq!(beta.username(), "beta-user");
}
