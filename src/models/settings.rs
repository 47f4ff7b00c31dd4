//! The settings record and its enum-like fields.

use serde::{Deserialize, Serialize};

/// Ringtone choice for the settings form.
///
/// Serialized as its string name so stored settings stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ringtone {
    /// The default ringtone.
    #[default]
    Chimes,
    /// A short single tone.
    Signal,
    /// A longer ambient tone.
    Waves,
}

impl Ringtone {
    /// Returns all ringtone variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Chimes, Self::Signal, Self::Waves]
    }

    /// Returns the ringtone as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chimes => "Chimes",
            Self::Signal => "Signal",
            Self::Waves => "Waves",
        }
    }

    /// Parses a ringtone from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chimes" => Some(Self::Chimes),
            "signal" => Some(Self::Signal),
            "waves" => Some(Self::Waves),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ringtone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The settings record bound by the UI.
///
/// Fields deliberately carry no `#[serde(default)]`: a stored record either
/// decodes in full or the decode fails, so a partially-absent record can
/// never be adopted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Display name entered by the user.
    pub username: String,
    /// Whether the profile is private.
    pub is_private: bool,
    /// Selected ringtone.
    pub ringtone: Ringtone,
    /// Free-running counter; unbounded, may go negative.
    pub counter: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: String::new(),
            is_private: true,
            ringtone: Ringtone::Chimes,
            counter: 0,
        }
    }
}
