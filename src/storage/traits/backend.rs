//! Storage backend trait.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for storage backends.
///
/// A backend makes serialized bytes durable under a string key and reads
/// them back. The typed [`save`](Self::save) and [`load`](Self::load)
/// helpers layer JSON encoding on top, so every backend shares one wire
/// representation.
///
/// # Contract
///
/// `save(value, key)` followed by `load(key)` for the same key and type
/// returns a value equal to what was saved, absent an intervening deletion
/// or backend change. An absent key is `Ok(None)`, never an error.
///
/// The trait does not require `Send + Sync`: all operations are issued
/// synchronously by a single logical writer.
pub trait StorageBackend {
    /// Makes `bytes` durable under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MediumUnavailable`] if the medium cannot be written.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Reads the bytes stored under `key`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MediumUnavailable`] if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Serializes `value` and makes it durable under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the value cannot be serialized, or any
    /// error from [`write`](Self::write).
    fn save<T: Serialize>(&mut self, value: &T, key: &str) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| Error::Encode {
            key: key.to_string(),
            cause: e.to_string(),
        })?;
        self.write(key, &bytes)
    }

    /// Loads and decodes the value stored under `key`, or `Ok(None)` if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if bytes exist under `key` but do not
    /// parse as `T`, or any error from [`read`](Self::read).
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        let Some(bytes) = self.read(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| Error::Decode {
                key: key.to_string(),
                cause: e.to_string(),
            })
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(key, bytes)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }
}
