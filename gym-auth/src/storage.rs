//! Persisted session storage
//!
//! Client side key-value storage the current session token is kept in. Writing and removing the
//! token is up to the storage owner, the authentication flow only ever reads it.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Storage slot holding the current session token
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Storage is not available: {0}")]
    Unavailable(String),
    #[error("Storage entry {key} is not valid UTF-8")]
    InvalidEntry { key: String },
}

/// Read access to persisted storage
pub trait SessionStorage {
    /// Reads the value under the key. Missing key is not an error.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).read(key)
    }
}

/// Storage which doesn't exist in the current environment
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl SessionStorage for NoStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, Error> {
        Err(Error::Unavailable("no storage in this environment".to_owned()))
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the value under the key, returning the previous one
    pub fn store(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into())
    }

    /// Removes the value under the key, returning it
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }
}

/// File based storage
///
/// Every key is kept in a separate file named after the key, inside the storage directory. The
/// directory has to exist, it is never created.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing the key
    fn entry(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Stores the value under the key
    pub fn store(&self, key: &str, value: &str) -> Result<(), Error> {
        std::fs::write(self.entry(key), value).map_err(|err| Error::Unavailable(err.to_string()))
    }

    /// Removes the value under the key. Removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), Error> {
        match std::fs::remove_file(self.entry(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                Err(Error::Unavailable(err.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        if !self.dir.is_dir() {
            return Err(Error::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        match std::fs::read_to_string(self.entry(key)) {
            Ok(value) => Ok(Some(value.trim_end().to_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) if err.kind() == ErrorKind::InvalidData => Err(Error::InvalidEntry {
                key: key.to_owned(),
            }),
            Err(err) => Err(Error::Unavailable(err.to_string())),
        }
    }
}
