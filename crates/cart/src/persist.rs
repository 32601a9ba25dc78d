//! Key-value persistence surface for the cart.
//!
//! The store does not care where the cart record lives; the host hands it
//! any [`CartPersister`]. Two implementations ship here: an in-memory map
//! for tests and scratch use, and a file-per-key directory used by the CLI.

use std::collections::HashMap;
use std::convert::Infallible;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage keys used by the cart.
pub mod keys {
    /// Key under which the whole cart record is persisted. Stable across
    /// runs; [`crate::store::CartStore::clear`] removes it outright.
    pub const CART: &str = "cart";
}

/// A key-value persistence surface.
///
/// Methods take `&self` so implementations may use interior mutability
/// (e.g. `Mutex`) for shared access. Values are strings; the store
/// serializes its own state before writing.
pub trait CartPersister {
    /// The error type returned by persistence operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve a value by key. Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove a value by key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory persister backed by a shared map.
///
/// Clones share the same underlying storage, which lets tests simulate a
/// restart: drop the store, build a new one from a clone of the persister,
/// and the record is still there.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersister {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPersister {
    /// Create an empty in-memory persister.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartPersister for MemoryPersister {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// File-backed persister: one file per key under a root directory.
///
/// This is the durable surface the CLI uses. Writes replace the whole file,
/// mirroring the set-the-whole-record contract of the store.
#[derive(Debug, Clone)]
pub struct FilePersister {
    root: PathBuf,
}

impl FilePersister {
    /// Open a persister rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl CartPersister for FilePersister {
    type Error = io::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
