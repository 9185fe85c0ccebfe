//! Layout persistence.
//!
//! This module provides the storage boundary for saved layouts:
//! - [`PersistencePort`]: byte-oriented key/value store injected into sessions
//! - [`MemoryStore`]: in-process store for tests and ephemeral sessions
//! - [`FileStore`]: one file per key under a directory
//! - [`LayoutCollection`]: the document-key → named-layout mapping that is
//!   read and written as a single JSON document

use crate::model::{DocumentKey, Layout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Store key under which the whole layout collection lives.
pub const COLLECTION_KEY: &str = "form-layouts";

/// Errors raised by a persistence port.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading, writing or removing a stored value failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Location of the value that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the store (e.g. empty or path-like).
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    /// The layout collection could not be encoded.
    #[error("Failed to encode layout collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key → bytes store.
///
/// Calls are synchronous and blocking; a `set` fully replaces the previous
/// value.
pub trait PersistencePort {
    /// Value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), PersistenceError>;
    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<P: PersistencePort + ?Sized> PersistencePort for Box<P> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).delete(key)
    }
}

/// A layout stored under a document key, with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLayout {
    /// Display name chosen when saving.
    pub name: String,
    /// The saved layout.
    pub layout: Layout,
}

/// All saved layouts, keyed by document key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutCollection {
    entries: BTreeMap<DocumentKey, SavedLayout>,
}

impl LayoutCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the collection from `store`.
    ///
    /// A missing value, a read failure, or an unparseable document all yield
    /// an empty collection; none of them is fatal.
    pub fn load<P: PersistencePort + ?Sized>(store: &P) -> Self {
        let bytes = match store.get(COLLECTION_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("no saved layouts yet");
                return Self::default();
            }
            Err(err) => {
                warn!(error = %err, "failed to read saved layouts, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_slice::<Self>(&bytes) {
            Ok(collection) => {
                debug!(entries = collection.len(), "loaded saved layouts");
                collection
            }
            Err(err) => {
                warn!(error = %err, "saved layouts are corrupt, starting empty");
                Self::default()
            }
        }
    }

    /// Write the whole collection to `store`, replacing what was there.
    pub fn save<P: PersistencePort + ?Sized>(&self, store: &mut P) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(self)?;
        store.set(COLLECTION_KEY, &bytes)?;
        debug!(entries = self.len(), bytes = bytes.len(), "saved layouts written");
        Ok(())
    }

    /// Entry saved under `key`.
    pub fn get(&self, key: &DocumentKey) -> Option<&SavedLayout> {
        self.entries.get(key)
    }

    /// Whether an entry is saved under `key`.
    pub fn contains(&self, key: &DocumentKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Add or replace the entry under `key`, returning the replaced one.
    pub fn insert(&mut self, key: DocumentKey, entry: SavedLayout) -> Option<SavedLayout> {
        self.entries.insert(key, entry)
    }

    /// Remove and return the entry under `key`.
    pub fn remove(&mut self, key: &DocumentKey) -> Option<SavedLayout> {
        self.entries.remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentKey, &SavedLayout)> {
        self.entries.iter()
    }
}
