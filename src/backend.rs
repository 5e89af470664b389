//! Where the item document lives.
//!
//! Implement [`DocumentBackend`] to keep the list somewhere other than a
//! JSON file. The store only ever loads the whole list and saves the whole
//! list back.

use crate::error::Result;
use crate::model::Item;
use crate::persist::{atomic_write, load};
use crate::serializer::{JsonSerializer, Serializer};
use std::path::{Path, PathBuf};

/// Whole-document storage for an [`ItemStore`](crate::ItemStore).
///
/// `load` must return the items in document order. `save` replaces the
/// entire document.
pub trait DocumentBackend: Send + Sync {
    /// Read the full item list.
    fn load(&self) -> Result<Vec<Item>>;

    /// Replace the full item list.
    fn save(&self, items: &[Item]) -> Result<()>;

    /// Short human-readable location, used in logs.
    fn location(&self) -> String {
        String::from("<memory>")
    }
}

// ---- JSON file ---------------------------------------------------------------

/// The flat-file backend: one JSON array on disk, rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileBackend<S = JsonSerializer> {
    path: PathBuf,
    serializer: S,
}

impl<S: Serializer> JsonFileBackend<S> {
    /// Backend for `path` using `serializer` for encoding.
    pub fn new(path: impl AsRef<Path>, serializer: S) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            serializer,
        }
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S: Serializer> DocumentBackend for JsonFileBackend<S> {
    fn load(&self) -> Result<Vec<Item>> {
        load(&self.path, &self.serializer)
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        let bytes = self.serializer.serialize(items)?;
        atomic_write(&self.path, &bytes)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ---- RwLock<Vec<Item>> -------------------------------------------------------

/// In-process backend. Nothing touches the disk.
pub type MemoryBackend = parking_lot::RwLock<Vec<Item>>;

impl DocumentBackend for parking_lot::RwLock<Vec<Item>> {
    fn load(&self) -> Result<Vec<Item>> {
        Ok(self.read().clone())
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        *self.write() = items.to_vec();
        Ok(())
    }
}
