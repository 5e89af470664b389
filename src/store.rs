//! The item store and its builder.

use crate::backend::{DocumentBackend, JsonFileBackend};
use crate::error::{Error, Result};
use crate::model::Item;
use crate::serializer::JsonSerializer;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Shortest accepted title, in characters, after trimming.
pub const TITLE_MIN_CHARS: usize = 2;
/// Longest accepted title, in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 20;

pub(crate) const MSG_REQUIRED: &str = "제목과 마감기한은 필수입니다!";
pub(crate) const MSG_TITLE_LENGTH: &str = "물품명은 2글자 이상 20자 이내여야 합니다.";
pub(crate) const MSG_DEADLINE_FORMAT: &str = "마감기한은 YYYY-MM-DD 형식이어야 합니다.";

/// Authoritative list of items, persisted as one document.
///
/// Nothing is kept in memory between calls: every operation loads the whole
/// document from the backend, and every mutation writes the whole document
/// back. Mutations made through one store are serialized; two stores (or two
/// processes) pointed at the same file can still overwrite each other's
/// changes, last write wins.
pub struct ItemStore<B = JsonFileBackend> {
    backend: B,
    write_scope: Mutex<()>,
}

impl ItemStore<JsonFileBackend> {
    /// Open a store over the JSON file at `path`, written pretty-printed.
    /// The file does not need to exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a file-backed store. Call
    /// [`.build()`](ItemStoreBuilder::build) when ready.
    pub fn builder(path: impl AsRef<Path>) -> ItemStoreBuilder {
        ItemStoreBuilder::new(path)
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.backend.path()
    }
}

impl<B: DocumentBackend> ItemStore<B> {
    /// Wrap an arbitrary backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            write_scope: Mutex::new(()),
        }
    }

    /// The backend this store reads and writes.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---- reads ----

    /// All items in document order. A missing or unreadable document reads
    /// as empty.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.load_or_empty()
    }

    /// The item with `id`, if any.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<Item> {
        self.load_or_empty().into_iter().find(|i| i.id == id)
    }

    // ---- writes ----

    /// Append a new unsold item with the next free id.
    pub fn create(&self, title: &str, deadline: &str) -> Result<Item> {
        let (title, deadline) = validate(title, deadline)?;
        self.mutate(|items| {
            let item = Item {
                id: next_id(items)?,
                title,
                deadline,
                is_sold: false,
            };
            items.push(item.clone());
            Ok(item)
        })
    }

    /// Flip the sold flag of item `id`.
    pub fn toggle(&self, id: u64) -> Result<Item> {
        self.mutate(|items| {
            let item = find_mut(items, id)?;
            item.is_sold = !item.is_sold;
            Ok(item.clone())
        })
    }

    /// Replace the title and deadline of item `id`. The sold flag is kept.
    pub fn update(&self, id: u64, title: &str, deadline: &str) -> Result<Item> {
        let (title, deadline) = validate(title, deadline)?;
        self.mutate(|items| {
            let item = find_mut(items, id)?;
            item.title = title;
            item.deadline = deadline;
            Ok(item.clone())
        })
    }

    /// Remove item `id`, returning what was removed.
    pub fn delete(&self, id: u64) -> Result<Item> {
        self.mutate(|items| {
            let index = items
                .iter()
                .position(|i| i.id == id)
                .ok_or(Error::NotFound(id))?;
            Ok(items.remove(index))
        })
    }

    // ---- internal ----

    fn load_or_empty(&self) -> Vec<Item> {
        match self.backend.load() {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(
                    location = %self.backend.location(),
                    error = %err,
                    "item document unreadable, starting from an empty list"
                );
                Vec::new()
            }
        }
    }

    /// Load, apply `f`, save. Nothing is written when `f` fails.
    fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Item>) -> Result<T>,
    {
        let _scope = self.write_scope.lock();
        let mut items = self.load_or_empty();
        let out = f(&mut items)?;
        self.backend.save(&items)?;
        Ok(out)
    }
}

impl<B: DocumentBackend> std::fmt::Debug for ItemStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("location", &self.backend.location())
            .finish_non_exhaustive()
    }
}

fn next_id(items: &[Item]) -> Result<u64> {
    match items.iter().map(|i| i.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(Error::IdsExhausted),
    }
}

fn find_mut(items: &mut [Item], id: u64) -> Result<&mut Item> {
    items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or(Error::NotFound(id))
}

/// Trim and check a title/deadline pair.
pub(crate) fn validate(title: &str, deadline: &str) -> Result<(String, NaiveDate)> {
    let title = title.trim();
    let deadline = deadline.trim();
    if title.is_empty() || deadline.is_empty() {
        return Err(Error::Validation(MSG_REQUIRED.to_string()));
    }
    let chars = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
        return Err(Error::Validation(MSG_TITLE_LENGTH.to_string()));
    }
    let deadline = NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
        .map_err(|_| Error::Validation(MSG_DEADLINE_FORMAT.to_string()))?;
    Ok((title.to_string(), deadline))
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a file-backed [`ItemStore`].
///
/// ```rust,no_run
/// use market_board::ItemStore;
///
/// let store = ItemStore::builder("items.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// assert!(store.list().is_empty());
/// ```
pub struct ItemStoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl ItemStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Check the path and return the store. Nothing is read until the first
    /// operation.
    pub fn build(self) -> Result<ItemStore<JsonFileBackend>> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config("store path is empty".into()));
        }
        if self.path.is_dir() {
            return Err(Error::Config(format!(
                "store path {} is a directory",
                self.path.display()
            )));
        }
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };
        Ok(ItemStore::with_backend(JsonFileBackend::new(
            self.path, serializer,
        )))
    }
}

impl std::fmt::Debug for ItemStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStoreBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish()
    }
}
