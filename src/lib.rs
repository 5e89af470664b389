//! Used-goods market board: a flat-file item store, its REST API, and the
//! client-side view model and renderers.
//!
//! The server keeps every listed item in a single JSON array on disk and
//! reloads it for each operation.
//!
//! ```rust,no_run
//! use market_board::ItemStore;
//!
//! let store = ItemStore::open("items.json").unwrap();
//! let book = store.create("Book", "2025-01-01").unwrap();
//! store.toggle(book.id).unwrap();
//! assert!(store.list()[0].is_sold);
//! ```
//!
//! **Single writer per file.** Mutations through one [`ItemStore`] are
//! serialized, but two stores or two processes on the same file can lose
//! each other's updates (the whole file is last-write-wins).

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod backend;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod render;
pub mod serializer;
pub mod store;
pub mod view;

pub use api::{build_router, AppState};
pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use board::{Board, Frame};
pub use client::{ApiClient, ClientError};
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use model::{Item, ItemDraft};
pub use store::{ItemStore, ItemStoreBuilder};
pub use view::{SortOrder, StatusFilter, ViewMode, ViewState};
