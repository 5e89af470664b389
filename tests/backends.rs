use market_board::{DocumentBackend, Error, Item, ItemStore, MemoryBackend, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn memory_backend_full_lifecycle() {
    let store = ItemStore::with_backend(MemoryBackend::default());
    let book = store.create("Book", "2025-01-01").unwrap();
    let pen = store.create("Pen", "2025-02-01").unwrap();
    assert_eq!((book.id, pen.id), (1, 2));

    assert!(store.toggle(book.id).unwrap().is_sold);
    store.update(pen.id, "Fountain pen", "2025-02-15").unwrap();
    store.delete(book.id).unwrap();

    let items = store.backend().read().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Fountain pen");
    assert_eq!(store.list(), items);
}

#[test]
fn memory_backend_can_be_seeded() {
    let seed = vec![Item {
        id: 5,
        title: "Bike".into(),
        deadline: "2025-01-01".parse().unwrap(),
        is_sold: false,
    }];
    let store = ItemStore::with_backend(RwLock::new(seed.clone()));
    assert_eq!(store.list(), seed);
    assert_eq!(store.create("Lamp", "2025-01-02").unwrap().id, 6);
}

/// Reads fine, refuses every write.
#[derive(Default)]
struct ReadOnly {
    saves: AtomicUsize,
}

impl DocumentBackend for ReadOnly {
    fn load(&self) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    fn save(&self, _items: &[Item]) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Err(Error::Io("read-only filesystem".into()))
    }

    fn location(&self) -> String {
        "read-only".into()
    }
}

#[test]
fn write_failure_surfaces_as_io_error() {
    let store = ItemStore::with_backend(ReadOnly::default());
    let err = store.create("Book", "2025-01-01").unwrap_err();
    assert_eq!(err, Error::Io("read-only filesystem".into()));
    assert!(!err.is_client_error());
    assert_eq!(store.backend().saves.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_lookup_writes_nothing() {
    let store = ItemStore::with_backend(ReadOnly::default());
    assert_eq!(store.toggle(1).unwrap_err(), Error::NotFound(1));
    assert!(matches!(
        store.create("", "2025-01-01"),
        Err(Error::Validation(_))
    ));
    assert_eq!(store.backend().saves.load(Ordering::SeqCst), 0);
}

/// Always fails to read.
struct Unreadable;

impl DocumentBackend for Unreadable {
    fn load(&self) -> Result<Vec<Item>> {
        Err(Error::Deserialize("garbage".into()))
    }

    fn save(&self, _items: &[Item]) -> Result<()> {
        Ok(())
    }
}

#[test]
fn unreadable_document_lists_empty() {
    let store = ItemStore::with_backend(Unreadable);
    assert!(store.list().is_empty());
    assert_eq!(store.create("Book", "2025-01-01").unwrap().id, 1);
}
