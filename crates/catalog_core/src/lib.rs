//! The authoritative in-memory book catalog and its best-effort persisted mirror.

use shared::{
    domain::{Book, BookId},
    events::CatalogEvent,
};
use storage::SnapshotStore;
use tracing::{debug, warn};

pub mod error;
mod listener;
pub mod snapshot;

pub use error::{SnapshotError, SubscribeError};
pub use listener::{CatalogListener, SubscriptionId, MAX_LISTENERS};

use listener::Listeners;

/// Ordered catalog, most recently added first.
///
/// Every mutation runs to completion (in-memory change, snapshot sync,
/// listener notification) before returning. Index-addressed operations treat
/// an out-of-range index as a no-op and report it by returning `None`.
pub struct CatalogStore<P> {
    books: Vec<Book>,
    persistence: P,
    listeners: Listeners,
}

impl<P: SnapshotStore> CatalogStore<P> {
    /// Open a store on whatever the adapter has persisted, or empty.
    pub fn create(persistence: P) -> Self {
        let books = load_snapshot(&persistence).unwrap_or_default();
        Self::from_parts(books, persistence)
    }

    /// Like [`CatalogStore::create`], but falls back to `seed` when there is
    /// no usable snapshot. Seed books are prepended in order, so the last one
    /// ends up first.
    pub fn create_with_seed<F, I>(persistence: P, seed: F) -> Self
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Book>,
    {
        if let Some(books) = load_snapshot(&persistence) {
            return Self::from_parts(books, persistence);
        }

        let mut store = Self::from_parts(Vec::new(), persistence);
        for book in seed() {
            store.books.insert(0, book);
        }
        debug!(books = store.books.len(), "catalog seeded");
        store.sync();
        store
    }

    fn from_parts(books: Vec<Book>, persistence: P) -> Self {
        Self {
            books,
            persistence,
            listeners: Listeners::default(),
        }
    }

    /// Prepend `book`. A book whose id is already cataloged is stored under a
    /// fresh id, so the event and later lookups target the new entry.
    pub fn add(&mut self, mut book: Book) {
        if self.position(book.id()).is_some() {
            book.reassign_id();
        }
        let id = book.id();
        self.books.insert(0, book);
        debug!(book_id = %id, books = self.books.len(), "book added");
        self.sync();
        self.listeners.notify(&CatalogEvent::BookAdded { id });
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        if index >= self.books.len() {
            debug!(index, books = self.books.len(), "remove ignored: index out of range");
            return None;
        }
        let removed = self.books.remove(index);
        debug!(book_id = %removed.id(), index, "book removed");
        self.sync();
        self.listeners.notify(&CatalogEvent::BookRemoved {
            id: removed.id(),
            index,
        });
        Some(removed)
    }

    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let index = self.position(id)?;
        self.remove_at(index)
    }

    /// Flip the read flag of the book at `index`, returning the new value.
    pub fn toggle_read_status(&mut self, index: usize) -> Option<bool> {
        let books = self.books.len();
        let Some(book) = self.books.get_mut(index) else {
            debug!(index, books, "toggle ignored: index out of range");
            return None;
        };
        book.toggle_status();
        let (id, is_read) = (book.id(), book.is_read());
        debug!(book_id = %id, index, is_read, "book status changed");
        self.sync();
        self.listeners
            .notify(&CatalogEvent::BookStatusChanged { id, index, is_read });
        Some(is_read)
    }

    pub fn toggle_read_status_of(&mut self, id: BookId) -> Option<bool> {
        let index = self.position(id)?;
        self.toggle_read_status(index)
    }

    pub fn subscribe(
        &mut self,
        listener: impl CatalogListener + 'static,
    ) -> Result<SubscriptionId, SubscribeError> {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Release every listener. The catalog itself stays usable.
    pub fn dispose(&mut self) {
        let released = self.listeners.clear();
        debug!(released, "catalog listeners released");
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn sync(&self) {
        if !self.persistence.is_available() {
            return;
        }
        let snapshot = match snapshot::encode(&self.books) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to encode catalog snapshot");
                return;
            }
        };
        if let Err(error) = self.persistence.save(&snapshot) {
            warn!(
                error = %format!("{error:#}"),
                books = self.books.len(),
                "failed to persist catalog snapshot; in-memory catalog unchanged"
            );
        }
    }
}

fn load_snapshot<P: SnapshotStore>(persistence: &P) -> Option<Vec<Book>> {
    let raw = match persistence.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            warn!(error = %format!("{error:#}"), "failed to load catalog snapshot");
            return None;
        }
    };
    match snapshot::decode(&raw) {
        Ok(books) => {
            debug!(books = books.len(), "catalog snapshot loaded");
            Some(books)
        }
        Err(error) => {
            warn!(%error, "ignoring unusable catalog snapshot");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
