//! JSON codec for the persisted catalog: an ordered array of book records.

use std::collections::HashSet;

use shared::domain::Book;
use tracing::debug;

use crate::error::SnapshotError;

pub fn encode(books: &[Book]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(books)?)
}

/// Decode a snapshot, re-validating every record through the book constructor.
/// A single bad record rejects the whole snapshot. Repeated ids are not an
/// error: later copies get fresh ids so every entry stays addressable.
pub fn decode(raw: &str) -> Result<Vec<Book>, SnapshotError> {
    let mut books: Vec<Book> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(books.len());
    for (index, book) in books.iter_mut().enumerate() {
        if !seen.insert(book.id()) {
            let previous = book.id();
            let fresh = book.reassign_id();
            debug!(index, %previous, %fresh, "repeated book id in snapshot reassigned");
            seen.insert(fresh);
        }
    }

    Ok(books)
}
