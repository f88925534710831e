//! First-run sample catalog.

use shared::{domain::Book, error::InvalidBookData};

/// Seeded in this order, so the last entry is listed first.
const SAMPLE_BOOKS: [(&str, &str, i64, bool); 3] = [
    ("Edward", "Dracula 1992", 762, true),
    ("Edward", "When the sun sets", 200, false),
    ("Fred", "Freddy Kruggar vs Jason", 1000, true),
];

pub fn sample_books() -> Result<Vec<Book>, InvalidBookData> {
    SAMPLE_BOOKS
        .iter()
        .map(|(author, title, pages, is_read)| Book::new(author, title, *pages, *is_read))
        .collect()
}
