//! Types shared by the catalog store, its persistence adapters and the front end.

pub mod domain;
pub mod error;
pub mod events;

pub use domain::{parse_read_flag, Book, BookId};
pub use error::InvalidBookData;
pub use events::CatalogEvent;
