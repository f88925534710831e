//! Application events raised by the catalog store after a mutation completes.

use serde::{Deserialize, Serialize};

use crate::domain::BookId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum CatalogEvent {
    BookAdded {
        id: BookId,
    },
    BookRemoved {
        id: BookId,
        index: usize,
    },
    BookStatusChanged {
        id: BookId,
        index: usize,
        is_read: bool,
    },
}

impl CatalogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BookAdded { .. } => "BookAdded",
            Self::BookRemoved { .. } => "BookRemoved",
            Self::BookStatusChanged { .. } => "BookStatusChanged",
        }
    }

    pub fn book_id(&self) -> BookId {
        match self {
            Self::BookAdded { id }
            | Self::BookRemoved { id, .. }
            | Self::BookStatusChanged { id, .. } => *id,
        }
    }

    /// Whether the entry form should be reset in response to this event.
    pub fn clears_entry_form(&self) -> bool {
        matches!(self, Self::BookAdded { .. })
    }
}
