//! Commands issued by the front end against the catalog.

/// Row positions are 1-based, as printed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryCommand {
    List,
    Add {
        author: String,
        title: String,
        pages: String,
        is_read: bool,
    },
    Remove {
        position: usize,
    },
    Toggle {
        position: usize,
    },
    Info {
        position: usize,
    },
}

impl LibraryCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Toggle { .. } => "toggle",
            Self::Info { .. } => "info",
        }
    }

    pub fn mutates(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Remove { .. } | Self::Toggle { .. })
    }
}

/// Convert a displayed row number to a catalog index.
pub fn position_to_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}
