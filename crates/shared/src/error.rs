use thiserror::Error;

/// The single failure kind of book construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBookData {
    #[error("invalid author: must not be empty")]
    EmptyAuthor,
    #[error("invalid title: must not be empty")]
    EmptyTitle,
    #[error("invalid number of pages: {raw:?} (expected a whole number of at least 1)")]
    InvalidPages { raw: String },
}

impl InvalidBookData {
    pub fn invalid_pages(raw: impl Into<String>) -> Self {
        Self::InvalidPages { raw: raw.into() }
    }

    /// Name of the offending field, matching the CLI flag that supplies it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyAuthor => "author",
            Self::EmptyTitle => "title",
            Self::InvalidPages { .. } => "pages",
        }
    }
}
