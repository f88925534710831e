use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InvalidBookData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub const READ_LABEL: &str = "Read";
pub const NOT_READ_LABEL: &str = "Not yet read";

/// A catalog entry. Only `is_read` changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookRecord", rename_all = "camelCase")]
pub struct Book {
    id: BookId,
    author: String,
    title: String,
    pages: u32,
    is_read: bool,
}

impl Book {
    pub fn new(
        author: impl AsRef<str>,
        title: impl AsRef<str>,
        pages: i64,
        is_read: bool,
    ) -> Result<Self, InvalidBookData> {
        Self::with_id(BookId::new(), author, title, pages, is_read)
    }

    /// Validate raw text input, e.g. values typed into an entry form.
    pub fn parse(
        author: &str,
        title: &str,
        pages: &str,
        is_read: Option<&str>,
    ) -> Result<Self, InvalidBookData> {
        let pages_value = pages
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidBookData::invalid_pages(pages))?;
        Self::new(author, title, pages_value, parse_read_flag(is_read))
    }

    fn with_id(
        id: BookId,
        author: impl AsRef<str>,
        title: impl AsRef<str>,
        pages: i64,
        is_read: bool,
    ) -> Result<Self, InvalidBookData> {
        let author = author.as_ref().trim();
        if author.is_empty() {
            return Err(InvalidBookData::EmptyAuthor);
        }
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(InvalidBookData::EmptyTitle);
        }
        let pages = u32::try_from(pages)
            .ok()
            .filter(|pages| *pages >= 1)
            .ok_or_else(|| InvalidBookData::invalid_pages(pages.to_string()))?;

        Ok(Self {
            id,
            author: author.to_string(),
            title: title.to_string(),
            pages,
            is_read,
        })
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn read_status(&self) -> &'static str {
        if self.is_read {
            READ_LABEL
        } else {
            NOT_READ_LABEL
        }
    }

    pub fn info(&self) -> String {
        self.to_string()
    }

    pub fn toggle_status(&mut self) {
        self.is_read = !self.is_read;
    }

    /// Replace the id with a fresh one, e.g. when the same book is cataloged twice.
    pub fn reassign_id(&mut self) -> BookId {
        self.id = BookId::new();
        self.id
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {}, {} pages, {}",
            self.title,
            self.author,
            self.pages,
            self.read_status()
        )
    }
}

/// Coerce a loosely typed read flag. Anything unrecognized is `false`.
pub fn parse_read_flag(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Wire shape of a persisted book. Older snapshots carry no id and may store
/// the page count as text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookRecord {
    #[serde(default)]
    id: Option<BookId>,
    author: String,
    title: String,
    pages: PagesField,
    #[serde(default)]
    is_read: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PagesField {
    Number(i64),
    Text(String),
}

impl TryFrom<BookRecord> for Book {
    type Error = InvalidBookData;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let pages = match record.pages {
            PagesField::Number(pages) => pages,
            PagesField::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| InvalidBookData::invalid_pages(raw.as_str()))?,
        };
        Self::with_id(
            record.id.unwrap_or_default(),
            record.author,
            record.title,
            pages,
            record.is_read.unwrap_or(false),
        )
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
