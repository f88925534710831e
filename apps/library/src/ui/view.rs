//! Projection of the catalog into display rows, plus the entry-form draft.

use shared::{domain::Book, error::InvalidBookData, events::CatalogEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based row number shown to the user.
    pub position: usize,
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub status: &'static str,
}

pub fn render(books: &[Book]) -> Vec<TableRow> {
    books
        .iter()
        .enumerate()
        .map(|(index, book)| TableRow {
            position: index + 1,
            title: book.title().to_string(),
            author: book.author().to_string(),
            pages: book.pages(),
            status: book.read_status(),
        })
        .collect()
}

const HEADERS: [&str; 5] = ["#", "Title", "Author", "Pages", "Status"];
const EMPTY_CATALOG: &str = "(the catalog is empty)";
const PAGES_COLUMN: usize = 3;

pub fn format_table(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.position.to_string(),
                row.title.clone(),
                row.author.clone(),
                row.pages.to_string(),
                row.status.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    if cells.is_empty() {
        out.push_str(EMPTY_CATALOG);
        out.push('\n');
    }
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (column, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        if column == PAGES_COLUMN {
            out.push_str(&format!("{cell:>width$}"));
        } else if column == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{cell:<width$}"));
        }
        if column != last {
            out.push_str("  ");
        }
    }
    out.push('\n');
}

/// Draft values of the "add book" form, kept as raw text until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub author: String,
    pub title: String,
    pub pages: String,
    pub is_read: bool,
}

impl EntryForm {
    pub fn fill(
        &mut self,
        author: impl Into<String>,
        title: impl Into<String>,
        pages: impl Into<String>,
        is_read: bool,
    ) {
        self.author = author.into();
        self.title = title.into();
        self.pages = pages.into();
        self.is_read = is_read;
    }

    pub fn to_book(&self) -> Result<Book, InvalidBookData> {
        let is_read = self.is_read.then_some("true");
        Book::parse(&self.author, &self.title, &self.pages, is_read)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// What the user currently sees. Rows are rebuilt from scratch on every event.
#[derive(Debug, Default)]
pub struct CatalogView {
    rows: Vec<TableRow>,
    form: EntryForm,
    renders: usize,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_from(&mut self, books: &[Book]) {
        self.rows = render(books);
        self.renders += 1;
    }

    pub fn handle(&mut self, event: &CatalogEvent, books: &[Book]) {
        tracing::debug!(event = event.name(), book_id = %event.book_id(), "re-rendering catalog");
        self.render_from(books);
        if event.clears_entry_form() {
            self.form.clear();
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn table(&self) -> String {
        format_table(&self.rows)
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}
