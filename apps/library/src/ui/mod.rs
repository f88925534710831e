//! Terminal presentation: catalog table projection and the entry form.

pub mod view;

pub use view::{format_table, render, CatalogView, EntryForm, TableRow};
