//! Applies front-end commands to the store and keeps the view in step with it.

use catalog_core::{CatalogStore, SubscribeError, SubscriptionId};
use crossbeam_channel::Receiver;
use shared::{
    domain::{Book, BookId},
    error::InvalidBookData,
    events::CatalogEvent,
};
use storage::SnapshotStore;
use tracing::debug;

use crate::commands::{position_to_index, LibraryCommand};
use crate::controller::events::event_queue;
use crate::ui::CatalogView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Listed,
    Added { id: BookId, title: String },
    Removed(Book),
    StatusChanged { title: String, is_read: bool },
    Info(String),
    NoSuchRow { position: usize },
    Rejected(InvalidBookData),
}

impl CommandOutcome {
    /// One-line status message for the user, if the outcome warrants one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Listed => None,
            Self::Added { title, .. } => Some(format!("Added \"{title}\".")),
            Self::Removed(book) => Some(format!("Removed \"{}\".", book.title())),
            Self::StatusChanged { title, is_read } => Some(format!(
                "\"{title}\" is now marked {}.",
                if *is_read { "read" } else { "not yet read" }
            )),
            Self::Info(line) => Some(line.clone()),
            Self::NoSuchRow { position } => Some(format!("No book at row {position}.")),
            Self::Rejected(err) => Some(format!(
                "Could not add book: {err} (check --{})",
                err.field()
            )),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

pub struct Controller<P> {
    store: CatalogStore<P>,
    events: Receiver<CatalogEvent>,
    view: CatalogView,
    subscription: SubscriptionId,
}

impl<P: SnapshotStore> Controller<P> {
    pub fn attach(mut store: CatalogStore<P>) -> Result<Self, SubscribeError> {
        let (forwarder, events) = event_queue();
        let subscription = store.subscribe(forwarder)?;
        let mut view = CatalogView::new();
        view.render_from(store.list());
        Ok(Self {
            store,
            events,
            view,
            subscription,
        })
    }

    pub fn dispatch(&mut self, command: LibraryCommand) -> CommandOutcome {
        debug!(command = command.name(), "dispatching library command");
        let outcome = match command {
            LibraryCommand::List => CommandOutcome::Listed,
            LibraryCommand::Add {
                author,
                title,
                pages,
                is_read,
            } => {
                self.view.form_mut().fill(author, title, pages, is_read);
                self.submit_form()
            }
            LibraryCommand::Remove { position } => {
                match position_to_index(position).and_then(|index| self.store.remove_at(index)) {
                    Some(book) => CommandOutcome::Removed(book),
                    None => CommandOutcome::NoSuchRow { position },
                }
            }
            LibraryCommand::Toggle { position } => self.toggle(position),
            LibraryCommand::Info { position } => position_to_index(position)
                .and_then(|index| self.store.get(index))
                .map(|book| CommandOutcome::Info(book.info()))
                .unwrap_or(CommandOutcome::NoSuchRow { position }),
        };
        self.pump();
        outcome
    }

    /// Validate the current form draft and add it. A rejected draft stays in
    /// the form so it can be corrected.
    pub fn submit_form(&mut self) -> CommandOutcome {
        match self.view.form().to_book() {
            Ok(book) => {
                let id = book.id();
                let title = book.title().to_string();
                self.store.add(book);
                CommandOutcome::Added { id, title }
            }
            Err(err) => {
                debug!(field = err.field(), %err, "entry form rejected");
                CommandOutcome::Rejected(err)
            }
        }
    }

    fn toggle(&mut self, position: usize) -> CommandOutcome {
        let Some(index) = position_to_index(position) else {
            return CommandOutcome::NoSuchRow { position };
        };
        match self.store.toggle_read_status(index) {
            Some(is_read) => CommandOutcome::StatusChanged {
                title: self
                    .store
                    .get(index)
                    .map(|book| book.title().to_string())
                    .unwrap_or_default(),
                is_read,
            },
            None => CommandOutcome::NoSuchRow { position },
        }
    }

    /// Hand queued store events to the view, in the order they were raised.
    fn pump(&mut self) {
        for event in self.events.try_iter() {
            self.view.handle(&event, self.store.list());
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CatalogView {
        &mut self.view
    }

    pub fn store(&self) -> &CatalogStore<P> {
        &self.store
    }

    /// Stop listening and hand the store back.
    pub fn detach(mut self) -> CatalogStore<P> {
        self.store.unsubscribe(self.subscription);
        self.store
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
