use super::*;

use std::{cell::RefCell, rc::Rc};

use storage::{DisabledSnapshotStore, MemorySnapshotStore};

fn book(author: &str, title: &str, pages: i64, is_read: bool) -> Book {
    Book::new(author, title, pages, is_read).expect("valid book")
}

fn titles<P: SnapshotStore>(store: &CatalogStore<P>) -> Vec<&str> {
    store.list().iter().map(Book::title).collect()
}

fn record_events<P: SnapshotStore>(store: &mut CatalogStore<P>) -> Rc<RefCell<Vec<CatalogEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store
        .subscribe(move |event: &CatalogEvent| sink.borrow_mut().push(*event))
        .expect("subscribe");
    events
}

struct FailingStore;

impl SnapshotStore for FailingStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("disk unplugged"))
    }

    fn save(&self, _snapshot: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk unplugged"))
    }
}

#[test]
fn add_prepends() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    assert!(store.is_empty());

    let first = book("Edward", "Dracula 1992", 762, true);
    let second = book("Fred", "Freddy", 1000, false);
    store.add(first.clone());
    store.add(second.clone());

    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0], second);
    assert_eq!(store.list()[1], first);
}

#[test]
fn remove_at_shifts_following_books_down() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    for title in ["c", "b", "a"] {
        store.add(book("Edward", title, 10, false));
    }
    assert_eq!(titles(&store), ["a", "b", "c"]);

    let removed = store.remove_at(1).expect("in range");
    assert_eq!(removed.title(), "b");
    assert_eq!(titles(&store), ["a", "c"]);
}

#[test]
fn remove_at_out_of_range_is_a_silent_no_op() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());
    store.add(book("Edward", "Dracula", 762, true));
    let events = record_events(&mut store);
    let saves = memory.save_count();

    assert!(store.remove_at(1).is_none());
    assert!(store.remove_at(usize::MAX).is_none());
    assert_eq!(store.len(), 1);
    assert!(events.borrow().is_empty());
    assert_eq!(memory.save_count(), saves);
}

#[test]
fn toggle_flips_only_the_target() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    store.add(book("Edward", "Dracula", 762, true));
    store.add(book("Edward", "Sunset", 200, false));
    store.add(book("Fred", "Freddy", 1000, true));

    assert_eq!(store.toggle_read_status(1), Some(true));
    let flags: Vec<bool> = store.list().iter().map(Book::is_read).collect();
    assert_eq!(flags, [true, true, true]);

    assert_eq!(store.toggle_read_status(1), Some(false));
    let flags: Vec<bool> = store.list().iter().map(Book::is_read).collect();
    assert_eq!(flags, [true, false, true]);
}

#[test]
fn toggle_out_of_range_modifies_nothing() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());
    store.add(book("Edward", "Dracula", 762, true));
    let events = record_events(&mut store);
    let saves = memory.save_count();

    assert_eq!(store.toggle_read_status(5), None);
    assert!(store.list()[0].is_read());
    assert!(events.borrow().is_empty());
    assert_eq!(memory.save_count(), saves);
}

#[test]
fn id_addressed_operations_follow_the_book() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    let dracula = book("Edward", "Dracula", 762, false);
    let dracula_id = dracula.id();
    store.add(dracula);
    store.add(book("Fred", "Freddy", 1000, false));

    assert_eq!(store.position(dracula_id), Some(1));
    assert_eq!(store.toggle_read_status_of(dracula_id), Some(true));
    assert!(store.get(1).expect("dracula").is_read());

    let removed = store.remove(dracula_id).expect("removed");
    assert_eq!(removed.id(), dracula_id);
    assert_eq!(store.position(dracula_id), None);
    assert!(store.remove(dracula_id).is_none());
    assert!(store.toggle_read_status_of(dracula_id).is_none());
}

#[test]
fn every_mutation_rewrites_the_snapshot() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());

    store.add(book("Edward", "Dracula", 762, true));
    assert_eq!(memory.save_count(), 1);
    store.toggle_read_status(0);
    assert_eq!(memory.save_count(), 2);
    store.remove_at(0);
    assert_eq!(memory.save_count(), 3);
    assert_eq!(memory.snapshot().as_deref(), Some("[]"));
}

#[test]
fn reopening_reproduces_the_catalog() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());
    store.add(book("Edward", "Dracula 1992", 762, true));
    store.add(book("Edward", "When the sun sets", 200, false));
    store.add(book("Fred", "Freddy Kruggar vs Jason", 1000, true));
    store.toggle_read_status(2);
    store.remove_at(1);

    let reopened = CatalogStore::create(memory);
    assert_eq!(reopened.list(), store.list());
}

#[test]
fn adding_the_same_book_twice_survives_reopening() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());
    let events = record_events(&mut store);
    let dracula = book("Edward", "Dracula 1992", 762, true);
    store.add(dracula.clone());
    store.add(book("Fred", "Freddy", 1000, false));
    store.add(dracula.clone());

    assert_eq!(titles(&store), ["Dracula 1992", "Freddy", "Dracula 1992"]);
    let readded = store.list()[0].id();
    assert_ne!(readded, dracula.id());
    assert_eq!(store.position(dracula.id()), Some(2));
    assert_eq!(events.borrow()[2], CatalogEvent::BookAdded { id: readded });

    let reopened = CatalogStore::create_with_seed(memory.clone(), || {
        vec![book("Sample", "Sample", 1, false)]
    });
    assert_eq!(reopened.list(), store.list());
    assert!(!memory.snapshot().expect("snapshot").contains("Sample"));
}

#[test]
fn snapshot_with_repeated_ids_loads_every_entry() {
    let dracula = book("Edward", "Dracula 1992", 762, true);
    let raw = snapshot::encode(&[dracula.clone(), dracula.clone()]).expect("encode");
    let memory = MemorySnapshotStore::with_snapshot(raw);

    let store = CatalogStore::create_with_seed(memory, || vec![book("Sample", "Sample", 1, false)]);
    assert_eq!(titles(&store), ["Dracula 1992", "Dracula 1992"]);
    assert_eq!(store.position(dracula.id()), Some(0));
    assert_ne!(store.list()[1].id(), dracula.id());
}

#[test]
fn failing_backend_never_blocks_in_memory_behavior() {
    let mut store = CatalogStore::create(FailingStore);
    assert!(store.is_empty());

    store.add(book("Edward", "Dracula", 762, false));
    assert_eq!(store.toggle_read_status(0), Some(true));
    store.add(book("Fred", "Freddy", 1000, false));
    assert!(store.remove_at(0).is_some());
    assert_eq!(titles(&store), ["Dracula"]);
}

#[test]
fn disabled_backend_is_never_written() {
    let mut store = CatalogStore::create(DisabledSnapshotStore);
    store.add(book("Edward", "Dracula", 762, false));
    assert_eq!(store.len(), 1);
    assert!(!store.persistence().is_available());
}

#[test]
fn seed_is_used_only_without_a_snapshot() {
    let memory = MemorySnapshotStore::new();
    let store = CatalogStore::create_with_seed(memory.clone(), || {
        vec![
            book("Edward", "Dracula 1992", 762, true),
            book("Fred", "Freddy Kruggar vs Jason", 1000, true),
        ]
    });
    assert_eq!(titles(&store), ["Freddy Kruggar vs Jason", "Dracula 1992"]);
    assert_eq!(memory.save_count(), 1);

    let mut seeded_again = false;
    let reopened = CatalogStore::create_with_seed(memory.clone(), || {
        seeded_again = true;
        Vec::new()
    });
    assert!(!seeded_again);
    assert_eq!(reopened.list(), store.list());
}

#[test]
fn empty_snapshot_is_a_prior_catalog() {
    let memory = MemorySnapshotStore::with_snapshot("[]");
    let store =
        CatalogStore::create_with_seed(memory, || vec![book("Edward", "Dracula", 762, true)]);
    assert!(store.is_empty());
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    for raw in ["{not json", r#"{"books":[]}"#, r#"[{"author":"","title":"x","pages":1}]"#] {
        let memory = MemorySnapshotStore::with_snapshot(raw);
        let store = CatalogStore::create_with_seed(memory.clone(), || {
            vec![book("Edward", "Dracula", 762, true)]
        });
        assert_eq!(titles(&store), ["Dracula"], "snapshot {raw:?}");
        assert!(memory.snapshot().expect("rewritten").contains("Dracula"));
    }
}

#[test]
fn unreadable_backend_falls_back_to_seed() {
    let store =
        CatalogStore::create_with_seed(FailingStore, || vec![book("Edward", "Dracula", 762, true)]);
    assert_eq!(titles(&store), ["Dracula"]);
}

#[test]
fn events_follow_each_successful_mutation_in_order() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    let events = record_events(&mut store);

    let dracula = book("Edward", "Dracula", 762, true);
    let dracula_id = dracula.id();
    store.add(dracula);
    store.toggle_read_status(0);
    store.remove_at(0);

    assert_eq!(
        *events.borrow(),
        [
            CatalogEvent::BookAdded { id: dracula_id },
            CatalogEvent::BookStatusChanged {
                id: dracula_id,
                index: 0,
                is_read: false,
            },
            CatalogEvent::BookRemoved {
                id: dracula_id,
                index: 0,
            },
        ]
    );
}

#[test]
fn events_fire_after_the_snapshot_is_written() {
    let memory = MemorySnapshotStore::new();
    let mut store = CatalogStore::create(memory.clone());
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    let backend = memory.clone();
    store
        .subscribe(move |_: &CatalogEvent| {
            let snapshot = backend.snapshot().unwrap_or_default();
            sink.borrow_mut().push((backend.save_count(), snapshot));
        })
        .expect("subscribe");

    store.add(book("Edward", "Dracula", 762, true));
    store.remove_at(0);

    let observed = observed.borrow();
    assert_eq!(observed[0].0, 1);
    assert!(observed[0].1.contains("Dracula"));
    assert_eq!(observed[1], (2, "[]".to_string()));
}

#[test]
fn listeners_run_in_registration_order() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let sink = Rc::clone(&order);
        store
            .subscribe(move |_: &CatalogEvent| sink.borrow_mut().push(tag))
            .expect("subscribe");
    }

    store.add(book("Edward", "Dracula", 762, true));
    assert_eq!(*order.borrow(), ["first", "second", "third"]);
}

#[test]
fn unsubscribe_and_dispose_stop_notifications() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    let events = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&events);
    let id = store
        .subscribe(move |_: &CatalogEvent| *sink.borrow_mut() += 1)
        .expect("subscribe");
    let remaining = record_events(&mut store);

    store.add(book("Edward", "Dracula", 762, true));
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.add(book("Fred", "Freddy", 1000, false));
    assert_eq!(*events.borrow(), 1);
    assert_eq!(remaining.borrow().len(), 2);

    store.dispose();
    assert_eq!(store.listener_count(), 0);
    store.remove_at(0);
    assert_eq!(remaining.borrow().len(), 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn listener_limit_is_enforced() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    for _ in 0..MAX_LISTENERS {
        store.subscribe(|_: &CatalogEvent| {}).expect("within limit");
    }
    assert_eq!(
        store.subscribe(|_: &CatalogEvent| {}),
        Err(SubscribeError::LimitReached {
            limit: MAX_LISTENERS
        })
    );

    store.dispose();
    assert!(store.subscribe(|_: &CatalogEvent| {}).is_ok());
}

#[test]
fn invalid_book_data_never_reaches_the_store() {
    let mut store = CatalogStore::create(MemorySnapshotStore::new());
    let events = record_events(&mut store);

    let attempt = Book::parse("Edward", "Dracula", "0", None).map(|book| store.add(book));
    assert!(attempt.is_err());
    assert!(store.is_empty());
    assert!(events.borrow().is_empty());
}
