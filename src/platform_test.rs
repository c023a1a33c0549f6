use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// MemoryBackend
// =============================================================

#[test]
fn memory_backend_round_trips_and_removes() {
    let backend = MemoryBackend::new();
    assert!(backend.is_empty());

    backend.set_item("cv-theme", "\"tech\"").unwrap();
    assert_eq!(backend.get_item("cv-theme").unwrap().as_deref(), Some("\"tech\""));
    assert_eq!(backend.len(), 1);

    backend.remove_item("cv-theme").unwrap();
    assert_eq!(backend.get_item("cv-theme").unwrap(), None);
}

#[test]
fn memory_backend_clones_share_items() {
    let backend = MemoryBackend::new();
    let other = backend.clone();
    other.insert_raw("k", "v");
    assert_eq!(backend.raw("k").as_deref(), Some("v"));
    assert_eq!(backend.keys().unwrap(), vec!["k".to_owned()]);
}

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn manual_scheduler_runs_only_due_tasks() {
    let scheduler = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let early = Rc::clone(&log);
    scheduler.schedule(100, Box::new(move || early.borrow_mut().push("early")));
    let late = Rc::clone(&log);
    scheduler.schedule(500, Box::new(move || late.borrow_mut().push("late")));

    scheduler.advance(99);
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.pending(), 2);

    scheduler.advance(1);
    assert_eq!(*log.borrow(), vec!["early"]);

    scheduler.advance(400);
    assert_eq!(*log.borrow(), vec!["early", "late"]);
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.now_ms(), 500);
}

#[test]
fn manual_scheduler_orders_by_due_time_then_insertion() {
    let scheduler = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for (delay, label) in [(50, "b"), (10, "a"), (50, "c")] {
        let log = Rc::clone(&log);
        scheduler.schedule(delay, Box::new(move || log.borrow_mut().push(label)));
    }
    scheduler.advance(1_000);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn manual_scheduler_runs_tasks_scheduled_by_tasks() {
    let scheduler = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner_scheduler = scheduler.clone();
    let outer_log = Rc::clone(&log);
    scheduler.schedule(
        10,
        Box::new(move || {
            outer_log.borrow_mut().push("outer");
            let inner_log = Rc::clone(&outer_log);
            inner_scheduler.schedule(20, Box::new(move || inner_log.borrow_mut().push("inner")));
        }),
    );

    scheduler.advance(25);
    assert_eq!(*log.borrow(), vec!["outer"]);
    scheduler.advance(5);
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}
