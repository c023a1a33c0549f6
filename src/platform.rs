//! Platform seams shared by the controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser provides string key-value storage and timers. Both are modelled
//! as traits here so the settings logic can run against the in-memory versions
//! in tests; `crate::browser` supplies the web-sys implementations.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::StoreError;

/// Raw string storage with the shape of `window.localStorage`.
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    /// Every key currently stored, including ones owned by other scripts.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-memory backend. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text for a fully qualified key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Store raw text under a fully qualified key, bypassing any encoding.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Fire-and-forget delayed execution on the UI thread.
///
/// There is no cancellation path: a task whose target has gone away simply
/// does nothing when it runs.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task);
}

/// Scheduler driven by an explicit clock, for tests and headless use.
///
/// Tasks run only from [`ManualScheduler::advance`], in due order; tasks
/// scheduled while advancing run in the same call if they fall due.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualQueue>>,
}

#[derive(Default)]
struct ManualQueue {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: Task,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Move the clock forward by `ms`, running every task that falls due.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(ms);
        loop {
            // The borrow must end before the task runs: tasks may reschedule.
            let next = {
                let mut queue = self.inner.borrow_mut();
                let earliest = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.seq))
                    .map(|(index, _)| index);
                earliest.map(|index| {
                    let pending = queue.pending.remove(index);
                    queue.now_ms = queue.now_ms.max(pending.due_ms);
                    pending.task
                })
            };
            let Some(task) = next else {
                break;
            };
            task();
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let mut queue = self.inner.borrow_mut();
        let due_ms = queue.now_ms.saturating_add(u64::from(delay_ms));
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(PendingTask { due_ms, seq, task });
    }
}
