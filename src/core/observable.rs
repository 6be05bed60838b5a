//! core/observable.rs
//! A mutable observable cell + its read-only view.
//!
//! This is the "reactive ref" the runner writes its busy flag into.
//! Backed by `tokio::sync::watch`, so readers can either poll (`get`)
//! or await the next change (`changed`, `wait_for`) from any thread.

use std::fmt;
use std::sync::{Arc, Weak};

use tokio::sync::watch;

/// Writable side. Only the owner (the runner) holds one.
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

// Manual impl: `watch::Sender` is shared via Arc, T itself need not be Clone.
impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the value, notifying readers even if it is unchanged.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn read_only(&self) -> ReadOnlyObservable<T> {
        ReadOnlyObservable {
            rx: self.tx.subscribe(),
        }
    }

    /// A writer that doesn't keep the cell alive.
    pub(crate) fn downgrade(&self) -> WeakObservable<T> {
        WeakObservable {
            tx: Arc::downgrade(&self.tx),
        }
    }
}

impl<T: PartialEq> Observable<T> {
    /// Replace the value, notifying readers only on an actual change.
    /// Returns true if the value changed.
    pub fn update(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

/// Writes through only while some `Observable` still owns the cell.
///
/// Worker threads hold this one, so a detached thread can't keep the
/// cell open after its runner is gone.
pub(crate) struct WeakObservable<T> {
    tx: Weak<watch::Sender<T>>,
}

impl<T: PartialEq> WeakObservable<T> {
    /// Like `Observable::update`. False if the cell is gone.
    pub(crate) fn update(&self, value: T) -> bool {
        match self.tx.upgrade() {
            Some(tx) => Observable { tx }.update(value),
            None => false,
        }
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&*self.tx.borrow()).finish()
    }
}

/// Read-only view. Cheap to clone; every clone tracks changes independently.
#[derive(Clone)]
pub struct ReadOnlyObservable<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> ReadOnlyObservable<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait until the value satisfies `pred` (checked immediately first).
    ///
    /// Returns `None` once the writer is gone and the value never matched.
    pub async fn wait_for(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        match self.rx.wait_for(pred).await {
            Ok(v) => Some(v.clone()),
            Err(_) => None,
        }
    }
}

impl<T> ReadOnlyObservable<T> {
    /// Wait for the next change. False once every `Observable` for this
    /// cell has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// True if a change happened since this reader last looked.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyObservable")
            .field(&*self.rx.borrow())
            .finish()
    }
}

/// The runner's busy flag, as handed out to the UI.
pub type IsRunning = ReadOnlyObservable<bool>;
