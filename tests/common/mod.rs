//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use worker_fn::core::{Spawn, ThreadSpawner, WorkerBody};

/// Upper bound for any single await in tests.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Real threads, but counts how many were started.
#[derive(Clone, Default)]
pub struct CountingSpawner {
    count: Arc<AtomicUsize>,
}

impl CountingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Spawn for CountingSpawner {
    fn spawn(&self, name: String, stack_size: Option<usize>, body: WorkerBody) -> io::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        ThreadSpawner.spawn(name, stack_size, body)
    }
}

/// Blocks worker functions until the test opens it.
#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    cv: Condvar,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cv.wait(open).unwrap();
        }
    }

    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cv.notify_all();
    }
}

/// Await with `TEST_TIMEOUT`, panicking instead of hanging the suite.
pub async fn within<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(TEST_TIMEOUT, fut)
        .await
        .expect("timed out waiting for worker")
}
