//! core/runner.rs
//! `WorkerRunner`: the callable side + state machine
//! (Absent -> Running -> Idle -> ... -> Terminated).
//!
//! - The worker handle is created lazily, on the first `invoke`.
//! - One handle per runner, reused across calls.
//! - `terminate()` drops the handle; the next `invoke` starts a fresh one.
//! - Dropping the last runner clone terminates too.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::config::{OverlapPolicy, WorkerConfig};
use super::error::{Result, WorkerError};
use super::function::WorkerFn;
use super::lifecycle::Lifecycle;
use super::observable::{IsRunning, Observable};
use super::pending::Pending;
use super::worker::{Job, Spawn, ThreadSpawner, WorkerHandle};

/// Type-erased teardown, so `WorkerControls` doesn't carry `Args`/`R`.
trait Teardown: Send + Sync {
    fn terminate(&self);
}

struct Shared<Args, R> {
    job: Job<Args, R>,
    config: WorkerConfig,
    spawner: Arc<dyn Spawn>,
    running: Observable<bool>,
    handle: Mutex<Option<WorkerHandle<Args, R>>>,
    handles_started: AtomicU64,
    calls_started: AtomicU64,
}

impl<Args, R> Shared<Args, R>
where
    Args: Send + 'static,
    R: Send + 'static,
{
    fn invoke(&self, args: Args) -> Pending<R> {
        let mut slot = self.handle.lock();

        if slot.is_none() {
            let id = self.handles_started.fetch_add(1, Ordering::Relaxed) + 1;
            match WorkerHandle::start(
                id,
                Arc::clone(&self.job),
                &self.config,
                self.spawner.as_ref(),
                &self.running,
            ) {
                Ok(handle) => *slot = Some(handle),
                Err(err) => {
                    tracing::warn!(handle = id, error = %err, "failed to start worker");
                    return Pending::failed(err);
                }
            }
        }

        let Some(handle) = slot.as_ref() else {
            return Pending::failed(WorkerError::Disconnected);
        };

        let call_id = self.calls_started.fetch_add(1, Ordering::Relaxed) + 1;
        let (reply, pending) = Pending::channel(call_id);

        match handle.post(call_id, args, reply, self.config.overlap) {
            Ok(()) => {
                tracing::debug!(handle = handle.id(), call = call_id, "call dispatched");
                pending
            }
            Err(err) => Pending::failed(err),
        }
    }
}

impl<Args, R> Teardown for Shared<Args, R>
where
    Args: Send + 'static,
    R: Send + 'static,
{
    fn terminate(&self) {
        // Hold the slot across stop + reset so a concurrent `invoke`
        // can't raise the flag for a new handle in between.
        let mut slot = self.handle.lock();
        let Some(handle) = slot.take() else {
            return;
        };

        let id = handle.id();
        handle.stop();
        self.running.update(false);
        drop(slot);

        tracing::info!(handle = id, "worker terminated");
    }
}

impl<Args, R> Drop for Shared<Args, R> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            tracing::debug!(handle = handle.id(), "runner dropped, stopping worker");
            handle.stop();
            self.running.update(false);
        }
    }
}

/// Runs one function on a lazily created background thread.
///
/// Clones share the same worker and busy flag.
///
/// ```no_run
/// # async fn demo() -> worker_fn::core::Result<()> {
/// use worker_fn::core::WorkerBuilder;
///
/// let add = WorkerBuilder::new().build(|x: i32, y: i32| x + y);
/// let pending = add.invoke((2, 3));
/// assert!(add.running());
/// assert_eq!(pending.await?, 5);
/// # Ok(())
/// # }
/// ```
pub struct WorkerRunner<Args, R> {
    shared: Arc<Shared<Args, R>>,
}

impl<Args, R> Clone for WorkerRunner<Args, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<Args, R> WorkerRunner<Args, R>
where
    Args: Send + 'static,
    R: Send + 'static,
{
    /// Run the function with `args` on the worker thread.
    ///
    /// Everything up to the send happens before this returns: the handle
    /// exists and `is_running` is true by the time you hold the `Pending`.
    pub fn invoke(&self, args: Args) -> Pending<R> {
        self.shared.invoke(args)
    }

    /// Read-only busy flag.
    pub fn is_running(&self) -> IsRunning {
        self.shared.running.read_only()
    }

    /// Current value of the busy flag.
    pub fn running(&self) -> bool {
        self.shared.running.get()
    }

    /// Stop and drop the worker handle. No-op without one.
    pub fn terminate(&self) {
        self.shared.terminate();
    }

    pub fn has_handle(&self) -> bool {
        self.shared.handle.lock().is_some()
    }

    /// Id of the current handle. Every new handle gets a higher id.
    pub fn handle_id(&self) -> Option<u64> {
        self.shared.handle.lock().as_ref().map(|h| h.id())
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.shared.config
    }

    /// The `{ is_running, terminate_worker }` bundle for the UI.
    pub fn controls(&self) -> WorkerControls {
        let strong: Arc<dyn Teardown> = self.shared.clone();
        WorkerControls {
            is_running: self.is_running(),
            teardown: Arc::downgrade(&strong),
        }
    }

    /// Tie the worker to a component lifecycle:
    /// mount does nothing (creation stays lazy), unmount terminates.
    ///
    /// The hooks only hold a weak reference to the runner.
    pub fn bind<L>(&self, lifecycle: &L)
    where
        L: Lifecycle + ?Sized,
    {
        lifecycle.on_mounted(Box::new(|| {
            tracing::trace!("component mounted, worker stays lazy");
        }));

        let weak: Weak<Shared<Args, R>> = Arc::downgrade(&self.shared);
        lifecycle.on_unmounted(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                tracing::debug!("component unmounted, terminating worker");
                shared.terminate();
            }
        }));
    }
}

impl<Args, R> fmt::Debug for WorkerRunner<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerRunner")
            .field("config", &self.shared.config)
            .field("running", &self.shared.running)
            .field(
                "handle",
                &self.shared.handle.lock().as_ref().map(|h| h.id()),
            )
            .finish()
    }
}

/// UI-facing capabilities: observe the busy flag, stop the worker.
///
/// Holds no strong reference; once every runner clone is gone,
/// `terminate_worker` does nothing (the worker is already stopped).
#[derive(Clone)]
pub struct WorkerControls {
    is_running: IsRunning,
    teardown: Weak<dyn Teardown>,
}

impl WorkerControls {
    pub fn is_running(&self) -> IsRunning {
        self.is_running.clone()
    }

    pub fn running(&self) -> bool {
        self.is_running.get()
    }

    pub fn terminate_worker(&self) {
        if let Some(teardown) = self.teardown.upgrade() {
            teardown.terminate();
        }
    }
}

impl fmt::Debug for WorkerControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerControls")
            .field("is_running", &self.is_running.get())
            .finish()
    }
}

/// Builds runners. Sync, fallible and async functions each get a `build_*`.
pub struct WorkerBuilder {
    config: WorkerConfig,
    spawner: Arc<dyn Spawn>,
}

impl Default for WorkerBuilder {
    fn default() -> Self {
        Self {
            config: WorkerConfig::default(),
            spawner: Arc::new(ThreadSpawner),
        }
    }
}

impl WorkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: WorkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn overlap(mut self, policy: OverlapPolicy) -> Self {
        self.config.overlap = policy;
        self
    }

    pub fn spawner(mut self, spawner: impl Spawn) -> Self {
        self.spawner = Arc::new(spawner);
        self
    }

    /// Plain function: resolves with its return value.
    pub fn build<F, Args>(self, f: F) -> WorkerRunner<Args, F::Output>
    where
        F: WorkerFn<Args>,
        Args: Send + 'static,
        F::Output: Send + 'static,
    {
        let job: Job<Args, F::Output> =
            Arc::new(move |args: Args| -> Result<F::Output> { Ok(f.apply(args)) });
        self.finish(job)
    }

    /// Function returning `Result<T, E>`: `Err(e)` rejects with
    /// `WorkerError::Failed(e.to_string())`.
    pub fn build_fallible<F, Args, T, E>(self, f: F) -> WorkerRunner<Args, T>
    where
        F: WorkerFn<Args, Output = std::result::Result<T, E>>,
        Args: Send + 'static,
        T: Send + 'static,
        E: fmt::Display,
    {
        let job: Job<Args, T> = Arc::new(move |args: Args| -> Result<T> {
            f.apply(args)
                .map_err(|e| WorkerError::Failed(e.to_string()))
        });
        self.finish(job)
    }

    /// Function returning a future: the worker thread drives it to
    /// completion (`futures::executor::block_on`), so it needn't be `Send`.
    pub fn build_async<F, Args, Fut>(self, f: F) -> WorkerRunner<Args, Fut::Output>
    where
        F: WorkerFn<Args, Output = Fut>,
        Fut: Future,
        Args: Send + 'static,
        Fut::Output: Send + 'static,
    {
        let job: Job<Args, Fut::Output> = Arc::new(move |args: Args| -> Result<Fut::Output> {
            Ok(futures::executor::block_on(f.apply(args)))
        });
        self.finish(job)
    }

    fn finish<Args, R>(self, job: Job<Args, R>) -> WorkerRunner<Args, R> {
        WorkerRunner {
            shared: Arc::new(Shared {
                job,
                config: self.config,
                spawner: self.spawner,
                running: Observable::new(false),
                handle: Mutex::new(None),
                handles_started: AtomicU64::new(0),
                calls_started: AtomicU64::new(0),
            }),
        }
    }
}

impl fmt::Debug for WorkerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build a runner for `f` with default settings and bind it to `lifecycle`.
///
/// Returns the callable plus the `{ is_running, terminate_worker }` bundle.
pub fn use_worker<F, Args, L>(f: F, lifecycle: &L) -> (WorkerRunner<Args, F::Output>, WorkerControls)
where
    F: WorkerFn<Args>,
    Args: Send + 'static,
    F::Output: Send + 'static,
    L: Lifecycle + ?Sized,
{
    use_worker_with(WorkerBuilder::new(), f, lifecycle)
}

/// `use_worker` with a configured builder.
pub fn use_worker_with<F, Args, L>(
    builder: WorkerBuilder,
    f: F,
    lifecycle: &L,
) -> (WorkerRunner<Args, F::Output>, WorkerControls)
where
    F: WorkerFn<Args>,
    Args: Send + 'static,
    F::Output: Send + 'static,
    L: Lifecycle + ?Sized,
{
    let runner = builder.build(f);
    runner.bind(lifecycle);
    let controls = runner.controls();
    (runner, controls)
}
