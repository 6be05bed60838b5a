//! core/worker/mod.rs
//! One background execution context ("handle").
//!
//! Shape:
//! - the runner sends `Request`s over a std mpsc channel
//! - the engine thread applies the job and answers through `Dispatch`
//! - `stop()` marks the dispatch stopped and drops the sender; the thread
//!   exits after whatever it is currently running returns
//!
//! A running Rust function can't be preempted, so "terminate" means:
//! detach the thread, discard queued work, and never deliver its result.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;

mod dispatch;
mod engine;

use dispatch::Dispatch;
use engine::WorkerEngine;
pub(crate) use engine::Job;

use super::config::{OverlapPolicy, WorkerConfig};
use super::error::{Result, WorkerError};
use super::observable::Observable;
use super::pending::Reply;

/// Message sent to the worker: the call id + the argument tuple.
#[derive(Debug)]
pub(crate) struct Request<Args> {
    pub call_id: u64,
    pub data: Args,
}

/// The closure a spawned worker thread runs.
pub type WorkerBody = Box<dyn FnOnce() + Send + 'static>;

/// Starts worker threads. Swap it out to observe or control thread creation.
pub trait Spawn: Send + Sync + 'static {
    fn spawn(&self, name: String, stack_size: Option<usize>, body: WorkerBody) -> io::Result<()>;
}

/// Default `Spawn`: a named, detached OS thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl Spawn for ThreadSpawner {
    fn spawn(&self, name: String, stack_size: Option<usize>, body: WorkerBody) -> io::Result<()> {
        let mut builder = thread::Builder::new().name(name);
        if let Some(bytes) = stack_size {
            builder = builder.stack_size(bytes);
        }
        // JoinHandle dropped on purpose: the thread is detached.
        builder.spawn(body)?;
        Ok(())
    }
}

pub(crate) struct WorkerHandle<Args, R> {
    id: u64,
    requests: Sender<Request<Args>>,
    dispatch: Arc<Dispatch<R>>,
}

impl<Args, R> WorkerHandle<Args, R>
where
    Args: Send + 'static,
    R: Send + 'static,
{
    /// Spawn the worker thread for handle `id`.
    pub(crate) fn start(
        id: u64,
        job: Job<Args, R>,
        config: &WorkerConfig,
        spawner: &dyn Spawn,
        running: &Observable<bool>,
    ) -> Result<Self> {
        let (requests, request_rx) = mpsc::channel::<Request<Args>>();
        let dispatch = Arc::new(Dispatch::new(id, running.downgrade()));
        let engine = WorkerEngine::new(id, job, Arc::clone(&dispatch));

        let name = config.thread_name_for(id);
        spawner
            .spawn(
                name.clone(),
                config.stack_size,
                Box::new(move || engine.run(request_rx)),
            )
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        tracing::debug!(handle = id, thread = %name, "worker handle created");

        Ok(Self {
            id,
            requests,
            dispatch,
        })
    }

    /// Register `call_id` as the active call, then post its arguments.
    pub(crate) fn post(
        &self,
        call_id: u64,
        data: Args,
        reply: Reply<R>,
        policy: OverlapPolicy,
    ) -> Result<()> {
        self.dispatch.register(call_id, reply, policy)?;

        if self.requests.send(Request { call_id, data }).is_err() {
            // Thread is gone (spawner never ran the body, or it died).
            self.dispatch
                .settle(call_id, Err(WorkerError::Disconnected));
        }
        Ok(())
    }
}

impl<Args, R> WorkerHandle<Args, R> {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Tear down. Dropping `self` closes the request channel.
    /// The caller resets the busy flag.
    pub(crate) fn stop(self) {
        self.dispatch.stop();
    }
}
