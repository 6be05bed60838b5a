//! core/worker/engine.rs
//! The loop that runs on the worker thread.
//!
//! Owns:
//! - the job (the user's function, already wrapped to return `Result`)
//! - the request receiver
//! - a shared `Dispatch` to answer through
//!
//! No UI imports. Exits when the handle is dropped or stopped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use super::Request;
use super::dispatch::Dispatch;
use crate::core::error::{Result, WorkerError};

/// The user's function after wrapping (sync / fallible / async all end up here).
pub(crate) type Job<Args, R> = Arc<dyn Fn(Args) -> Result<R> + Send + Sync>;

pub(crate) struct WorkerEngine<Args, R> {
    handle_id: u64,
    job: Job<Args, R>,
    dispatch: Arc<Dispatch<R>>,
}

impl<Args, R> WorkerEngine<Args, R> {
    pub(crate) fn new(handle_id: u64, job: Job<Args, R>, dispatch: Arc<Dispatch<R>>) -> Self {
        Self {
            handle_id,
            job,
            dispatch,
        }
    }

    pub(crate) fn run(self, requests: Receiver<Request<Args>>) {
        tracing::debug!(handle = self.handle_id, "worker started");

        // recv() still yields buffered requests after the sender is gone,
        // so check `stopped` before each one.
        while let Ok(Request { call_id, data }) = requests.recv() {
            if self.dispatch.is_stopped() {
                break;
            }

            let outcome = self.apply(call_id, data);
            self.dispatch.settle(call_id, outcome);
        }

        tracing::debug!(handle = self.handle_id, "worker stopped");
    }

    /// Apply the job, turning a panic into `WorkerError::Panicked`.
    /// The thread survives, so the handle stays usable for the next call.
    fn apply(&self, call_id: u64, data: Args) -> Result<R> {
        let job = &self.job;
        match panic::catch_unwind(AssertUnwindSafe(move || job(data))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let err = WorkerError::from_panic(payload);
                tracing::warn!(
                    handle = self.handle_id,
                    call = call_id,
                    error = %err,
                    "worker function panicked"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OverlapPolicy;
    use crate::core::observable::Observable;
    use crate::core::pending::Pending;
    use futures::executor::block_on;
    use std::sync::mpsc;

    fn engine(job: Job<(u32,), u32>) -> (WorkerEngine<(u32,), u32>, Arc<Dispatch<u32>>) {
        let dispatch = Arc::new(Dispatch::new(1, Observable::new(false).downgrade()));
        (WorkerEngine::new(1, job, Arc::clone(&dispatch)), dispatch)
    }

    #[test]
    fn runs_requests_until_sender_dropped() {
        let (engine, dispatch) = engine(Arc::new(|(x,): (u32,)| -> Result<u32> { Ok(x + 1) }));
        let (tx, rx) = mpsc::channel();

        let (reply, pending) = Pending::channel(1);
        dispatch.register(1, reply, OverlapPolicy::Replace).unwrap();
        tx.send(Request { call_id: 1, data: (41,) }).unwrap();
        drop(tx);

        engine.run(rx);
        assert_eq!(block_on(pending), Ok(42));
    }

    #[test]
    fn panic_becomes_error() {
        let (engine, _dispatch) = engine(Arc::new(|(x,): (u32,)| -> Result<u32> {
            if x == 0 {
                panic!("zero");
            }
            Ok(x)
        }));

        assert_eq!(
            engine.apply(7, (0,)),
            Err(WorkerError::Panicked("zero".into()))
        );
        assert_eq!(engine.apply(8, (3,)), Ok(3));
    }

    #[test]
    fn stopped_engine_skips_buffered_requests() {
        let (engine, dispatch) = engine(Arc::new(|(x,): (u32,)| -> Result<u32> { Ok(x) }));
        let (tx, rx) = mpsc::channel();
        tx.send(Request { call_id: 1, data: (1,) }).unwrap();
        dispatch.stop();
        drop(tx);

        // Returns without touching the (already stopped) dispatch.
        engine.run(rx);
    }
}
