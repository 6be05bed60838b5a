//! core/worker/dispatch.rs
//! The handle's "completion/error handler" slot.
//!
//! At most one call is active per handle. Responses are matched by call id,
//! so a late answer for a superseded or terminated call never reaches a
//! newer caller and never clears the busy flag under it.
//!
//! Lock order: runner handle slot -> `active`. The worker thread only ever
//! takes `active`.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::core::config::OverlapPolicy;
use crate::core::error::{Result, WorkerError};
use crate::core::observable::WeakObservable;
use crate::core::pending::Reply;

struct ActiveCall<R> {
    call_id: u64,
    reply: Reply<R>,
}

pub(crate) struct Dispatch<R> {
    handle_id: u64,
    active: Mutex<Option<ActiveCall<R>>>,
    stopped: AtomicBool,
    running: WeakObservable<bool>,
}

impl<R> Dispatch<R> {
    pub(crate) fn new(handle_id: u64, running: WeakObservable<bool>) -> Self {
        Self {
            handle_id,
            active: Mutex::new(None),
            stopped: AtomicBool::new(false),
            running,
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Make `call_id` the active call and raise the busy flag.
    ///
    /// Under `Reject` an already-active call wins and `reply` is dropped.
    pub(crate) fn register(
        &self,
        call_id: u64,
        reply: Reply<R>,
        policy: OverlapPolicy,
    ) -> Result<()> {
        let mut active = self.active.lock();

        if self.is_stopped() {
            return Err(WorkerError::Terminated);
        }

        if policy == OverlapPolicy::Reject {
            if let Some(current) = active.as_ref() {
                tracing::debug!(
                    handle = self.handle_id,
                    active = current.call_id,
                    rejected = call_id,
                    "call rejected, worker busy"
                );
                return Err(WorkerError::AlreadyRunning);
            }
        }

        if let Some(prev) = active.replace(ActiveCall { call_id, reply }) {
            tracing::debug!(
                handle = self.handle_id,
                superseded = prev.call_id,
                by = call_id,
                "active call replaced"
            );
            let _ = prev.reply.send(Err(WorkerError::Superseded));
        }

        self.running.update(true);
        Ok(())
    }

    /// Deliver an outcome. Dropped unless `call_id` is still the active call.
    pub(crate) fn settle(&self, call_id: u64, outcome: Result<R>) {
        let mut active = self.active.lock();

        if self.is_stopped() {
            tracing::warn!(
                handle = self.handle_id,
                call = call_id,
                "response after termination discarded"
            );
            return;
        }

        match active.as_ref() {
            Some(current) if current.call_id == call_id => {}
            _ => {
                tracing::debug!(
                    handle = self.handle_id,
                    call = call_id,
                    "stale response discarded"
                );
                return;
            }
        }

        let Some(call) = active.take() else {
            return;
        };

        self.running.update(false);
        tracing::debug!(
            handle = self.handle_id,
            call = call_id,
            ok = outcome.is_ok(),
            "call settled"
        );
        // The caller may have dropped its Pending; nothing to do then.
        let _ = call.reply.send(outcome);
    }

    /// Stop accepting work. The in-flight call (if any) settles with `Terminated`.
    ///
    /// Leaves the busy flag alone: a newer handle may already own it, so
    /// resetting it is the runner's job.
    pub(crate) fn stop(&self) {
        let mut active = self.active.lock();
        self.stopped.store(true, Ordering::Release);

        if let Some(call) = active.take() {
            let _ = call.reply.send(Err(WorkerError::Terminated));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observable::Observable;
    use crate::core::pending::Pending;
    use futures::executor::block_on;

    fn dispatch() -> (Dispatch<u32>, Observable<bool>) {
        let running = Observable::new(false);
        (Dispatch::new(1, running.downgrade()), running)
    }

    #[test]
    fn settle_matching_call() {
        let (d, running) = dispatch();
        let (reply, pending) = Pending::channel(1);

        d.register(1, reply, OverlapPolicy::Replace).unwrap();
        assert!(running.get());

        d.settle(1, Ok(10));
        assert!(!running.get());
        assert_eq!(block_on(pending), Ok(10));
    }

    #[test]
    fn replace_supersedes_and_ignores_stale_response() {
        let (d, running) = dispatch();
        let (r1, p1) = Pending::channel(1);
        let (r2, p2) = Pending::channel(2);

        d.register(1, r1, OverlapPolicy::Replace).unwrap();
        d.register(2, r2, OverlapPolicy::Replace).unwrap();
        assert_eq!(block_on(p1), Err(WorkerError::Superseded));

        // Answer for call 1 arrives first: must not settle call 2.
        d.settle(1, Ok(100));
        assert!(running.get());

        d.settle(2, Ok(200));
        assert!(!running.get());
        assert_eq!(block_on(p2), Ok(200));
    }

    #[test]
    fn reject_keeps_active_call() {
        let (d, running) = dispatch();
        let (r1, p1) = Pending::channel(1);
        let (r2, _p2) = Pending::channel(2);

        d.register(1, r1, OverlapPolicy::Reject).unwrap();
        assert_eq!(
            d.register(2, r2, OverlapPolicy::Reject),
            Err(WorkerError::AlreadyRunning)
        );
        assert!(running.get());

        d.settle(1, Err(WorkerError::Failed("nope".into())));
        assert!(!running.get());
        assert_eq!(block_on(p1), Err(WorkerError::Failed("nope".into())));
    }

    #[test]
    fn stop_terminates_in_flight_and_blocks_late_answers() {
        let (d, running) = dispatch();
        let (r1, p1) = Pending::channel(1);
        d.register(1, r1, OverlapPolicy::Replace).unwrap();

        d.stop();
        assert!(d.is_stopped());
        assert_eq!(block_on(p1), Err(WorkerError::Terminated));
        // The owner resets the flag, not the dispatch.
        assert!(running.get());

        // A late answer is dropped and does not touch the flag.
        d.settle(1, Ok(5));
        assert!(running.get());

        let (r2, _p2) = Pending::channel(2);
        assert_eq!(
            d.register(2, r2, OverlapPolicy::Replace),
            Err(WorkerError::Terminated)
        );
    }
}
