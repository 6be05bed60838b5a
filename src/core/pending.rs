//! core/pending.rs
//! `Pending<R>`: the future returned by `invoke`.
//!
//! Same oneshot bridge as a plain "spawn blocking, await the answer",
//! except a dropped sender becomes `WorkerError::Disconnected` instead of
//! a panic.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use super::error::{Result, WorkerError};

pub(crate) type Reply<R> = oneshot::Sender<Result<R>>;

enum State<R> {
    Waiting(oneshot::Receiver<Result<R>>),
    /// Failed before anything was sent to the worker.
    Failed(Option<WorkerError>),
}

/// Settles once with the call's outcome.
#[must_use = "the call runs either way, but its result is lost if Pending is dropped"]
pub struct Pending<R> {
    call_id: Option<u64>,
    state: State<R>,
}

impl<R> Pending<R> {
    /// Connected pair: the reply half goes into the active-call slot.
    pub(crate) fn channel(call_id: u64) -> (Reply<R>, Self) {
        let (tx, rx) = oneshot::channel();
        let pending = Self {
            call_id: Some(call_id),
            state: State::Waiting(rx),
        };
        (tx, pending)
    }

    pub(crate) fn failed(err: WorkerError) -> Self {
        Self {
            call_id: None,
            state: State::Failed(Some(err)),
        }
    }

    /// Correlation id of the call, `None` if it was never dispatched.
    pub fn call_id(&self) -> Option<u64> {
        self.call_id
    }
}

impl<R> Future for Pending<R> {
    type Output = Result<R>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
                Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(WorkerError::Disconnected)),
                Poll::Pending => Poll::Pending,
            },
            State::Failed(err) => {
                Poll::Ready(Err(err.take().unwrap_or(WorkerError::Disconnected)))
            }
        }
    }
}

impl<R> std::fmt::Debug for Pending<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::Waiting(_) => "waiting",
            State::Failed(_) => "failed",
        };
        f.debug_struct("Pending")
            .field("call_id", &self.call_id)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn resolves_with_reply() {
        let (tx, pending) = Pending::<u32>::channel(9);
        assert_eq!(pending.call_id(), Some(9));
        tx.send(Ok(5)).unwrap();
        assert_eq!(block_on(pending), Ok(5));
    }

    #[test]
    fn dropped_reply_is_disconnected() {
        let (tx, pending) = Pending::<u32>::channel(1);
        drop(tx);
        assert_eq!(block_on(pending), Err(WorkerError::Disconnected));
    }

    #[test]
    fn failed_is_ready_immediately() {
        let pending = Pending::<u32>::failed(WorkerError::AlreadyRunning);
        assert_eq!(pending.call_id(), None);
        assert_eq!(block_on(pending), Err(WorkerError::AlreadyRunning));
    }
}
