//! core/error.rs
//! Every way a call can fail, as seen by the caller awaiting `Pending`.
//!
//! Must stay `Clone`: errors travel inside GUI messages.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("failed to start worker thread: {0}")]
    Spawn(String),

    #[error("worker function panicked: {0}")]
    Panicked(String),

    #[error("worker function failed: {0}")]
    Failed(String),

    #[error("a call is already running on this worker")]
    AlreadyRunning,

    #[error("call was superseded by a newer call")]
    Superseded,

    #[error("worker was terminated before the call completed")]
    Terminated,

    #[error("worker thread disconnected without answering")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, WorkerError>;

impl WorkerError {
    /// Turn a caught panic payload into `Panicked`.
    ///
    /// `panic!("literal")` carries a `&str`, `panic!("{x}")` a `String`.
    /// Anything else (custom `panic_any` payloads) gets a generic message.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        WorkerError::Panicked(msg)
    }

    /// True for the outcomes caused by the runner itself (overlap, teardown),
    /// as opposed to the function failing.
    pub fn is_abandoned(&self) -> bool {
        matches!(
            self,
            WorkerError::Superseded | WorkerError::Terminated | WorkerError::Disconnected
        )
    }
}
