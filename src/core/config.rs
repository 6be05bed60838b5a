//! core/config.rs
//! Runner configuration.

/// What `invoke` does when a call is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// The new call becomes the active one. The earlier call settles with
    /// `WorkerError::Superseded`; its response is discarded when it arrives.
    #[default]
    Replace,
    /// The new call fails right away with `WorkerError::AlreadyRunning`.
    Reject,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base name for the worker thread. The handle id is appended
    /// (`worker-fn-1`, `worker-fn-2`, ...).
    pub thread_name: String,
    /// Stack size for the worker thread. `None` = platform default.
    pub stack_size: Option<usize>,
    pub overlap: OverlapPolicy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "worker-fn".to_string(),
            stack_size: None,
            overlap: OverlapPolicy::Replace,
        }
    }
}

impl WorkerConfig {
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Full thread name for handle `handle_id`.
    pub(crate) fn thread_name_for(&self, handle_id: u64) -> String {
        format!("{}-{}", self.thread_name, handle_id)
    }
}
