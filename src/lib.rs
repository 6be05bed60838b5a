//! worker-fn
//!
//! Offload a single function to a background worker thread and watch its
//! busy state from a UI.
//!
//! # Mental model
//! Think "one dedicated helper thread per function":
//!
//! - you hand over a function once (`WorkerBuilder::build`)
//! - each `invoke(args)` sends the arguments over, returns a future
//! - `is_running` flips to true on send, back to false on answer
//! - when the owning UI component goes away, the helper thread goes too
//!
//! # Layout
//! - `core` = the runner (no UI code, usable from any async context)
//! - the `worker-fn-demo` binary = an iced app driving a runner

pub mod core;

pub use crate::core::{
    IsRunning, Lifecycle, OverlapPolicy, Pending, Scope, WorkerBuilder, WorkerConfig,
    WorkerControls, WorkerError, WorkerFn, WorkerRunner, use_worker, use_worker_with,
};
