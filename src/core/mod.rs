//! core/mod.rs
//!
//! Run one function off the caller's thread, expose whether it's busy.
//!
//! - `WorkerBuilder::build(f)` -> `WorkerRunner` (nothing spawned yet)
//! - `runner.invoke(args)` -> `Pending<R>` (first call spawns the worker thread)
//! - `runner.is_running()` -> read-only observable busy flag
//! - `runner.terminate()` / `controls.terminate_worker()` -> drop the worker
//! - `runner.bind(&scope)` -> unmounting the scope terminates the worker
//!
//! `use_worker(f, &scope)` does build + bind and hands back
//! `(runner, controls)` in one go.
//!
//! No UI imports in here. The GUI only talks to this module's public API.

pub mod config;
pub mod error;
pub mod function;
pub mod lifecycle;
pub mod observable;
pub mod pending;
pub mod runner;
pub mod worker;

pub use config::{OverlapPolicy, WorkerConfig};
pub use error::{Result, WorkerError};
pub use function::WorkerFn;
pub use lifecycle::{Hook, Lifecycle, Scope, ScopeState};
pub use observable::{IsRunning, Observable, ReadOnlyObservable};
pub use pending::Pending;
pub use runner::{WorkerBuilder, WorkerControls, WorkerRunner, use_worker, use_worker_with};
pub use worker::{Spawn, ThreadSpawner, WorkerBody};
