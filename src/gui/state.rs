//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::time::Instant;

use worker_fn::core::{
    Scope, WorkerBuilder, WorkerConfig, WorkerControls, WorkerError, WorkerRunner,
    use_worker_with,
};

use super::jobs::count_primes;

/// Pre-filled limit: slow enough to watch the busy flag, fast enough to finish.
pub(crate) const DEFAULT_LIMIT: &str = "2000000";

/// The "component" that owns a worker.
///
/// Showing the panel mounts its scope; hiding it unmounts the scope,
/// which terminates the worker through the lifecycle binding.
pub(crate) struct PrimePanel {
    pub scope: Scope,
    pub runner: WorkerRunner<(u64,), u64>,
    pub controls: WorkerControls,
}

impl PrimePanel {
    pub(crate) fn mount() -> Self {
        let scope = Scope::new();
        let builder = WorkerBuilder::new()
            .config(WorkerConfig::default().with_thread_name("primes"));
        let (runner, controls) = use_worker_with(builder, count_primes, &scope);
        scope.mount();

        Self {
            scope,
            runner,
            controls,
        }
    }

    pub(crate) fn unmount(self) {
        self.scope.unmount();
    }

    pub(crate) fn is_running(&self) -> bool {
        self.controls.running()
    }
}

/// App state
pub(crate) struct Demo {
    pub status: String,

    // Input
    pub limit_input: String,

    // Worker panel (None = hidden / unmounted)
    pub panel: Option<PrimePanel>,

    // Run bookkeeping
    pub active_call: Option<u64>,
    pub started_at: Option<Instant>,
    pub elapsed_ms: u64,
    pub last_result: Option<String>,
    pub runs_completed: u32,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            status: "Enter a limit, then Run.".to_string(),

            limit_input: DEFAULT_LIMIT.to_string(),

            panel: Some(PrimePanel::mount()),

            active_call: None,
            started_at: None,
            elapsed_ms: 0,
            last_result: None,
            runs_completed: 0,
        }
    }
}

impl Demo {
    pub(crate) fn is_running(&self) -> bool {
        self.panel.as_ref().is_some_and(PrimePanel::is_running)
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Input
    LimitInputChanged(String),

    // Run
    RunPressed,
    /// (limit, call id, outcome)
    RunFinished(u64, Option<u64>, Result<u64, WorkerError>),
    TerminatePressed,

    // Panel mount/unmount
    TogglePanel,

    // Subscription
    Tick,
}
