//! gui/update/run.rs
//! Run lifecycle: dispatch to the worker, await via Task::perform, report.
//!
//! The UI never blocks: `invoke` returns a `Pending` right away and the
//! busy flag is already true when this update returns.

use iced::Task;
use std::time::Instant;

use worker_fn::core::WorkerError;

use super::super::state::{Demo, Message};
use super::super::util::{fmt_elapsed, parse_limit};

pub(crate) fn limit_input_changed(state: &mut Demo, s: String) -> Task<Message> {
    state.limit_input = s;
    Task::none()
}

pub(crate) fn run_pressed(state: &mut Demo) -> Task<Message> {
    if state.is_running() {
        return Task::none();
    }

    let Some(panel) = state.panel.as_ref() else {
        state.status = "Show the panel first.".to_string();
        return Task::none();
    };

    let limit = match parse_limit(&state.limit_input) {
        Ok(n) => n,
        Err(e) => {
            state.status = e;
            return Task::none();
        }
    };

    let pending = panel.runner.invoke((limit,));
    let call_id = pending.call_id();
    tracing::info!(limit, call = ?call_id, "run dispatched");

    state.active_call = call_id;
    state.started_at = Some(Instant::now());
    state.elapsed_ms = 0;
    state.status = format!("Counting primes up to {limit}...");

    Task::perform(pending, move |result| {
        Message::RunFinished(limit, call_id, result)
    })
}

pub(crate) fn run_finished(
    state: &mut Demo,
    limit: u64,
    call_id: Option<u64>,
    result: Result<u64, WorkerError>,
) -> Task<Message> {
    // A terminated run can report after the next one started.
    if call_id != state.active_call {
        tracing::debug!(call = ?call_id, active = ?state.active_call, "stale run result ignored");
        return Task::none();
    }
    state.active_call = None;

    let elapsed = state
        .started_at
        .take()
        .map(|t| t.elapsed().as_millis() as u64)
        .unwrap_or(state.elapsed_ms);
    state.elapsed_ms = elapsed;

    match result {
        Ok(count) => {
            state.runs_completed += 1;
            state.last_result = Some(format!("{count} primes ≤ {limit}"));
            state.status = format!("Done in {}", fmt_elapsed(elapsed));
        }
        Err(e) if e.is_abandoned() => {
            state.status = format!("Stopped: {e}");
        }
        Err(e) => {
            tracing::warn!(limit, error = %e, "run failed");
            state.status = format!("Run error: {e}");
        }
    }

    Task::none()
}

pub(crate) fn terminate_pressed(state: &mut Demo) -> Task<Message> {
    let Some(panel) = state.panel.as_ref() else {
        return Task::none();
    };

    // No-op if the worker was never started.
    panel.controls.terminate_worker();
    Task::none()
}

pub(crate) fn tick(state: &mut Demo) -> Task<Message> {
    if let Some(started) = state.started_at {
        state.elapsed_ms = started.elapsed().as_millis() as u64;
    }
    Task::none()
}
