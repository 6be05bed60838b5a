//! worker-fn demo
//!
//! # What this program is
//! A small desktop app (built with `iced`) that counts primes on a
//! background worker thread while the UI stays responsive.
//!
//! # How it uses the library
//! - the prime panel owns a `Scope`; showing it mounts, hiding it unmounts
//! - `use_worker_with(builder, count_primes, &scope)` gives `(runner, controls)`
//! - "Run" calls `runner.invoke((limit,))` and hands the `Pending` to `Task::perform`
//! - the Run button is disabled while `controls.running()` is true
//! - "Terminate" drops the worker; hiding the panel does the same via the scope
//!
//! Set `RUST_LOG=worker_fn=debug` to watch handles and calls come and go.

mod gui;

use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .init();

    // `iced::application` glues together:
    // - initial state (Demo::default, which mounts the panel)
    // - update function (logic)
    // - view function (UI layout)
    iced::application(gui::Demo::default, gui::update, gui::view)
        .title("worker-fn demo")
        .subscription(gui::subscription)
        .run()
}
